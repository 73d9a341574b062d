//! Table and column names of the input and output tables.
//!
//! Input tables are produced by the ingestion layer; output tables are the
//! persisted canonical network consumed by every graph query.

/// Candidate identifier column shared by every table.
pub const CANDIDATE: &str = "id_hdv";

/// Current affiliation: one row per candidate.
pub mod current {
    pub const TABLE: &str = "current";
    pub const LABEL: &str = "org_pol";
}

/// Historical party memberships.
pub mod party_record {
    pub const TABLE: &str = "party_record";
    pub const LABEL: &str = "party_memb";
    pub const BEGIN: &str = "party_start";
    pub const END: &str = "party_end";
}

/// Previously held elected positions and the organization they ran under.
pub mod position_record {
    pub const TABLE: &str = "position_record";
    pub const LABEL: &str = "prev_org_pol";
    pub const BEGIN: &str = "prev_start";
    pub const END: &str = "prev_end";
}

/// Party resignations.
pub mod resign_record {
    pub const TABLE: &str = "resign_record";
    pub const LABEL: &str = "resign";
    pub const YEAR: &str = "resign_year";
}

/// Output node table.
pub mod nodes {
    pub const TABLE: &str = "nodes";
    pub const NODE: &str = "node";
    pub const LABEL: &str = "p_name";
    pub const CURRENT: &str = "current";
    pub const REGIONAL: &str = "reg_movement";
    pub const COLUMNS: [&str; 4] = [NODE, LABEL, CURRENT, REGIONAL];
}

/// Output edge table.
pub mod network {
    pub const TABLE: &str = "network";
    pub const SOURCE: &str = "source";
    pub const TARGET: &str = "target";
    pub const YEAR: &str = "year";
    pub const EDGE: &str = "edge";
    pub const COLUMNS: [&str; 5] = [super::CANDIDATE, SOURCE, TARGET, YEAR, EDGE];
}

/// Output normalized event table.
pub mod edges {
    pub const TABLE: &str = "edges";
    pub const RECORD: &str = "edge_rec";
    pub const RAW_LABEL: &str = "org_pol";
    pub const LABEL: &str = "p_name";
    pub const NODE: &str = "node";
    pub const TYPE: &str = "type";
    pub const BEGIN: &str = "begin";
    pub const END: &str = "end";
    pub const COLUMNS: [&str; 8] = [
        super::CANDIDATE,
        RECORD,
        RAW_LABEL,
        LABEL,
        NODE,
        TYPE,
        BEGIN,
        END,
    ];
}
