//! `DuckDB` table DDL for the input record tables and the canonical network.
//!
//! Input tables are filled by the ingestion layer; they are created empty on
//! open so a fresh database can be loaded with plain `INSERT`s. Output tables
//! are dropped and recreated on every canonical write. Keyword-like column
//! names (`current`, `year`, `type`, `begin`, `end`) are always quoted.

// ── Input tables ───────────────────────────────────────────────────────────

/// Current affiliation, one row per candidate.
pub const CREATE_CURRENT: &str = r#"
CREATE TABLE IF NOT EXISTS "current" (
    id_hdv TEXT NOT NULL,
    org_pol TEXT
);
"#;

/// Historical party memberships.
pub const CREATE_PARTY_RECORD: &str = "
CREATE TABLE IF NOT EXISTS party_record (
    id_hdv TEXT NOT NULL,
    party_memb TEXT,
    party_start INTEGER,
    party_end INTEGER
);
";

/// Elected positions held before, with the organization they ran under.
pub const CREATE_POSITION_RECORD: &str = "
CREATE TABLE IF NOT EXISTS position_record (
    id_hdv TEXT NOT NULL,
    prev_org_pol TEXT,
    prev_start INTEGER,
    prev_end INTEGER
);
";

/// Party resignations.
pub const CREATE_RESIGN_RECORD: &str = "
CREATE TABLE IF NOT EXISTS resign_record (
    id_hdv TEXT NOT NULL,
    resign TEXT,
    resign_year INTEGER
);
";

// ── Output tables ──────────────────────────────────────────────────────────

/// Organizations with dense ids.
pub const CREATE_NODES: &str = r#"
CREATE TABLE IF NOT EXISTS nodes (
    node INTEGER NOT NULL,
    p_name TEXT NOT NULL,
    "current" BOOLEAN NOT NULL,
    reg_movement BOOLEAN NOT NULL,
    PRIMARY KEY (node)
);
"#;

/// Candidate transitions between organizations.
pub const CREATE_NETWORK: &str = r#"
CREATE TABLE IF NOT EXISTS network (
    id_hdv TEXT NOT NULL,
    source INTEGER NOT NULL,
    target INTEGER NOT NULL,
    "year" INTEGER NOT NULL,
    edge BOOLEAN NOT NULL,
    PRIMARY KEY (id_hdv, source, target, "year")
);
"#;

/// Normalized affiliation events keyed by node.
pub const CREATE_EDGES: &str = r#"
CREATE TABLE IF NOT EXISTS edges (
    id_hdv TEXT NOT NULL,
    edge_rec INTEGER NOT NULL,
    org_pol TEXT NOT NULL,
    p_name TEXT NOT NULL,
    node INTEGER NOT NULL,
    "type" TEXT NOT NULL,
    "begin" INTEGER,
    "end" INTEGER,
    PRIMARY KEY (id_hdv, edge_rec)
);
"#;

pub const DROP_OUTPUT: &str = "
DROP TABLE IF EXISTS nodes;
DROP TABLE IF EXISTS network;
DROP TABLE IF EXISTS edges;
";

/// Every `CREATE` statement, in creation order.
pub const ALL_TABLES: [&str; 7] = [
    CREATE_CURRENT,
    CREATE_PARTY_RECORD,
    CREATE_POSITION_RECORD,
    CREATE_RESIGN_RECORD,
    CREATE_NODES,
    CREATE_NETWORK,
    CREATE_EDGES,
];

/// Quote an identifier for interpolation into SQL.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_quoted_and_escaped() {
        assert_eq!(quote_ident("current"), "\"current\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
