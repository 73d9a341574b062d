//! Structural-data error taxonomy for Switchyard.
//!
//! These errors describe problems with the data itself, never transient
//! faults, so none of them are retried. Storage and configuration errors are
//! defined in their respective crates and wrap [`DataError`] where needed.

use thiserror::Error;

/// Errors raised when input or query data violates a structural requirement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// Required columns are absent from a table or query result.
    #[error("schema mismatch in '{table}': missing columns [{}]", .missing.join(", "))]
    SchemaMismatch { table: String, missing: Vec<String> },

    /// Rows are not unique by the table's key columns.
    #[error("duplicate rows in '{table}': key ({key}) occurs more than once")]
    DuplicateRows { table: String, key: String },

    /// Query rows that cannot be reproduced from the underlying table.
    #[error(
        "erroneous values in '{table}': {count} row(s) not present in storage, e.g. {}",
        .rows.join("; ")
    )]
    ErroneousValues {
        table: String,
        count: usize,
        rows: Vec<String>,
    },

    /// Node identifiers referenced by edges differ from the node table.
    #[error(
        "node/edge mismatch in '{table}': only in edges [{}], only in nodes [{}]",
        .only_in_edges.join(", "),
        .only_in_nodes.join(", ")
    )]
    NodeEdgeMismatch {
        table: String,
        only_in_edges: Vec<String>,
        only_in_nodes: Vec<String>,
    },

    /// A candidate reached transition extraction with no affiliation events.
    #[error("empty timeline for candidate '{candidate_id}'")]
    EmptyTimeline { candidate_id: String },

    /// A cell holds a value that cannot be interpreted for its column.
    #[error("invalid value in '{table}'.{column} at row {row}: {value}")]
    InvalidValue {
        table: String,
        column: String,
        row: usize,
        value: String,
    },
}

impl DataError {
    /// Short machine-readable name of the failure kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SchemaMismatch { .. } => "schema_mismatch",
            Self::DuplicateRows { .. } => "duplicate_rows",
            Self::ErroneousValues { .. } => "erroneous_values",
            Self::NodeEdgeMismatch { .. } => "node_edge_mismatch",
            Self::EmptyTimeline { .. } => "empty_timeline",
            Self::InvalidValue { .. } => "invalid_value",
        }
    }
}
