//! Graph error types for sy-graph.

use sy_core::DataError;

/// Errors from validating query results and building graphs.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A validation stage rejected the query results.
    #[error("validation failed: {0}")]
    Validation(#[from] DataError),

    /// Error from the `DuckDB` store, including queries that cannot be executed.
    #[error("store error: {0}")]
    Store(#[from] sy_store::StoreError),

    /// Requested node does not exist in the graph.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Unrecognized metric name.
    #[error("invalid metric: {0}")]
    InvalidMetric(String),
}

impl GraphError {
    /// The structural-data failure behind this error, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&DataError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}
