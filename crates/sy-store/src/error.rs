//! Store error types.

/// Errors that can occur in the `DuckDB` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `DuckDB` operation failed, including SQL that cannot be executed.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// I/O error (creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
