//! # sy-store
//!
//! Local `DuckDB` storage for Switchyard.
//!
//! One database file holds both sides of the pipeline:
//! - input record tables: `current`, `party_record`, `position_record`, `resign_record`
//! - canonical output tables: `nodes`, `network`, `edges`
//!
//! Queries are synchronous and return [`sy_core::Table`] values so that any
//! result, canned or ad hoc, can be handed to the graph validator.

pub mod error;
pub mod queries;
pub mod schemas;
pub mod store;

pub use error::StoreError;

use std::path::Path;

use duckdb::Connection;
use sy_config::StoreConfig;

/// The Switchyard `DuckDB` database.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a local `DuckDB` file, creating its directory if needed.
    ///
    /// Creates all tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created and
    /// [`StoreError::DuckDb`] if the file cannot be opened or schema creation fails.
    pub fn open_local(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        tracing::debug!(path = %path.display(), "opened store");
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if schema creation fails.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open the store named by the configuration.
    ///
    /// # Errors
    ///
    /// Same as [`Self::open_local`].
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        if config.is_in_memory() {
            Self::open_in_memory()
        } else {
            Self::open_local(&config.path)
        }
    }

    /// Access the underlying `DuckDB` connection.
    ///
    /// Used by the ingestion layer and tests to fill the input tables.
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        for ddl in schemas::ALL_TABLES {
            self.conn.execute_batch(ddl)?;
        }
        Ok(())
    }
}
