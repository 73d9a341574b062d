//! # sy-config
//!
//! Layered configuration loading for Switchyard using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SWITCHYARD_*` prefix, `__` as separator)
//! 2. Project-level `.switchyard/config.toml`
//! 3. User-level `~/.config/switchyard/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SWITCHYARD_PIPELINE__OBSERVATION_YEAR` -> `pipeline.observation_year`,
//! `SWITCHYARD_STORE__PATH` -> `store.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use sy_config::SwitchyardConfig;
//!
//! let config = SwitchyardConfig::load_with_dotenv().expect("config");
//! println!("horizon: {}", config.pipeline.observation_year);
//! ```

mod error;
mod graph;
mod pipeline;
mod store;

pub use error::ConfigError;
pub use graph::{CANONICAL_EDGE_ID_COLUMN, CANONICAL_EDGE_TABLE, GraphConfig};
pub use pipeline::PipelineConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SwitchyardConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub graph: GraphConfig,
}

impl SwitchyardConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] on malformed sources and
    /// [`ConfigError::InvalidValue`] when a value fails [`Self::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".switchyard/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SWITCHYARD_").split("__"))
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.observation_year <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.observation_year".into(),
                reason: format!("must be positive, got {}", self.pipeline.observation_year),
            });
        }

        let names = [
            ("store.path", &self.store.path),
            ("graph.edge_id_column", &self.graph.edge_id_column),
            ("graph.edge_table", &self.graph.edge_table),
            ("graph.node_table", &self.graph.node_table),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: "must not be empty".into(),
                });
            }
        }

        if !self.graph.edge_id_matches_table() {
            return Err(ConfigError::InvalidValue {
                field: "graph.edge_id_column".into(),
                reason: format!(
                    "table '{}' always uses '{}'; point graph.edge_table at an external table to \
                     use '{}'",
                    graph::CANONICAL_EDGE_TABLE,
                    graph::CANONICAL_EDGE_ID_COLUMN,
                    self.graph.edge_id_column
                ),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("switchyard").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SwitchyardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pipeline.observation_year, 2020);
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = SwitchyardConfig::figment();
        let config: SwitchyardConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.graph.edge_table, "network");
    }

    #[test]
    fn non_positive_horizon_is_rejected() {
        let mut config = SwitchyardConfig::default();
        config.pipeline.observation_year = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pipeline.observation_year"));
    }

    #[test]
    fn renamed_id_column_on_the_built_table_is_rejected() {
        let mut config = SwitchyardConfig::default();
        config.graph.edge_id_column = "candidate".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::InvalidValue { field, .. } if field == "graph.edge_id_column"
        ));
        assert!(err.to_string().contains("always uses 'id_hdv'"));

        config.graph.edge_table = "moves".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_table_name_is_rejected() {
        let mut config = SwitchyardConfig::default();
        config.graph.node_table = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "graph.node_table"
        ));
    }
}
