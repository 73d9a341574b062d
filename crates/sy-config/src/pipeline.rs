//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Horizon year of the source data: the most recent election.
const fn default_observation_year() -> i32 {
    2020
}

const fn default_parallel() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Year standing in for "present" on open-ended affiliations.
    #[serde(default = "default_observation_year")]
    pub observation_year: i32,

    /// Extract transitions on the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            observation_year: default_observation_year(),
            parallel: default_parallel(),
        }
    }
}
