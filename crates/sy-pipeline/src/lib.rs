//! # sy-pipeline
//!
//! Affiliation records to canonical node/edge tables.
//!
//! The stages run leaf-first: [`normalize`] canonicalizes organization
//! labels, [`timeline`] merges the four source tables into per-candidate
//! timelines, [`transitions`] walks each timeline and emits dated moves, and
//! [`assemble`] allocates node ids and produces the output tables. Every run
//! rebuilds everything from scratch.

pub mod assemble;
pub mod normalize;
pub mod timeline;
pub mod transitions;

pub use assemble::{CanonicalTables, assemble};
pub use normalize::{Normalizer, Rule, is_regional_movement};
pub use timeline::{SourceTables, TimelineBuilder};
pub use transitions::TransitionExtractor;

use sy_config::PipelineConfig;
use sy_core::DataError;

/// The full affiliation-to-network pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    normalizer: Normalizer,
}

impl Pipeline {
    /// Pipeline with the built-in normalizer rules.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            normalizer: Normalizer::default(),
        }
    }

    /// Replace the normalizer, e.g. with an extended rule set.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage over the source tables.
    ///
    /// # Errors
    ///
    /// Propagates the first [`DataError`] from any stage; nothing is
    /// returned for a partially processed input.
    pub fn run(&self, sources: &SourceTables) -> Result<CanonicalTables, DataError> {
        let timelines = TimelineBuilder::new(&self.normalizer, self.config.observation_year)
            .build(sources)?;

        let transitions = TransitionExtractor::new(self.config.observation_year)
            .extract_all(&timelines, self.config.parallel)?;

        let tables = assemble(&timelines, &transitions)?;
        tracing::info!(
            candidates = timelines.len(),
            nodes = tables.nodes.len(),
            edges = tables.network.len(),
            moves = tables.network.iter().filter(|e| e.is_move).count(),
            "pipeline complete"
        );
        Ok(tables)
    }
}
