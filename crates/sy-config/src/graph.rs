//! Graph validation configuration.

use serde::{Deserialize, Serialize};

/// Edge table written by `switchyard build`.
pub const CANONICAL_EDGE_TABLE: &str = "network";

/// Candidate column of [`CANONICAL_EDGE_TABLE`]; its layout is fixed.
pub const CANONICAL_EDGE_ID_COLUMN: &str = "id_hdv";

fn default_edge_id_column() -> String {
    String::from(CANONICAL_EDGE_ID_COLUMN)
}

fn default_edge_table() -> String {
    String::from(CANONICAL_EDGE_TABLE)
}

fn default_node_table() -> String {
    String::from("nodes")
}

const fn default_top_n() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphConfig {
    /// Candidate identifier column required in edge query results.
    ///
    /// Only configurable for external edge tables: while `edge_table` is the
    /// canonical one this must stay [`CANONICAL_EDGE_ID_COLUMN`].
    #[serde(default = "default_edge_id_column")]
    pub edge_id_column: String,

    /// Table re-selected to check edge query provenance.
    #[serde(default = "default_edge_table")]
    pub edge_table: String,

    /// Table re-selected to check node query provenance.
    #[serde(default = "default_node_table")]
    pub node_table: String,

    /// Rows shown in centrality rankings.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl GraphConfig {
    /// Whether the configured id column can exist in the configured edge table.
    #[must_use]
    pub fn edge_id_matches_table(&self) -> bool {
        self.edge_table != CANONICAL_EDGE_TABLE || self.edge_id_column == CANONICAL_EDGE_ID_COLUMN
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            edge_id_column: default_edge_id_column(),
            edge_table: default_edge_table(),
            node_table: default_node_table(),
            top_n: default_top_n(),
        }
    }
}
