use std::collections::BTreeSet;

use anyhow::Context;
use serde::Serialize;
use sy_config::SwitchyardConfig;
use sy_core::schema;
use sy_graph::{Scope, validate};
use sy_pipeline::Pipeline;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct BuildReport {
    pub candidates: usize,
    pub nodes: usize,
    pub edges: usize,
    pub moves: usize,
    pub events: usize,
}

/// Handle `switchyard build`.
pub fn handle(config: &SwitchyardConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = run(config)?;
    output(&report, flags.format)
}

pub fn run(config: &SwitchyardConfig) -> anyhow::Result<BuildReport> {
    let mut store = super::open_store(config)?;
    let sources = store
        .load_sources()
        .context("failed to load input record tables")?;

    let tables = Pipeline::new(config.pipeline.clone())
        .run(&sources)
        .context("failed to build the network from input records")?;

    // The written table carries `id_hdv`; config validation keeps readers of
    // the canonical table on the same column.
    validate::check_in_memory(
        &tables.network_table(),
        &tables.node_table(),
        schema::CANDIDATE,
        Scope::Whole,
    )
    .context("built network failed validation; nothing was written")?;

    store
        .write_canonical(&tables)
        .context("failed to write canonical tables")?;

    Ok(BuildReport {
        candidates: tables
            .network
            .iter()
            .map(|edge| edge.candidate_id.as_str())
            .collect::<BTreeSet<_>>()
            .len(),
        nodes: tables.nodes.len(),
        edges: tables.network.len(),
        moves: tables.network.iter().filter(|edge| edge.is_move).count(),
        events: tables.events.len(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sy_store::Store;

    use super::*;
    use crate::commands::test_support::seeded_config;

    #[test]
    fn build_writes_the_canonical_tables() {
        let (_dir, config) = seeded_config();
        let report = run(&config).unwrap();

        assert_eq!(report.candidates, 2);
        assert_eq!(report.nodes, 3);
        assert_eq!(report.edges, 2);
        assert_eq!(report.moves, 2);
        assert_eq!(report.events, 6);

        let store = Store::open(&config.store).unwrap();
        assert_eq!(store.select_all("network").unwrap().len(), 2);
    }

    #[test]
    fn written_table_matches_the_configured_canonical_names() {
        assert_eq!(schema::network::TABLE, sy_config::CANONICAL_EDGE_TABLE);
        assert_eq!(schema::CANDIDATE, sy_config::CANONICAL_EDGE_ID_COLUMN);
        assert_eq!(
            schema::network::TABLE,
            SwitchyardConfig::default().graph.edge_table
        );
    }

    #[test]
    fn renamed_id_column_is_rejected_before_building() {
        let (_dir, mut config) = seeded_config();
        config.graph.edge_id_column = "candidate".into();

        let err = run(&config).unwrap_err();
        assert!(format!("{err:#}").contains("graph.edge_id_column"));

        let store = Store::open(&config.store).unwrap();
        assert!(store.select_all("network").unwrap().is_empty());
    }

    #[test]
    fn pipeline_failure_leaves_store_untouched() {
        let (_dir, config) = seeded_config();
        {
            let store = Store::open(&config.store).unwrap();
            store
                .conn()
                .execute_batch("INSERT INTO resign_record VALUES ('Z', '   ', 2011);")
                .unwrap();
        }

        let err = run(&config).unwrap_err();
        assert!(format!("{err:#}").contains("empty timeline for candidate 'Z'"));

        let store = Store::open(&config.store).unwrap();
        assert!(store.select_all("network").unwrap().is_empty());
    }
}
