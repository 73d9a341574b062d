use anyhow::Context;
use serde::Serialize;
use sy_config::SwitchyardConfig;
use sy_graph::metrics::{self, NetworkSummary, NodeMetrics};
use sy_graph::{GraphKind, GraphValidator, OrderBy, Scope};
use sy_store::queries;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MetricsArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct MetricsReport {
    pub summary: NetworkSummary,
    pub order_by: String,
    pub ranking: Vec<NodeMetrics>,
}

/// Handle `switchyard metrics`.
pub fn handle(
    args: &MetricsArgs,
    config: &SwitchyardConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let report = run(args, config)?;
    output(&report, flags.format)
}

pub fn run(args: &MetricsArgs, config: &SwitchyardConfig) -> anyhow::Result<MetricsReport> {
    let order_by: OrderBy = args.order_by.parse()?;
    let top = args.top.unwrap_or(config.graph.top_n);

    let store = super::open_store(config)?;
    let network = GraphValidator::new(&store, &config.graph)
        .build(
            queries::ALL_NETWORK,
            queries::ALL_NODES,
            GraphKind::Directed,
            Scope::Whole,
        )
        .context("stored network failed validation; run `switchyard build` first")?;
    let graph = network
        .graph
        .as_directed()
        .context("metrics need a directed graph")?;

    Ok(MetricsReport {
        summary: metrics::summary(graph),
        order_by: order_by.to_string(),
        ranking: metrics::rank(&metrics::node_metrics(graph), order_by, top),
    })
}
