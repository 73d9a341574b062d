use anyhow::Context;
use serde::Serialize;
use sy_config::SwitchyardConfig;
use sy_core::Table;
use sy_graph::{GraphKind, GraphValidator};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PartyArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct PartyReport {
    pub node: u32,
    pub nodes: Table,
    pub edges: Table,
}

/// Handle `switchyard party`.
pub fn handle(
    args: &PartyArgs,
    config: &SwitchyardConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let report = run(args, config)?;
    output(&report, flags.format)
}

pub fn run(args: &PartyArgs, config: &SwitchyardConfig) -> anyhow::Result<PartyReport> {
    let store = super::open_store(config)?;
    let kind = if args.undirected {
        GraphKind::Undirected
    } else {
        GraphKind::Directed
    };
    let network = GraphValidator::new(&store, &config.graph)
        .party(args.node, kind)
        .with_context(|| format!("failed to build the subgraph of node {}", args.node))?;

    Ok(PartyReport {
        node: args.node,
        nodes: network.nodes,
        edges: network.edges,
    })
}
