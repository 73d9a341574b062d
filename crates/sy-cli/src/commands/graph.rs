use anyhow::Context;
use serde::Serialize;
use sy_config::SwitchyardConfig;
use sy_core::Table;
use sy_graph::{GraphKind, GraphValidator, Scope, ValidatedNetwork};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GraphArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GraphReport {
    Graph(GraphSummary),
    Edges(Table),
}

#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub kind: GraphKind,
    /// `None` for unchecked builds.
    pub scope: Option<Scope>,
    pub nodes: usize,
    pub edges: usize,
    pub node_columns: Vec<String>,
    pub edge_columns: Vec<String>,
}

impl GraphSummary {
    pub fn new(network: &ValidatedNetwork, scope: Option<Scope>) -> Self {
        Self {
            kind: network.graph.kind(),
            scope,
            nodes: network.graph.node_count(),
            edges: network.graph.edge_count(),
            node_columns: network.nodes.columns.clone(),
            edge_columns: network.edges.columns.clone(),
        }
    }
}

/// Handle `switchyard graph`.
pub fn handle(
    args: &GraphArgs,
    config: &SwitchyardConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let report = run(args, config)?;
    output(&report, flags.format)
}

pub fn run(args: &GraphArgs, config: &SwitchyardConfig) -> anyhow::Result<GraphReport> {
    let store = super::open_store(config)?;
    let validator = GraphValidator::new(&store, &config.graph);

    if args.edges_only {
        let edges = validator
            .edges_only(&args.edges)
            .context("edge query failed validation")?;
        return Ok(GraphReport::Edges(edges));
    }

    let nodes_sql = args
        .nodes
        .as_deref()
        .context("--nodes is required unless --edges-only is set")?;
    let kind = if args.undirected {
        GraphKind::Undirected
    } else {
        GraphKind::Directed
    };

    if args.unchecked {
        let network = validator
            .build_unchecked(&args.edges, nodes_sql, kind)
            .context("failed to build unchecked graph")?;
        return Ok(GraphReport::Graph(GraphSummary::new(&network, None)));
    }

    let scope = if args.subgraph {
        Scope::Subgraph
    } else {
        Scope::Whole
    };
    let network = validator
        .build(&args.edges, nodes_sql, kind, scope)
        .context("graph queries failed validation")?;
    Ok(GraphReport::Graph(GraphSummary::new(&network, Some(scope))))
}
