use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Rebuild nodes, network and edges from the input record tables.
    Build,
    /// Validate an edge query and a node query and build the graph.
    Graph(GraphArgs),
    /// Subgraph of one organization and the organizations it exchanged candidates with.
    Party(PartyArgs),
    /// Whole-network summary and centrality ranking.
    Metrics(MetricsArgs),
}

#[derive(Clone, Debug, Args)]
pub struct GraphArgs {
    /// Edge query; must select id_hdv, source, target and year.
    #[arg(long)]
    pub edges: String,

    /// Node query; must select node.
    #[arg(long, required_unless_present = "edges_only")]
    pub nodes: Option<String>,

    /// Build an undirected graph.
    #[arg(long)]
    pub undirected: bool,

    /// The queries select part of the network; skip the endpoint check.
    #[arg(long)]
    pub subgraph: bool,

    /// Skip every check (derived or aggregate queries).
    #[arg(long, conflicts_with = "subgraph")]
    pub unchecked: bool,

    /// Validate the edge query alone and print it.
    #[arg(long, conflicts_with_all = ["nodes", "unchecked", "undirected", "subgraph"])]
    pub edges_only: bool,
}

#[derive(Clone, Debug, Args)]
pub struct PartyArgs {
    /// Node id of the organization.
    pub node: u32,

    /// Build an undirected graph.
    #[arg(long)]
    pub undirected: bool,
}

#[derive(Clone, Debug, Args)]
pub struct MetricsArgs {
    /// Ranking metric: in-degree, out-degree, betweenness, eigenvector.
    #[arg(long, default_value = "betweenness")]
    pub order_by: String,

    /// Rows in the ranking (defaults to graph.top_n).
    #[arg(long)]
    pub top: Option<usize>,
}
