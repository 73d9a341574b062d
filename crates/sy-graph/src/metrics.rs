//! Network metrics over a validated directed graph.
//!
//! The builder keeps one edge per candidate transition. Metrics look at the
//! party-to-party structure instead, so every function here first collapses
//! parallel edges into a simple digraph.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use rustworkx_core::centrality::{betweenness_centrality, eigenvector_centrality};
use rustworkx_core::connectivity::connected_components;
use rustworkx_core::petgraph::graph::{Graph, NodeIndex};
use rustworkx_core::petgraph::visit::EdgeRef;
use rustworkx_core::petgraph::{Directed, Direction};
use serde::Serialize;
use sy_core::Value;

use crate::build::PartyGraph;
use crate::error::GraphError;

/// Whole-network summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub node_count: usize,
    /// Distinct `(source, target)` party pairs.
    pub edge_count: usize,
    /// Candidate transitions, counting repeated moves between the same pair.
    pub transitions: usize,
    pub density: f64,
    pub transitivity: f64,
    pub components: usize,
}

/// Per-node centrality and degree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMetrics {
    pub key: Value,
    pub label: Option<String>,
    pub in_degree: usize,
    pub out_degree: usize,
    pub betweenness: f64,
    /// `None` when the power iteration did not converge.
    pub eigenvector: Option<f64>,
}

/// Ranking criterion for [`rank`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderBy {
    InDegree,
    OutDegree,
    #[default]
    Betweenness,
    Eigenvector,
}

impl OrderBy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InDegree => "in_degree",
            Self::OutDegree => "out_degree",
            Self::Betweenness => "betweenness",
            Self::Eigenvector => "eigenvector",
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn score(self, metrics: &NodeMetrics) -> f64 {
        match self {
            Self::InDegree => metrics.in_degree as f64,
            Self::OutDegree => metrics.out_degree as f64,
            Self::Betweenness => metrics.betweenness,
            Self::Eigenvector => metrics.eigenvector.unwrap_or(f64::NEG_INFINITY),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "in_degree" => Ok(Self::InDegree),
            "out_degree" => Ok(Self::OutDegree),
            "betweenness" => Ok(Self::Betweenness),
            "eigenvector" => Ok(Self::Eigenvector),
            _ => Err(GraphError::InvalidMetric(s.to_string())),
        }
    }
}

/// Party-to-party view of a transition graph: same node indices, at most one
/// edge per ordered pair. Self-loops survive as a single edge.
type SimpleGraph = Graph<(), (), Directed>;

fn simple_view(graph: &PartyGraph<Directed>) -> SimpleGraph {
    let g = graph.graph();
    let mut simple = SimpleGraph::with_capacity(g.node_count(), g.edge_count());
    for _ in g.node_indices() {
        simple.add_node(());
    }
    let mut seen = HashSet::new();
    for edge in g.edge_references() {
        let pair = (edge.source(), edge.target());
        if seen.insert(pair) {
            simple.add_edge(pair.0, pair.1, ());
        }
    }
    simple
}

/// Node count, edge counts, density, transitivity and weak component count.
///
/// Density is `m / (n(n-1))` over distinct party pairs, so it stays within
/// 0..1 for loop-free graphs. Graphs with fewer than two nodes have density 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summary(graph: &PartyGraph<Directed>) -> NetworkSummary {
    let simple = simple_view(graph);
    let n = simple.node_count();
    let m = simple.edge_count();
    let density = if n < 2 {
        0.0
    } else {
        m as f64 / (n as f64 * (n - 1) as f64)
    };
    NetworkSummary {
        node_count: n,
        edge_count: m,
        transitions: graph.edge_count(),
        density,
        transitivity: transitivity(&simple),
        components: connected_components(&simple).len(),
    }
}

/// Share of closed two-paths: for every node `v` with successors `S(v)`
/// (excluding `v`), count the successor pairs `(w, u)` where `u` is also a
/// successor of `w`, then divide by the sum of `|S(v)|(|S(v)|-1)`.
#[allow(clippy::cast_precision_loss)]
fn transitivity(simple: &SimpleGraph) -> f64 {
    let successors: Vec<HashSet<NodeIndex>> = simple
        .node_indices()
        .map(|v| simple.neighbors(v).filter(|&w| w != v).collect())
        .collect();

    let mut closed = 0usize;
    let mut possible = 0usize;
    for out in &successors {
        let d = out.len();
        possible += d * d.saturating_sub(1);
        closed += out
            .iter()
            .map(|w| successors[w.index()].intersection(out).count())
            .sum::<usize>();
    }

    if closed == 0 {
        0.0
    } else {
        closed as f64 / possible as f64
    }
}

/// Degree and centrality for every node, in graph insertion order.
///
/// Degrees count distinct neighbouring parties, not transitions.
#[must_use]
pub fn node_metrics(graph: &PartyGraph<Directed>) -> Vec<NodeMetrics> {
    let g = graph.graph();
    if g.node_count() == 0 {
        return Vec::new();
    }
    let simple = simple_view(graph);

    let betweenness = betweenness_centrality(&simple, false, true, 200);
    let Ok(eigenvector) =
        eigenvector_centrality(&simple, |_| Ok::<f64, Infallible>(1.0), None, None);
    if eigenvector.is_none() {
        tracing::debug!("eigenvector centrality did not converge");
    }

    g.node_indices()
        .map(|idx| {
            let data = &g[idx];
            NodeMetrics {
                key: data.key.clone(),
                label: data.label().map(str::to_string),
                in_degree: simple.edges_directed(idx, Direction::Incoming).count(),
                out_degree: simple.edges_directed(idx, Direction::Outgoing).count(),
                betweenness: betweenness.get(idx.index()).copied().flatten().unwrap_or(0.0),
                eigenvector: eigenvector
                    .as_ref()
                    .and_then(|scores| scores.get(idx.index()).copied()),
            }
        })
        .collect()
}

/// Top `n` nodes by `order_by`, descending; ties go to the smaller key.
#[must_use]
pub fn rank(metrics: &[NodeMetrics], order_by: OrderBy, n: usize) -> Vec<NodeMetrics> {
    let mut ranked = metrics.to_vec();
    ranked.sort_by(|a, b| {
        order_by
            .score(b)
            .partial_cmp(&order_by.score(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.key.total_cmp(&b.key))
    });
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sy_core::Table;

    use super::*;

    // Star into node 0 plus a chain 3 -> 4 -> 0.
    fn graph() -> PartyGraph<Directed> {
        let mut edges = Table::new("network", ["id_hdv", "source", "target", "year"]);
        for (id, source, target) in [("A", 1, 0), ("B", 2, 0), ("C", 3, 4), ("D", 4, 0)] {
            edges.push_row(vec![id.into(), source.into(), target.into(), 2010.into()]);
        }
        let mut nodes = Table::new("nodes", ["node", "p_name"]);
        for id in 0..5 {
            nodes.push_row(vec![id.into(), format!("P{id}").into()]);
        }
        PartyGraph::from_tables(&edges, &nodes).unwrap()
    }

    #[test]
    fn summary_counts_density_and_components() {
        let summary = summary(&graph());
        assert_eq!(summary.node_count, 5);
        assert_eq!(summary.edge_count, 4);
        assert_eq!(summary.transitions, 4);
        assert!((summary.density - 0.2).abs() < 1e-9);
        assert_eq!(summary.transitivity, 0.0);
        assert_eq!(summary.components, 1);
    }

    fn graph_from(moves: &[(u32, u32)], node_count: u32) -> PartyGraph<Directed> {
        let mut edges = Table::new("network", ["id_hdv", "source", "target", "year"]);
        for (i, (source, target)) in moves.iter().enumerate() {
            edges.push_row(vec![
                format!("C{i}").into(),
                (*source).into(),
                (*target).into(),
                2010.into(),
            ]);
        }
        let mut nodes = Table::new("nodes", ["node", "p_name"]);
        for id in 0..node_count {
            nodes.push_row(vec![id.into(), format!("P{id}").into()]);
        }
        PartyGraph::from_tables(&edges, &nodes).unwrap()
    }

    #[test]
    fn repeated_moves_between_two_parties_count_once() {
        let graph = graph_from(&[(0, 1), (0, 1), (0, 1)], 2);
        assert_eq!(graph.edge_count(), 3);

        let summary = summary(&graph);
        assert_eq!(summary.edge_count, 1);
        assert_eq!(summary.transitions, 3);
        assert!((summary.density - 0.5).abs() < 1e-9);

        let metrics = node_metrics(&graph);
        let degrees: Vec<(usize, usize)> =
            metrics.iter().map(|m| (m.in_degree, m.out_degree)).collect();
        assert_eq!(degrees, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn repeated_moves_do_not_weight_centrality() {
        let once = node_metrics(&graph_from(&[(0, 1), (1, 2)], 3));
        let repeated = node_metrics(&graph_from(&[(0, 1), (0, 1), (1, 2), (1, 2)], 3));
        assert_eq!(once, repeated);
    }

    #[rstest]
    #[case::open_two_path(&[(0, 1), (0, 2), (1, 2)], 0.5)]
    #[case::cycle(&[(0, 1), (1, 2), (2, 0)], 0.0)]
    #[case::mutual_triangle(&[(0, 1), (1, 0), (0, 2), (2, 0), (1, 2), (2, 1)], 1.0)]
    #[case::parallel_edges_collapse(&[(0, 1), (0, 1), (0, 2), (1, 2), (1, 2)], 0.5)]
    fn transitivity_counts_closed_successor_pairs(
        #[case] moves: &[(u32, u32)],
        #[case] expected: f64,
    ) {
        let summary = summary(&graph_from(moves, 3));
        assert!((summary.transitivity - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_graph_has_zero_density() {
        let edges = Table::new("network", ["id_hdv", "source", "target", "year"]);
        let nodes = Table::new("nodes", ["node"]);
        let graph = PartyGraph::<Directed>::from_tables(&edges, &nodes).unwrap();
        let summary = summary(&graph);
        assert_eq!(summary.density, 0.0);
        assert_eq!(summary.components, 0);
        assert!(node_metrics(&graph).is_empty());
    }

    #[test]
    fn degrees_follow_edge_direction() {
        let metrics = node_metrics(&graph());
        let degrees: Vec<(usize, usize)> =
            metrics.iter().map(|m| (m.in_degree, m.out_degree)).collect();
        assert_eq!(degrees, vec![(3, 0), (0, 1), (0, 1), (0, 1), (1, 1)]);
        assert_eq!(metrics[0].label.as_deref(), Some("P0"));
    }

    #[test]
    fn only_the_relay_node_has_betweenness() {
        let metrics = node_metrics(&graph());
        let relay = metrics.iter().find(|m| m.key == Value::from(4)).unwrap();
        assert!(relay.betweenness > 0.0);
        assert!(
            metrics
                .iter()
                .filter(|m| m.key != Value::from(4))
                .all(|m| m.betweenness == 0.0)
        );
    }

    #[test]
    fn rank_orders_descending_with_key_tie_break() {
        let ranked = rank(&node_metrics(&graph()), OrderBy::OutDegree, 3);
        let keys: Vec<Value> = ranked.into_iter().map(|m| m.key).collect();
        assert_eq!(keys, vec![Value::from(1), Value::from(2), Value::from(3)]);
    }

    #[rstest]
    #[case("in-degree", OrderBy::InDegree)]
    #[case("out_degree", OrderBy::OutDegree)]
    #[case("Betweenness", OrderBy::Betweenness)]
    #[case("eigenvector", OrderBy::Eigenvector)]
    fn order_by_parses(#[case] input: &str, #[case] expected: OrderBy) {
        assert_eq!(input.parse::<OrderBy>().unwrap(), expected);
    }

    #[test]
    fn unknown_order_by_is_rejected() {
        let err = "pagerank".parse::<OrderBy>().unwrap_err();
        assert!(matches!(err, GraphError::InvalidMetric(name) if name == "pagerank"));
    }
}
