//! Graph materialization from node and edge tables.

use std::collections::{BTreeMap, HashMap};

use rustworkx_core::petgraph::graph::{Graph, NodeIndex};
use rustworkx_core::petgraph::{Directed, EdgeType, Undirected};
use serde::{Deserialize, Serialize};
use sy_core::schema::{self, network};
use sy_core::{DataError, Table, Value};

/// Node payload: the node key plus every other node column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub key: Value,
    pub attrs: BTreeMap<String, Value>,
}

impl NodeData {
    /// The organization name attribute, when the node query selected it.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.attrs.get(schema::nodes::LABEL).and_then(Value::as_str)
    }
}

/// Edge payload: every edge column except the endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeData {
    pub attrs: BTreeMap<String, Value>,
}

/// Directed or undirected graph selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    #[default]
    Directed,
    Undirected,
}

/// An attributed multigraph keyed by node value.
///
/// Parallel edges are kept, so every edge row is one graph edge.
#[derive(Debug, Clone)]
pub struct PartyGraph<Ty: EdgeType> {
    graph: Graph<NodeData, EdgeData, Ty>,
    index: HashMap<Value, NodeIndex>,
}

impl<Ty: EdgeType> PartyGraph<Ty> {
    /// Materialize a graph from an edge table and a node table.
    ///
    /// Nodes are added in node-table order; an endpoint missing from the node
    /// table becomes an attribute-less node.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::SchemaMismatch`] if the edge table lacks
    /// `source`/`target` or the node table lacks `node`.
    pub fn from_tables(edges: &Table, nodes: &Table) -> Result<Self, DataError> {
        let node_col = nodes.require_columns(&[schema::nodes::NODE])?[0];
        let endpoints = edges.require_columns(&[network::SOURCE, network::TARGET])?;
        let (source_col, target_col) = (endpoints[0], endpoints[1]);

        let mut graph = Graph::with_capacity(nodes.len(), edges.len());
        let mut index = HashMap::with_capacity(nodes.len());

        for row in 0..nodes.len() {
            let key = nodes.cell(row, node_col).clone();
            if index.contains_key(&key) {
                continue;
            }
            let idx = graph.add_node(NodeData {
                key: key.clone(),
                attrs: attributes(nodes, row, &[node_col]),
            });
            index.insert(key, idx);
        }

        for row in 0..edges.len() {
            let source = endpoint(&mut graph, &mut index, edges.cell(row, source_col));
            let target = endpoint(&mut graph, &mut index, edges.cell(row, target_col));
            graph.add_edge(
                source,
                target,
                EdgeData {
                    attrs: attributes(edges, row, &[source_col, target_col]),
                },
            );
        }

        Ok(Self { graph, index })
    }

    #[must_use]
    pub const fn graph(&self) -> &Graph<NodeData, EdgeData, Ty> {
        &self.graph
    }

    #[must_use]
    pub fn node_index(&self, key: &Value) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    #[must_use]
    pub fn node(&self, key: &Value) -> Option<&NodeData> {
        self.node_index(key).map(|idx| &self.graph[idx])
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// A materialized graph of either direction.
#[derive(Debug, Clone)]
pub enum NetworkGraph {
    Directed(PartyGraph<Directed>),
    Undirected(PartyGraph<Undirected>),
}

impl NetworkGraph {
    /// Build the graph variant selected by `kind`.
    ///
    /// # Errors
    ///
    /// Same as [`PartyGraph::from_tables`].
    pub fn from_tables(edges: &Table, nodes: &Table, kind: GraphKind) -> Result<Self, DataError> {
        Ok(match kind {
            GraphKind::Directed => Self::Directed(PartyGraph::from_tables(edges, nodes)?),
            GraphKind::Undirected => Self::Undirected(PartyGraph::from_tables(edges, nodes)?),
        })
    }

    #[must_use]
    pub const fn kind(&self) -> GraphKind {
        match self {
            Self::Directed(_) => GraphKind::Directed,
            Self::Undirected(_) => GraphKind::Undirected,
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Directed(g) => g.node_count(),
            Self::Undirected(g) => g.node_count(),
        }
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        match self {
            Self::Directed(g) => g.edge_count(),
            Self::Undirected(g) => g.edge_count(),
        }
    }

    #[must_use]
    pub const fn as_directed(&self) -> Option<&PartyGraph<Directed>> {
        match self {
            Self::Directed(g) => Some(g),
            Self::Undirected(_) => None,
        }
    }
}

fn endpoint<Ty: EdgeType>(
    graph: &mut Graph<NodeData, EdgeData, Ty>,
    index: &mut HashMap<Value, NodeIndex>,
    key: &Value,
) -> NodeIndex {
    if let Some(idx) = index.get(key) {
        return *idx;
    }
    let idx = graph.add_node(NodeData {
        key: key.clone(),
        attrs: BTreeMap::new(),
    });
    index.insert(key.clone(), idx);
    idx
}

fn attributes(table: &Table, row: usize, skip: &[usize]) -> BTreeMap<String, Value> {
    table
        .columns
        .iter()
        .enumerate()
        .filter(|(col, _)| !skip.contains(col))
        .map(|(col, name)| (name.clone(), table.cell(row, col).clone()))
        .collect()
}
