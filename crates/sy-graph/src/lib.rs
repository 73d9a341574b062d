//! # sy-graph
//!
//! Graph Validator & Builder for Switchyard.
//!
//! Callers hand over an edge query and a node query. [`GraphValidator`] runs
//! both against the store and passes the results through a sequential gate:
//!
//! 1. schema: required key columns are present
//! 2. uniqueness: no repeated edge or node keys
//! 3. provenance: every row exists in the full stored table
//! 4. referential integrity: endpoints and node ids coincide (whole graphs only)
//! 5. materialization into a [`NetworkGraph`]
//!
//! The first failing stage aborts the build. The unchecked path skips stages
//! 1-4 for derived graphs whose rows cannot exist in storage.

pub mod build;
pub mod error;
pub mod metrics;
pub mod validate;

pub use build::{GraphKind, NetworkGraph, PartyGraph};
pub use error::GraphError;
pub use metrics::{NetworkSummary, NodeMetrics, OrderBy};
pub use validate::Scope;

use sy_config::GraphConfig;
use sy_core::{Table, Value};
use sy_store::{Store, queries};

/// A materialized graph together with the tables it was built from.
#[derive(Debug, Clone)]
pub struct ValidatedNetwork {
    pub graph: NetworkGraph,
    pub edges: Table,
    pub nodes: Table,
}

/// Runs node and edge queries against a [`Store`] and validates the results.
pub struct GraphValidator<'a> {
    store: &'a Store,
    config: &'a GraphConfig,
}

impl<'a> GraphValidator<'a> {
    #[must_use]
    pub const fn new(store: &'a Store, config: &'a GraphConfig) -> Self {
        Self { store, config }
    }

    /// Run both queries, validate them and build the graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Store`] if a query cannot be executed and
    /// [`GraphError::Validation`] from the first stage that rejects the results.
    pub fn build(
        &self,
        edges_sql: &str,
        nodes_sql: &str,
        kind: GraphKind,
        scope: Scope,
    ) -> Result<ValidatedNetwork, GraphError> {
        let edges = self.store.query("edges query", edges_sql)?;
        let nodes = self.store.query("nodes query", nodes_sql)?;

        let edge_key = validate::edge_key(&self.config.edge_id_column);
        let edge_columns = validate::check_schema(&edges, &edge_key)?;
        let node_columns = validate::check_schema(&nodes, &validate::NODE_KEY)?;
        tracing::debug!("schema check passed");

        validate::check_unique(&edges, &edge_columns)?;
        validate::check_unique(&nodes, &node_columns)?;
        tracing::debug!("uniqueness check passed");

        let stored_edges = self.store.select_all(&self.config.edge_table)?;
        let stored_nodes = self.store.select_all(&self.config.node_table)?;
        validate::check_provenance(&edges, &stored_edges, &edge_key)?;
        validate::check_provenance(&nodes, &stored_nodes, &validate::NODE_KEY)?;
        tracing::debug!("provenance check passed");

        if scope == Scope::Whole {
            validate::check_integrity(&edges, &nodes)?;
            tracing::debug!("integrity check passed");
        }

        let graph = NetworkGraph::from_tables(&edges, &nodes, kind)?;
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            ?kind,
            ?scope,
            "graph built"
        );
        Ok(ValidatedNetwork {
            graph,
            edges,
            nodes,
        })
    }

    /// Build a graph straight from query results, skipping every check.
    ///
    /// For derived or aggregate graphs whose rows do not exist in storage.
    /// Endpoint columns are still required to materialize edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Store`] if a query cannot be executed and
    /// [`GraphError::Validation`] if `source`, `target` or `node` is absent.
    pub fn build_unchecked(
        &self,
        edges_sql: &str,
        nodes_sql: &str,
        kind: GraphKind,
    ) -> Result<ValidatedNetwork, GraphError> {
        let edges = self.store.query("edges query", edges_sql)?;
        let nodes = self.store.query("nodes query", nodes_sql)?;
        let graph = NetworkGraph::from_tables(&edges, &nodes, kind)?;
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "unchecked graph built"
        );
        Ok(ValidatedNetwork {
            graph,
            edges,
            nodes,
        })
    }

    /// Validate an edge query alone (schema, uniqueness, provenance).
    ///
    /// # Errors
    ///
    /// Same as [`Self::build`], without the node and integrity stages.
    pub fn edges_only(&self, edges_sql: &str) -> Result<Table, GraphError> {
        let edges = self.store.query("edges query", edges_sql)?;
        let edge_key = validate::edge_key(&self.config.edge_id_column);
        let edge_columns = validate::check_schema(&edges, &edge_key)?;
        validate::check_unique(&edges, &edge_columns)?;
        let stored = self.store.select_all(&self.config.edge_table)?;
        validate::check_provenance(&edges, &stored, &edge_key)?;
        tracing::debug!(rows = edges.len(), "edge query validated");
        Ok(edges)
    }

    /// The subgraph of one party: edges touching `node` and their endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if `node` has no edges, otherwise
    /// the same errors as [`Self::build`].
    pub fn party(&self, node: u32, kind: GraphKind) -> Result<ValidatedNetwork, GraphError> {
        let network = self.build(
            &queries::party_edges(node),
            &queries::party_nodes(node),
            kind,
            Scope::Subgraph,
        )?;
        if network.nodes.is_empty() {
            return Err(GraphError::UnknownNode(Value::from(node).to_string()));
        }
        Ok(network)
    }
}
