//! Validation stages for node and edge query results.
//!
//! Each stage is a pure check over [`Table`]s and returns the first failure
//! as a [`DataError`]. Stages never modify their inputs.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use sy_core::schema::{self, network};
use sy_core::table::format_key;
use sy_core::{DataError, Table, Value};

/// Rows shown in an `ErroneousValues` report.
const REPORTED_ROWS: usize = 5;

/// Whether the node/edge pair is expected to describe a whole graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Edge endpoints and node ids must coincide.
    #[default]
    Whole,
    /// A subset of the network; endpoint coverage is not checked.
    Subgraph,
}

/// Key columns of an edge result: `(id, source, target, year)`.
#[must_use]
pub fn edge_key(id_column: &str) -> [&str; 4] {
    [id_column, network::SOURCE, network::TARGET, network::YEAR]
}

/// Key column of a node result.
pub const NODE_KEY: [&str; 1] = [schema::nodes::NODE];

/// Stage 1: the required columns are present.
///
/// # Errors
///
/// Returns [`DataError::SchemaMismatch`] listing every missing column.
pub fn check_schema(table: &Table, key: &[&str]) -> Result<Vec<usize>, DataError> {
    table.require_columns(key)
}

/// Stage 2: no two rows share a key.
///
/// # Errors
///
/// Returns [`DataError::DuplicateRows`] with the first repeated key.
pub fn check_unique(table: &Table, key_columns: &[usize]) -> Result<(), DataError> {
    let mut seen = HashSet::with_capacity(table.len());
    for row in 0..table.len() {
        let key = table.key(row, key_columns);
        if !seen.insert(key.clone()) {
            return Err(DataError::DuplicateRows {
                table: table.name.clone(),
                key: format_key(&key),
            });
        }
    }
    Ok(())
}

/// Stage 3: every query row exists in the full stored table.
///
/// A row matches when some stored row has the same key and agrees on every
/// other column the two tables share. Columns only present in the query
/// (computed expressions) are not compared.
///
/// # Errors
///
/// Returns [`DataError::SchemaMismatch`] if the stored table lacks the key,
/// and [`DataError::ErroneousValues`] listing the first unmatched rows.
pub fn check_provenance(query: &Table, stored: &Table, key: &[&str]) -> Result<(), DataError> {
    let query_key = query.require_columns(key)?;
    let stored_key = stored.require_columns(key)?;

    let shared: Vec<(usize, usize)> = query
        .columns
        .iter()
        .enumerate()
        .filter_map(|(qi, name)| stored.column_index(name).map(|si| (qi, si)))
        .collect();

    let mut by_key: HashMap<Vec<Value>, Vec<usize>> = HashMap::with_capacity(stored.len());
    for row in 0..stored.len() {
        by_key.entry(stored.key(row, &stored_key)).or_default().push(row);
    }

    let unmatched: Vec<usize> = (0..query.len())
        .filter(|&q_row| {
            let candidates = by_key.get(&query.key(q_row, &query_key));
            !candidates.is_some_and(|rows| {
                rows.iter().any(|&s_row| {
                    shared
                        .iter()
                        .all(|&(qi, si)| query.cell(q_row, qi) == stored.cell(s_row, si))
                })
            })
        })
        .collect();

    if unmatched.is_empty() {
        return Ok(());
    }
    Err(DataError::ErroneousValues {
        table: query.name.clone(),
        count: unmatched.len(),
        rows: unmatched
            .iter()
            .take(REPORTED_ROWS)
            .map(|&row| format_key(&query.rows[row]))
            .collect(),
    })
}

/// Stage 4: edge endpoints and node ids are the same set.
///
/// # Errors
///
/// Returns [`DataError::NodeEdgeMismatch`] with both differences, sorted.
pub fn check_integrity(edges: &Table, nodes: &Table) -> Result<(), DataError> {
    let source = edges.require_columns(&[network::SOURCE, network::TARGET])?;
    let node = nodes.require_columns(&NODE_KEY)?;

    let mut endpoints = edges.distinct(source[0]);
    endpoints.extend(edges.distinct(source[1]));
    let node_ids = nodes.distinct(node[0]);

    if endpoints == node_ids {
        return Ok(());
    }
    Err(DataError::NodeEdgeMismatch {
        table: edges.name.clone(),
        only_in_edges: sorted_difference(&endpoints, &node_ids),
        only_in_nodes: sorted_difference(&node_ids, &endpoints),
    })
}

/// Stages 1, 2 and 4 over tables that never left memory.
///
/// Used before persisting pipeline output, where provenance holds trivially.
///
/// # Errors
///
/// Returns the first failing stage's [`DataError`].
pub fn check_in_memory(
    edges: &Table,
    nodes: &Table,
    id_column: &str,
    scope: Scope,
) -> Result<(), DataError> {
    let edge_key_columns = check_schema(edges, &edge_key(id_column))?;
    let node_key_columns = check_schema(nodes, &NODE_KEY)?;
    check_unique(edges, &edge_key_columns)?;
    check_unique(nodes, &node_key_columns)?;
    if scope == Scope::Whole {
        check_integrity(edges, nodes)?;
    }
    Ok(())
}

fn sorted_difference(left: &HashSet<Value>, right: &HashSet<Value>) -> Vec<String> {
    let mut values: Vec<&Value> = left.difference(right).collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values.into_iter().map(ToString::to_string).collect()
}
