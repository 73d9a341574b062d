//! Node and edge table assembly.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use sy_core::schema::{edges, network, nodes};
use sy_core::{
    CandidateTimeline, DataError, EventRecord, EventType, NetworkEdge, Node, Table, Transition,
    Value,
};

use crate::normalize::is_regional_movement;

/// The canonical output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTables {
    /// Organizations ordered by `node_id`.
    pub nodes: Vec<Node>,
    /// Transitions keyed by node id, ordered by candidate then transition.
    pub network: Vec<NetworkEdge>,
    /// Every affiliation event keyed by node id.
    pub events: Vec<EventRecord>,
}

impl CanonicalTables {
    #[must_use]
    pub fn node_table(&self) -> Table {
        let mut table = Table::new(nodes::TABLE, nodes::COLUMNS);
        for node in &self.nodes {
            table.push_row(vec![
                Value::from(node.node_id),
                Value::from(node.label.as_str()),
                Value::from(node.is_current),
                Value::from(node.is_regional_movement),
            ]);
        }
        table
    }

    #[must_use]
    pub fn network_table(&self) -> Table {
        let mut table = Table::new(network::TABLE, network::COLUMNS);
        for edge in &self.network {
            table.push_row(vec![
                Value::from(edge.candidate_id.as_str()),
                Value::from(edge.source),
                Value::from(edge.target),
                Value::from(edge.year),
                Value::from(edge.is_move),
            ]);
        }
        table
    }

    #[must_use]
    pub fn event_table(&self) -> Table {
        let mut table = Table::new(edges::TABLE, edges::COLUMNS);
        for event in &self.events {
            table.push_row(vec![
                Value::from(event.candidate_id.as_str()),
                Value::from(event.record),
                Value::from(event.raw_label.as_str()),
                Value::from(event.label.as_str()),
                Value::from(event.node),
                Value::from(event.event_type.as_str()),
                Value::from(event.begin_year),
                Value::from(event.end_year),
            ]);
        }
        table
    }
}

/// Allocate node ids and key transitions and events by them.
///
/// Node ids follow the ascending order of canonical labels, so the same
/// label set always yields the same ids. Repeated transitions on
/// `(candidate, source, target, year)` are dropped, keeping the first.
///
/// # Errors
///
/// Returns [`DataError::NodeEdgeMismatch`] if the node set and the set of
/// edge endpoints differ.
pub fn assemble(
    timelines: &[CandidateTimeline],
    transitions: &[Transition],
) -> Result<CanonicalTables, DataError> {
    let events = timelines.iter().flat_map(|t| &t.events);

    let labels: BTreeSet<&str> = transitions
        .iter()
        .flat_map(|t| [t.source.as_str(), t.target.as_str()])
        .chain(events.clone().map(|e| e.label.as_str()))
        .collect();
    let current: HashSet<&str> = events
        .clone()
        .filter(|e| e.event_type == EventType::Current)
        .map(|e| e.label.as_str())
        .collect();

    let mut ids: BTreeMap<&str, u32> = BTreeMap::new();
    let mut node_rows = Vec::with_capacity(labels.len());
    for (node_id, label) in (0u32..).zip(labels) {
        ids.insert(label, node_id);
        node_rows.push(Node {
            node_id,
            label: label.to_string(),
            is_current: current.contains(label),
            is_regional_movement: is_regional_movement(label),
        });
    }

    let mut seen = HashSet::new();
    let mut network_rows = Vec::with_capacity(transitions.len());
    for transition in transitions {
        let edge = NetworkEdge {
            candidate_id: transition.candidate_id.clone(),
            source: ids[transition.source.as_str()],
            target: ids[transition.target.as_str()],
            year: transition.year,
            is_move: transition.is_move,
        };
        if seen.insert((edge.candidate_id.clone(), edge.source, edge.target, edge.year)) {
            network_rows.push(edge);
        }
    }
    let dropped = transitions.len() - network_rows.len();
    if dropped > 0 {
        tracing::warn!(dropped, "dropped duplicate transitions");
    }

    let event_rows = events
        .map(|e| EventRecord {
            candidate_id: e.candidate_id.clone(),
            record: e.record,
            raw_label: e.raw_label.clone(),
            label: e.label.clone(),
            node: ids[e.label.as_str()],
            event_type: e.event_type,
            begin_year: e.begin_year,
            end_year: e.end_year,
        })
        .collect();

    check_coverage(&node_rows, &network_rows)?;

    Ok(CanonicalTables {
        nodes: node_rows,
        network: network_rows,
        events: event_rows,
    })
}

fn check_coverage(nodes: &[Node], edges: &[NetworkEdge]) -> Result<(), DataError> {
    let node_ids: BTreeSet<u32> = nodes.iter().map(|n| n.node_id).collect();
    let endpoints: BTreeSet<u32> = edges.iter().flat_map(|e| [e.source, e.target]).collect();
    if node_ids == endpoints {
        return Ok(());
    }
    Err(DataError::NodeEdgeMismatch {
        table: network::TABLE.to_string(),
        only_in_edges: endpoints
            .difference(&node_ids)
            .map(ToString::to_string)
            .collect(),
        only_in_nodes: node_ids
            .difference(&endpoints)
            .map(ToString::to_string)
            .collect(),
    })
}
