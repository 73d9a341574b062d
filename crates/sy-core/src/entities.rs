//! Domain entities for the affiliation network.
//!
//! All entities are rebuilt from scratch on every pipeline run; none of them
//! are mutated after construction.

use serde::{Deserialize, Serialize};

use crate::enums::EventType;

/// One (organization, time-span) record for a candidate from any source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationEvent {
    pub candidate_id: String,
    /// 1-based position among the candidate's events in insertion order.
    pub record: u32,
    pub event_type: EventType,
    /// Organization label as it appeared in the source table.
    pub raw_label: String,
    /// Canonical organization label (node identity key).
    pub label: String,
    pub begin_year: Option<i32>,
    pub end_year: Option<i32>,
}

/// All affiliation events of one candidate, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTimeline {
    pub candidate_id: String,
    pub events: Vec<AffiliationEvent>,
}

impl CandidateTimeline {
    #[must_use]
    pub const fn new(candidate_id: String) -> Self {
        Self {
            candidate_id,
            events: Vec::new(),
        }
    }
}

/// A directed, dated movement (or self-loop) between two organizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub candidate_id: String,
    pub source: String,
    pub target: String,
    pub year: i32,
    pub is_move: bool,
}

impl Transition {
    #[must_use]
    pub fn new(candidate_id: &str, source: &str, target: &str, year: i32) -> Self {
        Self {
            candidate_id: candidate_id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            year,
            is_move: source != target,
        }
    }
}

/// A political organization in the node table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub node_id: u32,
    pub label: String,
    pub is_current: bool,
    pub is_regional_movement: bool,
}

/// A transition keyed by node identifiers (a row of the `network` table).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub candidate_id: String,
    pub source: u32,
    pub target: u32,
    pub year: i32,
    pub is_move: bool,
}

/// A normalized event keyed by node identifier (a row of the `edges` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub candidate_id: String,
    pub record: u32,
    pub raw_label: String,
    pub label: String,
    pub node: u32,
    pub event_type: EventType,
    pub begin_year: Option<i32>,
    pub end_year: Option<i32>,
}
