//! # sy-core
//!
//! Core types and error taxonomy for Switchyard.
//!
//! This crate provides the foundational types shared across all Switchyard crates:
//! - Affiliation events, candidate timelines, transitions, and nodes
//! - Event type enum with its storage representation
//! - A small tabular model (`Value`, `Table`) for query results
//! - Input and output table/column names
//! - The structural-data error taxonomy (`DataError`)

pub mod entities;
pub mod enums;
pub mod errors;
pub mod schema;
pub mod table;

pub use entities::{AffiliationEvent, CandidateTimeline, EventRecord, NetworkEdge, Node, Transition};
pub use enums::EventType;
pub use errors::DataError;
pub use table::{Table, Value};
