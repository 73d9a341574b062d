//! Event type enum for affiliation records.
//!
//! Uses `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and the same lowercase strings in SQL storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DataError;

// ---------------------------------------------------------------------------
// EventType
// ---------------------------------------------------------------------------

/// Source stream an affiliation event was read from.
///
/// The declaration order is the insertion order of the streams
/// (`current → party → position → resignation`), which is also the
/// tie-break order when two events share the same years.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Current,
    Party,
    Position,
    Resignation,
}

impl EventType {
    /// All event types in insertion order.
    pub const ALL: [Self; 4] = [Self::Current, Self::Party, Self::Position, Self::Resignation];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Party => "party",
            Self::Position => "position",
            Self::Resignation => "resignation",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DataError::InvalidValue {
                table: "edges".to_string(),
                column: "type".to_string(),
                row: 0,
                value: s.to_string(),
            })
    }
}
