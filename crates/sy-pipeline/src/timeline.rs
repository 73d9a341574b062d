//! Merge the four per-candidate record tables into affiliation timelines.

use std::collections::{BTreeMap, HashSet};

use sy_core::schema::{self, current, party_record, position_record, resign_record};
use sy_core::{AffiliationEvent, CandidateTimeline, DataError, EventType, Table, Value};

use crate::normalize::Normalizer;

/// The four input tables, as loaded from the store.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub current: Table,
    pub party: Table,
    pub position: Table,
    pub resignation: Table,
}

/// An event before its per-candidate record number is known.
struct PendingEvent {
    event_type: EventType,
    raw_label: String,
    label: String,
    begin_year: Option<i32>,
    end_year: Option<i32>,
}

/// Column layout of one source table.
struct SourceLayout {
    event_type: EventType,
    label: &'static str,
    begin: Option<&'static str>,
    end: Option<&'static str>,
}

const LAYOUTS: [SourceLayout; 4] = [
    SourceLayout {
        event_type: EventType::Current,
        label: current::LABEL,
        begin: None,
        end: None,
    },
    SourceLayout {
        event_type: EventType::Party,
        label: party_record::LABEL,
        begin: Some(party_record::BEGIN),
        end: Some(party_record::END),
    },
    SourceLayout {
        event_type: EventType::Position,
        label: position_record::LABEL,
        begin: Some(position_record::BEGIN),
        end: Some(position_record::END),
    },
    SourceLayout {
        event_type: EventType::Resignation,
        label: resign_record::LABEL,
        begin: Some(resign_record::YEAR),
        end: Some(resign_record::YEAR),
    },
];

/// Builds one [`CandidateTimeline`] per candidate from the source tables.
pub struct TimelineBuilder<'a> {
    normalizer: &'a Normalizer,
    observation_year: i32,
}

impl<'a> TimelineBuilder<'a> {
    #[must_use]
    pub const fn new(normalizer: &'a Normalizer, observation_year: i32) -> Self {
        Self {
            normalizer,
            observation_year,
        }
    }

    /// Merge all sources into timelines, ordered by candidate identifier.
    ///
    /// Events keep insertion order (current, party, position, resignation,
    /// then row order). Repeated `(label, begin, end)` events of one candidate
    /// are dropped, keeping the first. A candidate whose rows all lacked a
    /// label is returned with an empty timeline.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::SchemaMismatch`] if a source lacks a required
    /// column, and [`DataError::InvalidValue`] for an unreadable candidate id
    /// or year.
    pub fn build(&self, sources: &SourceTables) -> Result<Vec<CandidateTimeline>, DataError> {
        let tables = [
            &sources.current,
            &sources.party,
            &sources.position,
            &sources.resignation,
        ];

        let mut pending: BTreeMap<String, Vec<PendingEvent>> = BTreeMap::new();
        for (table, layout) in tables.into_iter().zip(&LAYOUTS) {
            self.collect(table, layout, &mut pending)?;
        }

        let mut duplicates = 0usize;
        let timelines: Vec<CandidateTimeline> = pending
            .into_iter()
            .map(|(candidate_id, events)| {
                let (timeline, dropped) = into_timeline(candidate_id, events);
                duplicates += dropped;
                timeline
            })
            .collect();

        if duplicates > 0 {
            tracing::debug!(duplicates, "dropped repeated affiliation events");
        }
        tracing::debug!(candidates = timelines.len(), "timelines built");
        Ok(timelines)
    }

    fn collect(
        &self,
        table: &Table,
        layout: &SourceLayout,
        pending: &mut BTreeMap<String, Vec<PendingEvent>>,
    ) -> Result<(), DataError> {
        let mut required = vec![schema::CANDIDATE, layout.label];
        required.extend(layout.begin);
        required.extend(layout.end);
        required.dedup();
        table.require_columns(&required)?;

        let candidate_col = column(table, schema::CANDIDATE)?;
        let label_col = column(table, layout.label)?;
        let begin_col = layout.begin.map(|c| column(table, c)).transpose()?;
        let end_col = layout.end.map(|c| column(table, c)).transpose()?;

        let mut skipped = 0usize;
        for row in 0..table.len() {
            let candidate_id = candidate_id(table, row, candidate_col)?;
            let events = pending.entry(candidate_id).or_default();

            let Some(raw_label) = label_text(table.cell(row, label_col)) else {
                skipped += 1;
                continue;
            };

            let (begin_year, end_year) = if layout.event_type == EventType::Current {
                (None, Some(self.observation_year))
            } else {
                (
                    begin_col.map(|c| year(table, row, c)).transpose()?.flatten(),
                    end_col.map(|c| year(table, row, c)).transpose()?.flatten(),
                )
            };

            events.push(PendingEvent {
                event_type: layout.event_type,
                label: self.normalizer.normalize(&raw_label),
                raw_label,
                begin_year,
                end_year,
            });
        }

        if skipped > 0 {
            tracing::warn!(
                table = %table.name,
                skipped,
                "skipped rows with a blank organization label"
            );
        }
        Ok(())
    }
}

fn into_timeline(candidate_id: String, events: Vec<PendingEvent>) -> (CandidateTimeline, usize) {
    let mut timeline = CandidateTimeline::new(candidate_id);
    let mut seen = HashSet::new();
    let mut dropped = 0;

    for event in events {
        if !seen.insert((event.label.clone(), event.begin_year, event.end_year)) {
            dropped += 1;
            continue;
        }
        let record = u32::try_from(timeline.events.len() + 1).unwrap_or(u32::MAX);
        timeline.events.push(AffiliationEvent {
            candidate_id: timeline.candidate_id.clone(),
            record,
            event_type: event.event_type,
            raw_label: event.raw_label,
            label: event.label,
            begin_year: event.begin_year,
            end_year: event.end_year,
        });
    }
    (timeline, dropped)
}

fn column(table: &Table, name: &str) -> Result<usize, DataError> {
    table
        .column_index(name)
        .ok_or_else(|| DataError::SchemaMismatch {
            table: table.name.clone(),
            missing: vec![name.to_string()],
        })
}

fn invalid(table: &Table, row: usize, column: usize, value: &Value) -> DataError {
    DataError::InvalidValue {
        table: table.name.clone(),
        column: table.columns.get(column).cloned().unwrap_or_default(),
        row,
        value: value.to_string(),
    }
}

/// Candidate identifiers are keyed as text whatever their stored type.
fn candidate_id(table: &Table, row: usize, column: usize) -> Result<String, DataError> {
    let value = table.cell(row, column);
    let id = match value {
        Value::Text(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Null | Value::Boolean(_) => None,
        other => other.as_i64().map(|v| v.to_string()),
    };
    id.ok_or_else(|| invalid(table, row, column, value))
}

fn label_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::Text(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// A year cell: null, blank and zero mean unknown.
fn year(table: &Table, row: usize, column: usize) -> Result<Option<i32>, DataError> {
    let value = table.cell(row, column);
    match value {
        Value::Null => Ok(None),
        Value::Text(s) if s.trim().is_empty() => Ok(None),
        other => match other.as_i64() {
            Some(0) => Ok(None),
            Some(v) => i32::try_from(v)
                .map(Some)
                .map_err(|_| invalid(table, row, column, value)),
            None => Err(invalid(table, row, column, value)),
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn empty_sources() -> SourceTables {
        SourceTables {
            current: Table::new(current::TABLE, [schema::CANDIDATE, current::LABEL]),
            party: Table::new(
                party_record::TABLE,
                [
                    schema::CANDIDATE,
                    party_record::LABEL,
                    party_record::BEGIN,
                    party_record::END,
                ],
            ),
            position: Table::new(
                position_record::TABLE,
                [
                    schema::CANDIDATE,
                    position_record::LABEL,
                    position_record::BEGIN,
                    position_record::END,
                ],
            ),
            resignation: Table::new(
                resign_record::TABLE,
                [schema::CANDIDATE, resign_record::LABEL, resign_record::YEAR],
            ),
        }
    }

    fn build(sources: &SourceTables) -> Result<Vec<CandidateTimeline>, DataError> {
        let normalizer = Normalizer::default();
        TimelineBuilder::new(&normalizer, 2020).build(sources)
    }

    #[test]
    fn events_follow_source_order_and_rules() {
        let mut sources = empty_sources();
        sources
            .current
            .push_row(vec!["X".into(), "PARTIDO POLITICO B".into()]);
        sources.party.push_row(vec![
            "X".into(),
            "A".into(),
            Value::from(1995),
            Value::from(2010),
        ]);
        sources.resignation.push_row(vec![
            "X".into(),
            "A".into(),
            Value::from(2009.0),
        ]);

        let timelines = build(&sources).unwrap();
        assert_eq!(timelines.len(), 1);
        let events = &timelines[0].events;

        let summary: Vec<_> = events
            .iter()
            .map(|e| (e.record, e.event_type, e.label.as_str(), e.begin_year, e.end_year))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, EventType::Current, "B", None, Some(2020)),
                (2, EventType::Party, "A", Some(1995), Some(2010)),
                (3, EventType::Resignation, "A", Some(2009), Some(2009)),
            ]
        );
        assert_eq!(events[0].raw_label, "PARTIDO POLITICO B");
    }

    #[test]
    fn candidates_are_grouped_in_identifier_order() {
        let mut sources = empty_sources();
        sources.current.push_row(vec!["Z".into(), "A".into()]);
        sources.current.push_row(vec![Value::from(17), "B".into()]);
        sources.current.push_row(vec!["  M ".into(), "C".into()]);

        let ids: Vec<_> = build(&sources)
            .unwrap()
            .into_iter()
            .map(|t| t.candidate_id)
            .collect();
        assert_eq!(ids, vec!["17", "M", "Z"]);
    }

    #[test]
    fn zero_and_blank_years_are_unknown() {
        let mut sources = empty_sources();
        sources.current.push_row(vec!["X".into(), "A".into()]);
        sources
            .party
            .push_row(vec!["X".into(), "B".into(), Value::from(0), " ".into()]);

        let timelines = build(&sources).unwrap();
        let party = &timelines[0].events[1];
        assert_eq!((party.begin_year, party.end_year), (None, None));
    }

    #[test]
    fn non_numeric_year_is_rejected() {
        let mut sources = empty_sources();
        sources.party.push_row(vec![
            "X".into(),
            "B".into(),
            "circa 1990".into(),
            Value::Null,
        ]);

        let err = build(&sources).unwrap_err();
        assert_eq!(
            err,
            DataError::InvalidValue {
                table: party_record::TABLE.into(),
                column: party_record::BEGIN.into(),
                row: 0,
                value: "circa 1990".into(),
            }
        );
    }

    #[test]
    fn missing_column_fails_instead_of_dropping_source() {
        let mut sources = empty_sources();
        sources.position = Table::new(
            position_record::TABLE,
            [schema::CANDIDATE, position_record::LABEL],
        );

        let err = build(&sources).unwrap_err();
        assert_eq!(
            err,
            DataError::SchemaMismatch {
                table: position_record::TABLE.into(),
                missing: vec![position_record::BEGIN.into(), position_record::END.into()],
            }
        );
    }

    #[test]
    fn blank_labels_are_skipped_but_candidate_is_kept() {
        let mut sources = empty_sources();
        sources.current.push_row(vec!["X".into(), "  ".into()]);
        sources.current.push_row(vec!["Y".into(), Value::Null]);

        let timelines = build(&sources).unwrap();
        assert_eq!(timelines.len(), 2);
        assert!(timelines.iter().all(|t| t.events.is_empty()));
    }

    #[test]
    fn repeated_events_are_dropped_and_records_stay_dense() {
        let mut sources = empty_sources();
        sources.current.push_row(vec!["X".into(), "C".into()]);
        for _ in 0..2 {
            sources.party.push_row(vec![
                "X".into(),
                "ACCIÓN POLPULAR".into(),
                Value::from(2000),
                Value::from(2004),
            ]);
        }
        sources.position.push_row(vec![
            "X".into(),
            "ACCION POPULAR".into(),
            Value::from(2000),
            Value::from(2004),
        ]);
        sources.position.push_row(vec![
            "X".into(),
            "B".into(),
            Value::from(2004),
            Value::from(2008),
        ]);

        let timelines = build(&sources).unwrap();
        let records: Vec<_> = timelines[0]
            .events
            .iter()
            .map(|e| (e.record, e.label.as_str()))
            .collect();
        assert_eq!(records, vec![(1, "C"), (2, "ACCION POPULAR"), (3, "B")]);
    }
}
