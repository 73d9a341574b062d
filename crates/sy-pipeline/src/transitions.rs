//! Per-candidate transition extraction.
//!
//! Each timeline is sorted chronologically, consecutive events for the same
//! organization are collapsed into one span, and every remaining change of
//! organization becomes a dated [`Transition`]. A candidate that never moves
//! yields a single self-loop so it still appears in the edge table.

use rayon::prelude::*;
use sy_core::{AffiliationEvent, CandidateTimeline, DataError, Transition};

/// Turns candidate timelines into transitions.
#[derive(Debug, Clone, Copy)]
pub struct TransitionExtractor {
    observation_year: i32,
}

impl TransitionExtractor {
    #[must_use]
    pub const fn new(observation_year: i32) -> Self {
        Self { observation_year }
    }

    /// Transitions of one candidate, in chronological order.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::EmptyTimeline`] if the timeline has no events.
    pub fn extract(&self, timeline: &CandidateTimeline) -> Result<Vec<Transition>, DataError> {
        if timeline.events.is_empty() {
            return Err(DataError::EmptyTimeline {
                candidate_id: timeline.candidate_id.clone(),
            });
        }

        let mut events: Vec<&AffiliationEvent> = timeline.events.iter().collect();
        events.sort_by_key(|e| chronological_key(e));

        let same_as_next: Vec<bool> = (0..events.len())
            .map(|i| {
                events
                    .get(i + 1)
                    .is_some_and(|next| next.label == events[i].label)
            })
            .collect();

        // Pass 1: an event starts where the previous one ended, when known.
        let raw_years: Vec<Option<i32>> = (0..events.len())
            .map(|i| {
                i.checked_sub(1)
                    .and_then(|prev| events[prev].end_year)
                    .or(events[i].begin_year)
            })
            .collect();

        // Pass 2: the event closing a same-organization run keeps the run's start.
        let years: Vec<i32> = (0..events.len())
            .map(|i| {
                let resolved = match i.checked_sub(1) {
                    Some(prev) if same_as_next[prev] => raw_years[prev],
                    _ => raw_years[i],
                };
                resolved.unwrap_or(self.observation_year)
            })
            .collect();

        let survivors: Vec<usize> = (0..events.len()).filter(|&i| !same_as_next[i]).collect();
        let id = &timeline.candidate_id;

        if let [only] = survivors.as_slice() {
            let label = &events[*only].label;
            return Ok(vec![Transition::new(id, label, label, years[*only])]);
        }

        Ok(survivors
            .windows(2)
            .map(|pair| {
                let (from, to) = (pair[0], pair[1]);
                Transition::new(id, &events[from].label, &events[to].label, years[to])
            })
            .collect())
    }

    /// Transitions of every candidate, concatenated in timeline order.
    ///
    /// With `parallel` set, candidates are processed on the rayon pool; the
    /// output order does not depend on it.
    ///
    /// # Errors
    ///
    /// Returns the first [`DataError::EmptyTimeline`] encountered.
    pub fn extract_all(
        &self,
        timelines: &[CandidateTimeline],
        parallel: bool,
    ) -> Result<Vec<Transition>, DataError> {
        let per_candidate: Vec<Vec<Transition>> = if parallel {
            timelines
                .par_iter()
                .map(|timeline| self.extract(timeline))
                .collect::<Result<_, _>>()?
        } else {
            timelines
                .iter()
                .map(|timeline| self.extract(timeline))
                .collect::<Result<_, _>>()?
        };
        Ok(per_candidate.into_iter().flatten().collect())
    }
}

/// Begin year (unknown last), end year (unknown last), then insertion order.
fn chronological_key(event: &AffiliationEvent) -> (bool, Option<i32>, bool, Option<i32>, u32) {
    (
        event.begin_year.is_none(),
        event.begin_year,
        event.end_year.is_none(),
        event.end_year,
        event.record,
    )
}
