//! Merge & rank: one chronological list out of several stops.

use crate::domain::DepartureRecord;

/// Concatenate per-stop results and order them by departure time.
///
/// The sort is stable, so departures at the same minute keep the order of
/// the configured stops (and of the source within a stop).
pub fn merge_departures(per_stop: Vec<Vec<DepartureRecord>>) -> Vec<DepartureRecord> {
    let mut merged: Vec<DepartureRecord> = per_stop.into_iter().flatten().collect();
    merged.sort_by_key(|r| r.scheduled);
    merged
}
