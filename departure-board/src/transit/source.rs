//! The seam between the board and wherever departures come from.

use std::future::Future;

use crate::domain::{DepartureRecord, StopId};

use super::error::TransitError;

/// Trait for providing departures for a stop.
///
/// This abstraction allows the refresh pipeline to be tested with mock data.
/// The returned future must be `Send` so fetches for several stops can run on
/// the multi-threaded runtime.
pub trait DepartureSource: Send + Sync {
    /// Fetch departures leaving `stop` within the next `lookahead_minutes`.
    fn fetch_departures(
        &self,
        stop: &StopId,
        lookahead_minutes: u32,
    ) -> impl Future<Output = Result<Vec<DepartureRecord>, TransitError>> + Send;
}
