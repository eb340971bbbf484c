//! Mock transit source for testing and offline runs.
//!
//! Serves canned departures per stop, either registered in code or loaded
//! from JSON files in the provider's own response shape.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{DepartureRecord, StopId};

use super::convert::convert_departures;
use super::error::TransitError;
use super::source::DepartureSource;
use super::types::DeparturesResponse;

#[derive(Debug, Clone)]
enum MockBoard {
    Departures(Vec<DepartureRecord>),
    Failure(String),
}

/// Mock transit client serving pre-loaded departures.
///
/// Stops that were never registered fail with `StopNotFound`, the same way
/// the live API answers for unknown IDs.
#[derive(Debug, Clone, Default)]
pub struct MockTransitClient {
    boards: Arc<HashMap<StopId, MockBoard>>,
}

impl MockTransitClient {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `departures` for `stop`.
    pub fn with_departures(mut self, stop: StopId, departures: Vec<DepartureRecord>) -> Self {
        Arc::make_mut(&mut self.boards).insert(stop, MockBoard::Departures(departures));
        self
    }

    /// Make every fetch for `stop` fail.
    pub fn with_failure(mut self, stop: StopId, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.boards).insert(stop, MockBoard::Failure(message.into()));
        self
    }

    /// Load boards from a directory.
    ///
    /// Expects files named `{stop_id}.json` (e.g. `900000100003.json`)
    /// containing a departures response as returned by the API.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, TransitError> {
        let data_dir = data_dir.as_ref();
        let mut boards = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            TransitError::Unavailable(format!("failed to read mock data directory: {e}"))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                TransitError::Unavailable(format!("failed to read directory entry: {e}"))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(stop) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| StopId::parse(s).ok())
            else {
                continue;
            };

            let contents = std::fs::read_to_string(&path).map_err(|e| {
                TransitError::Unavailable(format!("failed to read {}: {e}", path.display()))
            })?;

            let response: DeparturesResponse =
                serde_json::from_str(&contents).map_err(|e| TransitError::Json {
                    message: format!("{}: {e}", path.display()),
                    body: None,
                })?;

            let departures = convert_departures(&stop, &response.into_departures());
            boards.insert(stop, MockBoard::Departures(departures));
        }

        Ok(Self {
            boards: Arc::new(boards),
        })
    }

    /// List stops with registered boards.
    pub fn available_stops(&self) -> Vec<StopId> {
        let mut stops: Vec<StopId> = self.boards.keys().cloned().collect();
        stops.sort();
        stops
    }
}

impl DepartureSource for MockTransitClient {
    async fn fetch_departures(
        &self,
        stop: &StopId,
        _lookahead_minutes: u32,
    ) -> Result<Vec<DepartureRecord>, TransitError> {
        match self.boards.get(stop) {
            Some(MockBoard::Departures(departures)) => Ok(departures.clone()),
            Some(MockBoard::Failure(message)) => Err(TransitError::Unavailable(message.clone())),
            None => Err(TransitError::StopNotFound(stop.clone())),
        }
    }
}
