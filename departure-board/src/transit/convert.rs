//! Conversion from transport.rest DTOs to domain types.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::domain::{DepartureRecord, Remark, StopId};

use super::types::{DepartureDto, LocationDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Failed to parse a timestamp
    #[error("invalid time: {0}")]
    InvalidTime(String),
}

/// A station found by name search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationMatch {
    pub id: StopId,
    pub name: String,
}

/// Convert the departures of one stop, skipping entries that can't be shown.
pub fn convert_departures(stop: &StopId, departures: &[DepartureDto]) -> Vec<DepartureRecord> {
    let mut records = Vec::with_capacity(departures.len());

    for dto in departures {
        match convert_departure(stop, dto) {
            Ok(record) => records.push(record),
            Err(e) => {
                debug!(
                    stop = %stop,
                    trip = dto.trip_id.as_deref().unwrap_or("?"),
                    "skipping departure: {e}"
                );
            }
        }
    }

    records
}

/// Convert a single departure.
///
/// Uses the realtime `when` and falls back to `plannedWhen`; a departure with
/// neither has nothing to place on the board.
pub fn convert_departure(
    stop: &StopId,
    dto: &DepartureDto,
) -> Result<DepartureRecord, ConversionError> {
    let raw_time = dto
        .when
        .as_deref()
        .or(dto.planned_when.as_deref())
        .ok_or(ConversionError::MissingField("when"))?;

    let scheduled = parse_timestamp(raw_time)?;

    let line = dto.line.as_ref();
    let stop_name = dto
        .stop
        .as_ref()
        .and_then(|s| s.name.clone())
        .unwrap_or_else(|| stop.to_string());

    let remarks = dto
        .remarks
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|r| Remark {
            kind: r.kind.clone().unwrap_or_default(),
            code: r.code.clone().unwrap_or_default(),
            text: r.text.clone().unwrap_or_default(),
        })
        .collect();

    Ok(DepartureRecord {
        stop_id: stop.clone(),
        stop_name,
        scheduled,
        line_name: line.and_then(|l| l.name.clone()).unwrap_or_default(),
        direction: dto.direction.clone().unwrap_or_default(),
        delay_secs: dto.delay.unwrap_or(0),
        product: line.and_then(|l| l.product.clone()).unwrap_or_default(),
        remarks,
    })
}

/// Convert location search results, keeping only stops and stations.
pub fn convert_locations(locations: &[LocationDto]) -> Vec<StationMatch> {
    locations
        .iter()
        .filter(|l| matches!(l.kind.as_deref(), None | Some("stop") | Some("station")))
        .filter_map(|l| {
            let id = StopId::parse(l.id.as_deref()?).ok()?;
            Some(StationMatch {
                id,
                name: l.name.clone().unwrap_or_default(),
            })
        })
        .collect()
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Local>, ConversionError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Local))
        .map_err(|_| ConversionError::InvalidTime(raw.to_string()))
}
