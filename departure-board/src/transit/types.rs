//! transport.rest API response DTOs.
//!
//! These map directly to the provider's JSON. Almost everything is an
//! `Option` because the provider omits or nulls fields freely (cancelled
//! trips have no `when`, punctual ones often have `delay: null`).

use serde::Deserialize;

/// Response from `GET /stops/{id}/departures`.
///
/// Older API generations return a bare array, newer ones wrap it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeparturesResponse {
    Bare(Vec<DepartureDto>),
    Wrapped { departures: Vec<DepartureDto> },
}

impl DeparturesResponse {
    /// The departures regardless of envelope.
    pub fn into_departures(self) -> Vec<DepartureDto> {
        match self {
            DeparturesResponse::Bare(departures) => departures,
            DeparturesResponse::Wrapped { departures } => departures,
        }
    }
}

/// A single departure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureDto {
    pub trip_id: Option<String>,

    /// Stop the departure leaves from.
    pub stop: Option<StopDto>,

    /// Realtime departure (ISO 8601 with offset). Null when cancelled.
    pub when: Option<String>,

    /// Planned departure (ISO 8601 with offset).
    pub planned_when: Option<String>,

    /// Direction / destination text.
    pub direction: Option<String>,

    pub line: Option<LineDto>,

    pub remarks: Option<Vec<RemarkDto>>,

    /// Delay in seconds.
    pub delay: Option<i64>,

    pub platform: Option<String>,
}

/// Stop as embedded in a departure.
#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Line information.
#[derive(Debug, Clone, Deserialize)]
pub struct LineDto {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Product tag, e.g. `suburban`, `subway`, `tram`, `bus`.
    pub product: Option<String>,
    pub mode: Option<String>,
}

/// Remark attached to a departure.
#[derive(Debug, Clone, Deserialize)]
pub struct RemarkDto {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<String>,
    pub text: Option<String>,
}

/// Result of `GET /locations`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationDto {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
}
