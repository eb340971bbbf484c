//! Departure source backed by the transport.rest API.
//!
//! This module provides an HTTP client for the public transport.rest
//! endpoints (BVG by default), which serve realtime departures per stop.
//!
//! Key characteristics of the API:
//! - Stop IDs are provider-specific strings (`900000100003`)
//! - Timestamps are ISO 8601 with a UTC offset
//! - `when` is null for cancelled trips, `delay` is null when unknown

mod client;
mod convert;
mod error;
mod mock;
mod source;
mod types;

pub use client::{DEFAULT_BASE_URL, TransitClient, TransitConfig};
pub use convert::{ConversionError, StationMatch};
pub use error::TransitError;
pub use mock::MockTransitClient;
pub use source::DepartureSource;
pub use types::{DepartureDto, DeparturesResponse, LineDto, LocationDto, RemarkDto, StopDto};
