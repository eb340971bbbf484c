//! transport.rest HTTP client.
//!
//! Provides async methods for querying departures and searching stations.
//! Limits concurrent requests and converts responses to domain types.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{DepartureRecord, StopId};

use super::convert::{StationMatch, convert_departures, convert_locations};
use super::error::TransitError;
use super::source::DepartureSource;
use super::types::{DeparturesResponse, LocationDto};

/// Default base URL for the BVG transport.rest API.
pub const DEFAULT_BASE_URL: &str = "https://v6.bvg.transport.rest";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// How much of an unparseable body to keep in the error.
const ERROR_BODY_CHARS: usize = 500;

/// Configuration for the transit client.
#[derive(Debug, Clone)]
pub struct TransitConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransitConfig {
    /// Set a custom base URL (for testing or other providers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }
}

/// transport.rest API client.
///
/// Uses a semaphore to limit concurrent requests so that a board with many
/// stops doesn't trip the provider's rate limit.
#[derive(Debug, Clone)]
pub struct TransitClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl TransitClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TransitConfig) -> Result<Self, TransitError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("departure-board/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Get upcoming departures for a stop.
    ///
    /// # Arguments
    ///
    /// * `stop` - Provider stop ID
    /// * `duration_mins` - How many minutes ahead to return departures for
    pub async fn get_departures(
        &self,
        stop: &StopId,
        duration_mins: u32,
    ) -> Result<Vec<DepartureRecord>, TransitError> {
        let url = format!("{}/stops/{}/departures", self.base_url, stop.as_str());

        let response: DeparturesResponse = self
            .get_json(&url, &[("duration", duration_mins.to_string())])
            .await
            .map_err(|e| match e {
                TransitError::Api { status: 404, .. } => TransitError::StopNotFound(stop.clone()),
                e => e,
            })?;

        let records = convert_departures(stop, &response.into_departures());
        debug!(stop = %stop, count = records.len(), "fetched departures");
        Ok(records)
    }

    /// Search stations by name.
    pub async fn search_stations(&self, query: &str) -> Result<Vec<StationMatch>, TransitError> {
        let url = format!("{}/locations", self.base_url);

        let locations: Vec<LocationDto> = self
            .get_json(
                &url,
                &[
                    ("query", query.to_string()),
                    ("poi", "false".to_string()),
                    ("addresses", "false".to_string()),
                ],
            )
            .await?;

        Ok(convert_locations(&locations))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, TransitError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TransitError::Unavailable("semaphore closed".to_string()))?;

        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransitError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TransitError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(ERROR_BODY_CHARS).collect()),
        })
    }
}

impl DepartureSource for TransitClient {
    async fn fetch_departures(
        &self,
        stop: &StopId,
        lookahead_minutes: u32,
    ) -> Result<Vec<DepartureRecord>, TransitError> {
        self.get_departures(stop, lookahead_minutes).await
    }
}
