//! Transit client error types.

use crate::domain::StopId;

/// Errors from fetching departures or searching stations.
#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        /// Leading part of the offending body, kept for debugging.
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The provider does not know the stop
    #[error("stop not found: {0}")]
    StopNotFound(StopId),

    /// Rate limited by the API
    #[error("rate limited by transit API")]
    RateLimited,

    /// The source could not serve the request at all
    #[error("source unavailable: {0}")]
    Unavailable(String),
}
