//! Stop identifier type.

use std::fmt;

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A provider-specific stop identifier (e.g. `900000100003`).
///
/// Stop IDs are opaque strings to us, but they end up in URL paths, so a
/// `StopId` is guaranteed to be non-empty and free of whitespace.
///
/// # Examples
///
/// ```
/// use departure_board::domain::StopId;
///
/// let alex = StopId::parse(" 900000100003 ").unwrap();
/// assert_eq!(alex.as_str(), "900000100003");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("9000 0010").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop ID, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(InvalidStopId {
                reason: "must not contain whitespace",
            });
        }

        Ok(StopId(trimmed.to_string()))
    }

    /// Returns the stop ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
