//! Departure records as the board sees them.

use chrono::{DateTime, Local};

use super::StopId;

/// Remark code the provider attaches to services that carry bicycles.
pub const BICYCLE_CONVEYANCE_CODE: &str = "FB";

/// A free-text remark attached to a departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remark {
    /// Remark category (`hint`, `warning`, `status`, ...).
    pub kind: String,
    /// Short machine code, e.g. `FB` for bicycle conveyance.
    pub code: String,
    /// Human-readable text.
    pub text: String,
}

/// One scheduled departure from a stop.
///
/// Records are rebuilt from scratch on every refresh and never patched
/// in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureRecord {
    /// Stop the departure was fetched for.
    pub stop_id: StopId,

    /// Display name of the stop (or its configured label).
    pub stop_name: String,

    /// Departure time in the local timezone.
    pub scheduled: DateTime<Local>,

    /// Line name, e.g. `U2` or `M48`.
    pub line_name: String,

    /// Direction / destination text.
    pub direction: String,

    /// Delay in seconds; positive is late, negative is early.
    pub delay_secs: i64,

    /// Transport mode tag, e.g. `subway` or `bus`.
    pub product: String,

    /// Remarks attached by the provider.
    pub remarks: Vec<Remark>,
}

impl DepartureRecord {
    /// Whether any remark carries the given code (codes compared trimmed).
    pub fn has_remark_code(&self, code: &str) -> bool {
        self.remarks.iter().any(|r| r.code.trim() == code)
    }

    /// Whether this service allows bicycle conveyance.
    pub fn allows_bicycles(&self) -> bool {
        self.has_remark_code(BICYCLE_CONVEYANCE_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(remarks: Vec<Remark>) -> DepartureRecord {
        DepartureRecord {
            stop_id: StopId::parse("900000100003").unwrap(),
            stop_name: "S+U Alexanderplatz".into(),
            scheduled: Local.with_ymd_and_hms(2026, 1, 3, 14, 5, 0).unwrap(),
            line_name: "U2".into(),
            direction: "Pankow".into(),
            delay_secs: 0,
            product: "subway".into(),
            remarks,
        }
    }

    fn remark(code: &str) -> Remark {
        Remark {
            kind: "hint".into(),
            code: code.into(),
            text: String::new(),
        }
    }

    #[test]
    fn bicycle_marker_detected() {
        assert!(record(vec![remark("FB")]).allows_bicycles());
    }

    #[test]
    fn bicycle_marker_trimmed() {
        assert!(record(vec![remark(" FB ")]).allows_bicycles());
    }

    #[test]
    fn no_marker() {
        assert!(!record(vec![]).allows_bicycles());
        assert!(!record(vec![remark("bf"), remark("FBX")]).allows_bicycles());
    }
}
