//! Per-stop filter settings and board-wide timing.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Local};

use crate::domain::StopId;

/// Default look-ahead requested from the source (minutes).
pub const DEFAULT_LOOKAHEAD_MINS: u32 = 60;

/// Default interval between refreshes.
pub const DEFAULT_REFRESH_INTERVAL: StdDuration = StdDuration::from_secs(60);

/// Default interval between repaints.
pub const DEFAULT_RENDER_INTERVAL: StdDuration = StdDuration::from_secs(1);

/// Case-insensitive inclusion filter for one record field.
///
/// Always holds at least one trimmed, upper-cased token; "no restriction"
/// is represented by the absence of an `AllowList`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList(Vec<String>);

impl AllowList {
    /// Parse a comma-separated list.
    ///
    /// Returns `None` when the list has no non-blank token, which means
    /// the field is not filtered.
    ///
    /// ```
    /// use departure_board::board::AllowList;
    ///
    /// let modes = AllowList::parse("subway, Tram").unwrap();
    /// assert_eq!(modes.tokens(), ["SUBWAY", "TRAM"]);
    /// assert!(modes.allows("tram"));
    ///
    /// assert!(AllowList::parse(" , ").is_none());
    /// ```
    pub fn parse(spec: &str) -> Option<Self> {
        let tokens: Vec<String> = spec
            .split(',')
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            None
        } else {
            Some(AllowList(tokens))
        }
    }

    /// Whether `value` equals one of the tokens, ignoring case.
    pub fn allows(&self, value: &str) -> bool {
        let value = value.trim().to_uppercase();
        self.0.iter().any(|t| *t == value)
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }
}

/// Filter configuration for one monitored stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopFilterConfig {
    pub stop: StopId,

    /// Label shown in the station column when several stops are configured.
    pub label: Option<String>,

    /// How far ahead to ask the source for departures.
    pub lookahead_minutes: u32,

    /// Allowed transport modes (product tags).
    pub modes: Option<AllowList>,

    /// Allowed destinations.
    pub destinations: Option<AllowList>,

    /// Allowed line names.
    pub lines: Option<AllowList>,

    /// Only show services that carry bicycles.
    pub bicycle_only: bool,
}

impl StopFilterConfig {
    /// Unfiltered config for `stop` with the default look-ahead.
    pub fn new(stop: StopId) -> Self {
        Self {
            stop,
            label: None,
            lookahead_minutes: DEFAULT_LOOKAHEAD_MINS,
            modes: None,
            destinations: None,
            lines: None,
            bicycle_only: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = (!label.trim().is_empty()).then(|| label.trim().to_string());
        self
    }

    pub fn with_lookahead(mut self, minutes: u32) -> Self {
        self.lookahead_minutes = minutes;
        self
    }

    pub fn with_modes(mut self, spec: &str) -> Self {
        self.modes = AllowList::parse(spec);
        self
    }

    pub fn with_destinations(mut self, spec: &str) -> Self {
        self.destinations = AllowList::parse(spec);
        self
    }

    pub fn with_lines(mut self, spec: &str) -> Self {
        self.lines = AllowList::parse(spec);
        self
    }

    pub fn with_bicycle_only(mut self, bicycle_only: bool) -> Self {
        self.bicycle_only = bicycle_only;
        self
    }
}

/// Fixed range around "now" in which departures are shown, independent of
/// the look-ahead requested from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    /// How far into the past departures stay visible.
    pub before: Duration,
    /// How far into the future departures are shown.
    pub after: Duration,
}

impl DisplayWindow {
    /// Inclusive `(from, until)` bounds around `now`.
    pub fn bounds(&self, now: DateTime<Local>) -> (DateTime<Local>, DateTime<Local>) {
        (now - self.before, now + self.after)
    }

    /// Whether `time` falls inside the window around `now`.
    pub fn contains(&self, now: DateTime<Local>, time: DateTime<Local>) -> bool {
        let (from, until) = self.bounds(now);
        from <= time && time <= until
    }
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self {
            before: Duration::minutes(2),
            after: Duration::hours(1),
        }
    }
}

/// Everything the board needs after flags and files have been validated.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub stops: Vec<StopFilterConfig>,
    pub refresh_interval: StdDuration,
    pub render_interval: StdDuration,
}

impl BoardConfig {
    pub fn new(stops: Vec<StopFilterConfig>) -> Self {
        Self {
            stops,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            render_interval: DEFAULT_RENDER_INTERVAL,
        }
    }

    pub fn with_refresh_interval(mut self, interval: StdDuration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Whether the station column is shown.
    pub fn is_multi_stop(&self) -> bool {
        self.stops.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stop() -> StopId {
        StopId::parse("900000100003").unwrap()
    }

    #[test]
    fn allow_list_normalizes_tokens() {
        let list = AllowList::parse(" bus,  Tram ,SUBWAY").unwrap();
        assert_eq!(list.tokens(), ["BUS", "TRAM", "SUBWAY"]);
    }

    #[test]
    fn allow_list_drops_blank_tokens() {
        let list = AllowList::parse("U2,, ,U5").unwrap();
        assert_eq!(list.tokens(), ["U2", "U5"]);
        assert!(!list.allows(""));
    }

    #[test]
    fn empty_allow_list_is_absent() {
        assert!(AllowList::parse("").is_none());
        assert!(AllowList::parse("   ").is_none());
        assert!(AllowList::parse(",,").is_none());
    }

    #[test]
    fn allow_list_matching_ignores_case() {
        let list = AllowList::parse("S+U Pankow").unwrap();
        assert!(list.allows("s+u pankow"));
        assert!(list.allows("S+U PANKOW "));
        assert!(!list.allows("Pankow"));
    }

    #[test]
    fn stop_config_defaults() {
        let config = StopFilterConfig::new(stop());
        assert_eq!(config.lookahead_minutes, 60);
        assert!(config.label.is_none());
        assert!(config.modes.is_none());
        assert!(config.destinations.is_none());
        assert!(config.lines.is_none());
        assert!(!config.bicycle_only);
    }

    #[test]
    fn stop_config_builder() {
        let config = StopFilterConfig::new(stop())
            .with_label(" Alex ")
            .with_lookahead(30)
            .with_modes("subway")
            .with_destinations("")
            .with_lines("U2,U5")
            .with_bicycle_only(true);

        assert_eq!(config.label.as_deref(), Some("Alex"));
        assert_eq!(config.lookahead_minutes, 30);
        assert_eq!(config.modes, AllowList::parse("SUBWAY"));
        assert!(config.destinations.is_none());
        assert_eq!(config.lines.unwrap().tokens().len(), 2);
        assert!(config.bicycle_only);
    }

    #[test]
    fn blank_label_is_none() {
        let config = StopFilterConfig::new(stop()).with_label("  ");
        assert!(config.label.is_none());
    }

    #[test]
    fn display_window_bounds_inclusive() {
        let now = Local.with_ymd_and_hms(2026, 1, 3, 12, 0, 0).unwrap();
        let window = DisplayWindow::default();

        let (from, until) = window.bounds(now);
        assert_eq!(from, now - Duration::minutes(2));
        assert_eq!(until, now + Duration::minutes(60));

        assert!(window.contains(now, from));
        assert!(window.contains(now, until));
        assert!(!window.contains(now, from - Duration::seconds(1)));
        assert!(!window.contains(now, until + Duration::seconds(1)));
    }

    #[test]
    fn board_config_defaults() {
        let config = BoardConfig::new(vec![StopFilterConfig::new(stop())]);
        assert_eq!(config.refresh_interval, StdDuration::from_secs(60));
        assert_eq!(config.render_interval, StdDuration::from_secs(1));
        assert!(!config.is_multi_stop());

        let second = StopFilterConfig::new(StopId::parse("900000051353").unwrap());
        let config = BoardConfig::new(vec![StopFilterConfig::new(stop()), second])
            .with_refresh_interval(StdDuration::from_secs(30));
        assert!(config.is_multi_stop());
        assert_eq!(config.refresh_interval, StdDuration::from_secs(30));
    }
}
