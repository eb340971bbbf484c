//! The departure board pipeline.
//!
//! Per refresh: fetch each configured stop, filter and normalize its
//! departures, merge all stops chronologically, project the result into
//! table rows and swap them into the shared viewport.

mod config;
mod filter;
mod merge;
mod project;
mod refresh;

pub use config::{
    AllowList, BoardConfig, DEFAULT_LOOKAHEAD_MINS, DEFAULT_REFRESH_INTERVAL,
    DEFAULT_RENDER_INTERVAL, DisplayWindow, StopFilterConfig,
};
pub use filter::filter_departures;
pub use merge::merge_departures;
pub use project::{Punctuality, StyleTable, TableLayout, format_departure_time, project_rows};
pub use refresh::{Board, NEVER_REFRESHED, RefreshSummary, SharedViewport, board_viewport};
