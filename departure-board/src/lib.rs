//! Terminal departure board.
//!
//! Polls a public transport API for upcoming departures at one or more
//! stops, filters and merges them, and shows them as a scrollable,
//! color-coded table that refreshes in the background.

pub mod board;
pub mod config;
pub mod domain;
pub mod logging;
pub mod shutdown;
pub mod table;
pub mod transit;
pub mod tui;
