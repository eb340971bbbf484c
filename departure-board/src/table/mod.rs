//! Generic scrollable table widget.
//!
//! Knows nothing about departures: it maps an arbitrary list of string rows
//! onto a bordered character grid, with per-cell styles, a selection cursor
//! and a viewport that follows it.
//!
//! Column widths are negotiated by a caller-supplied strategy that receives
//! the inner width on every resize. Columns that no longer fit are dropped
//! from the right rather than squeezed, so the strategy decides which
//! columns give up space first.

mod render;
mod viewport;

pub use render::{ColumnSlot, column_layout};
pub use viewport::{ColumnWidths, TableRow, TableViewport};
