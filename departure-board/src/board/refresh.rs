//! Refresh coordinator: periodically rebuilds the board's rows.
//!
//! One cycle fetches every stop concurrently, waits for all of them, then
//! filters, merges and projects without holding any lock. Only the final
//! row swap takes the viewport lock, so a slow provider never blocks
//! scrolling or repainting.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use futures::future::join_all;
use ratatui::style::{Modifier, Style};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::DepartureRecord;
use crate::shutdown::Shutdown;
use crate::table::TableViewport;
use crate::transit::DepartureSource;

use super::config::{DisplayWindow, StopFilterConfig};
use super::filter::filter_departures;
use super::merge::merge_departures;
use super::project::{StyleTable, TableLayout, project_rows};

/// The viewport shared between the refresh task and the UI loop.
pub type SharedViewport = Arc<Mutex<TableViewport>>;

/// Footer shown until the first successful refresh.
pub const NEVER_REFRESHED: &str = " Last refresh: never ";

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Rows handed to the viewport (0 when nothing was applied).
    pub rows: usize,
    /// Stops whose fetch failed this cycle.
    pub failed_stops: usize,
    /// Whether the viewport received a new snapshot.
    pub applied: bool,
}

/// Build the empty board table for a layout.
pub fn board_viewport(layout: TableLayout, styles: &StyleTable) -> TableViewport {
    let mut viewport = TableViewport::new(layout.headers(), layout.column_widths())
        .with_title(" Station ")
        .with_location(true)
        .with_column_gap(3)
        .with_left_padding(2)
        .with_header_style(styles.header)
        .with_highlight(Style::new().add_modifier(Modifier::REVERSED));
    viewport.set_footer(Some(NEVER_REFRESHED.to_string()));
    viewport
}

/// A departure board: where the data comes from, how it is filtered, and
/// the viewport it ends up in.
pub struct Board<S> {
    source: S,
    stops: Vec<StopFilterConfig>,
    layout: TableLayout,
    styles: StyleTable,
    window: DisplayWindow,
    viewport: SharedViewport,
}

impl<S: DepartureSource> Board<S> {
    /// Create a board with an empty viewport.
    pub fn new(source: S, stops: Vec<StopFilterConfig>, styles: StyleTable) -> Self {
        let layout = TableLayout::for_stop_count(stops.len());
        let viewport = Arc::new(Mutex::new(board_viewport(layout, &styles)));

        Self {
            source,
            stops,
            layout,
            styles,
            window: DisplayWindow::default(),
            viewport,
        }
    }

    /// Override the display window.
    pub fn with_window(mut self, window: DisplayWindow) -> Self {
        self.window = window;
        self
    }

    /// Handle to the shared viewport.
    pub fn viewport(&self) -> SharedViewport {
        Arc::clone(&self.viewport)
    }

    /// Column set chosen from the number of stops.
    pub fn layout(&self) -> TableLayout {
        self.layout
    }

    /// Run one refresh cycle as of `now`.
    ///
    /// Failed stops contribute nothing. If every stop failed the current
    /// snapshot is kept as it is, footer included.
    pub async fn refresh(&self, now: DateTime<Local>) -> RefreshSummary {
        let results = join_all(self.stops.iter().map(|stop| self.fetch_stop(stop, now))).await;

        let failed_stops = results.iter().filter(|r| r.is_none()).count();
        if !self.stops.is_empty() && failed_stops == self.stops.len() {
            warn!(stops = failed_stops, "all stops failed, keeping previous departures");
            return RefreshSummary {
                rows: 0,
                failed_stops,
                applied: false,
            };
        }

        let merged = merge_departures(results.into_iter().flatten().collect());
        let rows = project_rows(&merged, self.layout, &self.styles);
        let count = rows.len();

        {
            let mut viewport = self.viewport.lock().await;
            viewport.set_rows(rows);
            viewport.set_footer(Some(format!(" Last refresh: {} ", now.format("%H:%M:%S"))));
        }

        debug!(rows = count, failed_stops, "board refreshed");
        RefreshSummary {
            rows: count,
            failed_stops,
            applied: true,
        }
    }

    /// Fetch and filter one stop. `None` means the fetch failed.
    async fn fetch_stop(
        &self,
        stop: &StopFilterConfig,
        now: DateTime<Local>,
    ) -> Option<Vec<DepartureRecord>> {
        match self
            .source
            .fetch_departures(&stop.stop, stop.lookahead_minutes)
            .await
        {
            Ok(records) => {
                let fetched = records.len();
                let kept = filter_departures(records, stop, &self.window, now);
                debug!(stop = %stop.stop, fetched, kept = kept.len(), "filtered departures");
                Some(kept)
            }
            Err(e) => {
                warn!(stop = %stop.stop, "failed to fetch departures: {e}");
                None
            }
        }
    }
}

impl<S: DepartureSource + 'static> Board<S> {
    /// Refresh now and then once per `interval` until `shutdown` fires.
    pub fn spawn(self, interval: Duration, shutdown: Shutdown) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.wait() => break,
                    _ = ticker.tick() => {
                        let summary = tokio::select! {
                            _ = shutdown.wait() => break,
                            summary = self.refresh(Local::now()) => summary,
                        };
                        if summary.failed_stops > 0 {
                            debug!(?summary, "refresh finished with failures");
                        }
                    }
                }
            }

            info!("refresh task stopped");
        })
    }
}
