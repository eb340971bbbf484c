//! Row projector: departures to table rows.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::DepartureRecord;
use crate::table::{ColumnWidths, TableRow};

/// Whether a departure runs early, on time or late.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuality {
    Early,
    OnTime,
    Late,
}

impl Punctuality {
    /// Classify by delay sign (positive is late).
    pub fn from_delay(delay_secs: i64) -> Self {
        match delay_secs {
            d if d < 0 => Punctuality::Early,
            0 => Punctuality::OnTime,
            _ => Punctuality::Late,
        }
    }
}

/// Palette used by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTable {
    pub early: Style,
    pub on_time: Style,
    pub late: Style,
    pub header: Style,
}

impl StyleTable {
    pub fn for_punctuality(&self, punctuality: Punctuality) -> Style {
        match punctuality {
            Punctuality::Early => self.early,
            Punctuality::OnTime => self.on_time,
            Punctuality::Late => self.late,
        }
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            early: Style::new().fg(Color::Yellow),
            on_time: Style::new().fg(Color::LightGreen),
            late: Style::new().fg(Color::Red),
            header: Style::new().add_modifier(Modifier::BOLD),
        }
    }
}

/// Column set of the board, which depends on how many stops are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    /// `Line | Destination | Time`
    SingleStop,
    /// `Line | Station | Destination | Time`
    MultiStop,
}

impl TableLayout {
    pub fn for_stop_count(stops: usize) -> Self {
        if stops > 1 {
            TableLayout::MultiStop
        } else {
            TableLayout::SingleStop
        }
    }

    pub fn headers(self) -> Vec<String> {
        let headers: &[&str] = match self {
            TableLayout::SingleStop => &["Line", "Destination", "Time"],
            TableLayout::MultiStop => &["Line", "Station", "Destination", "Time"],
        };
        headers.iter().map(|h| h.to_string()).collect()
    }

    /// Width strategy: the destination column takes the slack and shrinks
    /// to 10 cells before anything else gives way.
    pub fn column_widths(self) -> ColumnWidths {
        match self {
            TableLayout::SingleStop => {
                Box::new(|width: u16| vec![4, width.saturating_sub(26).max(10), 10])
            }
            TableLayout::MultiStop => {
                Box::new(|width: u16| vec![4, 6, width.saturating_sub(32).max(10), 10])
            }
        }
    }
}

/// `HH:MM`, plus the delay in whole minutes when there is one.
///
/// Minutes truncate toward zero and always carry a sign, so 90 s late is
/// `(+1)` and 125 s early is `(-2)`.
pub fn format_departure_time(record: &DepartureRecord) -> String {
    let time = record.scheduled.format("%H:%M");
    if record.delay_secs == 0 {
        time.to_string()
    } else {
        format!("{time} ({:+})", record.delay_secs / 60)
    }
}

/// Build one table row per departure.
///
/// Only the time cell is styled, by punctuality.
pub fn project_rows(
    records: &[DepartureRecord],
    layout: TableLayout,
    styles: &StyleTable,
) -> Vec<TableRow> {
    records
        .iter()
        .map(|record| {
            let mut cells = Vec::with_capacity(4);
            cells.push(record.line_name.clone());
            if layout == TableLayout::MultiStop {
                cells.push(record.stop_name.clone());
            }
            cells.push(record.direction.clone());
            cells.push(format_departure_time(record));

            let time_column = cells.len() - 1;
            let style = styles.for_punctuality(Punctuality::from_delay(record.delay_secs));
            TableRow::new(cells).with_style(time_column, style)
        })
        .collect()
}
