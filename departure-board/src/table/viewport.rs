//! Scrollable table state: rows, selection cursor and scroll offset.

use std::fmt;

use ratatui::style::{Modifier, Style};

/// Strategy computing per-column widths from the available inner width.
pub type ColumnWidths = Box<dyn Fn(u16) -> Vec<u16> + Send + Sync>;

/// One table row: cell texts plus an optional style per cell.
///
/// `styles` always has the same length as `cells`; a `None` style renders
/// with the table's default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub styles: Vec<Option<Style>>,
}

impl TableRow {
    /// A row with no per-cell styling.
    pub fn new(cells: Vec<String>) -> Self {
        let styles = vec![None; cells.len()];
        Self { cells, styles }
    }

    /// Style a single cell. Out-of-range indices are ignored.
    pub fn with_style(mut self, index: usize, style: Style) -> Self {
        if let Some(slot) = self.styles.get_mut(index) {
            *slot = Some(style);
        }
        self
    }

    /// Style of a cell, if one was set.
    pub fn style(&self, index: usize) -> Option<Style> {
        self.styles.get(index).copied().flatten()
    }
}

/// A table with an arbitrary number of rows, no separators and per-cell
/// styling, viewed through a window that follows the selection cursor.
///
/// The viewport never rejects out-of-range positions; every cursor move,
/// row replacement or resize clamps the selection back into the rows and
/// scrolls so that the selected row stays on screen.
pub struct TableViewport {
    pub(super) header: Vec<String>,
    pub(super) rows: Vec<TableRow>,

    pub(super) title: Option<String>,
    pub(super) footer: Option<String>,
    pub(super) show_location: bool,

    pub(super) header_style: Style,
    pub(super) highlight_style: Option<Style>,

    pub(super) col_widths: Vec<u16>,
    pub(super) col_gap: u16,
    pub(super) pad_left: u16,

    selected_row: usize,
    top_row: usize,

    /// Inner (border-less) size from the last `resize`.
    inner_width: u16,
    inner_height: u16,

    column_widths: ColumnWidths,
}

impl TableViewport {
    /// Create an empty table with the given header and column-width strategy.
    pub fn new(header: Vec<String>, column_widths: ColumnWidths) -> Self {
        Self {
            header,
            rows: Vec::new(),
            title: None,
            footer: None,
            show_location: false,
            header_style: Style::default().add_modifier(Modifier::BOLD),
            highlight_style: None,
            col_widths: Vec::new(),
            col_gap: 1,
            pad_left: 0,
            selected_row: 0,
            top_row: 0,
            inner_width: 0,
            inner_height: 0,
            column_widths,
        }
    }

    /// Set the title drawn on the top border.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Show the `start - end of total` indicator on the top border.
    pub fn with_location(mut self, show: bool) -> Self {
        self.show_location = show;
        self
    }

    /// Set the blank columns between adjacent columns.
    pub fn with_column_gap(mut self, gap: u16) -> Self {
        self.col_gap = gap;
        self
    }

    /// Set the blank columns before the first column.
    pub fn with_left_padding(mut self, pad: u16) -> Self {
        self.pad_left = pad;
        self
    }

    /// Set the header style (bold by default).
    pub fn with_header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    /// Patch this style over the cells of the selected row.
    pub fn with_highlight(mut self, style: Style) -> Self {
        self.highlight_style = Some(style);
        self
    }

    /// Set or clear the footer centered on the bottom border.
    pub fn set_footer(&mut self, footer: Option<String>) {
        self.footer = footer;
    }

    /// Replace all rows at once.
    ///
    /// Rows are normalized to the header's column count. The cursor is not
    /// moved, only clamped against the new length.
    pub fn set_rows(&mut self, rows: Vec<TableRow>) {
        let columns = self.header.len();
        self.rows = rows
            .into_iter()
            .map(|mut row| {
                row.cells.resize(columns, String::new());
                row.styles.resize(columns, None);
                row
            })
            .collect();
        self.clamp();
    }

    /// Move the selection one row up.
    pub fn scroll_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
        self.clamp();
    }

    /// Move the selection one row down.
    pub fn scroll_down(&mut self) {
        self.selected_row = self.selected_row.saturating_add(1);
        self.clamp();
    }

    /// Adapt to a new outer size (borders included).
    ///
    /// Recomputes column widths from the inner width and re-clamps the
    /// scroll offset against the new height.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.inner_width = width.saturating_sub(2);
        self.inner_height = height.saturating_sub(2);
        self.col_widths = (self.column_widths)(self.inner_width);
        self.col_widths.resize(self.header.len(), 0);
        self.clamp();
    }

    /// Keep the selection inside the rows and on screen.
    fn clamp(&mut self) {
        if self.rows.is_empty() {
            self.selected_row = 0;
            self.top_row = 0;
            return;
        }

        self.selected_row = self.selected_row.min(self.rows.len() - 1);

        if self.selected_row < self.top_row {
            self.top_row = self.selected_row;
        }

        // One line of the inner area belongs to the header
        let margin = usize::from(self.inner_height).saturating_sub(2);
        if self.selected_row > self.top_row + margin {
            self.top_row = self.selected_row - margin;
        }
    }

    /// Index of the selected row (0 when there are no rows).
    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    /// Index of the first visible row.
    pub fn top_row(&self) -> usize {
        self.top_row
    }

    /// Number of rows that fit below the header.
    pub fn visible_rows(&self) -> usize {
        usize::from(self.inner_height).saturating_sub(1)
    }

    /// Inner height from the last resize.
    pub fn inner_height(&self) -> u16 {
        self.inner_height
    }

    /// Column widths from the last resize.
    pub fn column_widths(&self) -> &[u16] {
        &self.col_widths
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `" start - end of total "` indicator text.
    pub fn location_text(&self) -> String {
        let total = self.rows.len();
        if total == 0 {
            return " 0 - 0 of 0 ".to_string();
        }

        let start = self.top_row + 1;
        let end = (self.top_row + self.visible_rows()).min(total);
        format!(" {start} - {end} of {total} ")
    }
}

impl fmt::Debug for TableViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableViewport")
            .field("header", &self.header)
            .field("rows", &self.rows.len())
            .field("selected_row", &self.selected_row)
            .field("top_row", &self.top_row)
            .field("col_widths", &self.col_widths)
            .finish_non_exhaustive()
    }
}
