//! Drawing a `TableViewport` into a ratatui buffer.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use super::viewport::TableViewport;

/// Horizontal placement of one drawable column inside the inner area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSlot {
    /// Column index into the header / row cells.
    pub index: usize,
    /// Offset from the inner area's left edge.
    pub x: u16,
    pub width: u16,
}

/// Place columns left to right.
///
/// Column `i` starts at `pad_left + sum(widths[..i]) + i * gap`. Columns with
/// zero width, or that would run past `inner_width`, are left out; the
/// others keep their positions.
pub fn column_layout(widths: &[u16], gap: u16, pad_left: u16, inner_width: u16) -> Vec<ColumnSlot> {
    let mut slots = Vec::with_capacity(widths.len());
    let mut x = u32::from(pad_left);

    for (index, &width) in widths.iter().enumerate() {
        let start = x;
        x += u32::from(width) + u32::from(gap);

        if width == 0 || start + u32::from(width) > u32::from(inner_width) {
            continue;
        }

        slots.push(ColumnSlot {
            index,
            // start + width <= inner_width, so start fits in a u16
            x: start as u16,
            width,
        });
    }

    slots
}

impl Widget for &TableViewport {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::bordered();
        if let Some(title) = &self.title {
            block = block.title(title.as_str());
        }
        let inner = block.inner(area);
        block.render(area, buf);

        if self.show_location {
            render_location(&self.location_text(), area, buf);
        }
        if let Some(footer) = &self.footer {
            render_footer(footer, area, buf);
        }

        if inner.is_empty() {
            return;
        }

        let columns = column_layout(&self.col_widths, self.col_gap, self.pad_left, inner.width);

        for slot in &columns {
            if let Some(text) = self.header.get(slot.index) {
                buf.set_stringn(
                    inner.x + slot.x,
                    inner.y,
                    text,
                    usize::from(slot.width),
                    self.header_style,
                );
            }
        }

        let capacity = self
            .visible_rows()
            .min(usize::from(inner.height.saturating_sub(1)));
        let top = self.top_row();
        let end = (top + capacity).min(self.rows.len());

        for (line, row_num) in (top..end).enumerate() {
            let row = &self.rows[row_num];
            // line < capacity <= inner.height - 1
            let y = inner.y + 1 + line as u16;

            let highlight = self
                .highlight_style
                .filter(|_| row_num == self.selected_row());

            for slot in &columns {
                let Some(text) = row.cells.get(slot.index) else {
                    continue;
                };

                let mut style = row.style(slot.index).unwrap_or_default();
                if let Some(highlight) = highlight {
                    style = style.patch(highlight);
                }

                buf.set_stringn(inner.x + slot.x, y, text, usize::from(slot.width), style);
            }
        }
    }
}

/// Location indicator, right-aligned on the top border.
fn render_location(text: &str, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }

    let width = text.chars().count() as u16;
    let x = area.right().saturating_sub(width + 2).max(area.x);
    buf.set_stringn(x, area.y, text, usize::from(area.right() - x), Style::default());
}

/// Footer, centered on the bottom border.
fn render_footer(text: &str, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }

    let width = text.chars().count() as u16;
    let x = (area.x + area.width / 2).saturating_sub(width / 2).max(area.x);
    buf.set_stringn(
        x,
        area.bottom() - 1,
        text,
        usize::from(area.right() - x),
        Style::default(),
    );
}
