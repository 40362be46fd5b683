//! Clipping draw surface over a ratatui [`Buffer`].
//!
//! All dashboard drawing goes through here. Coordinates are absolute
//! buffer cells; anything outside the clip rectangle is dropped silently,
//! so a shrinking terminal never turns into a panic or an error.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

pub struct Surface<'a> {
    buf: &'a mut Buffer,
    clip: Rect,
}

impl<'a> Surface<'a> {
    /// A surface covering the whole buffer.
    pub fn new(buf: &'a mut Buffer) -> Self {
        let clip = buf.area;
        Self { buf, clip }
    }

    /// `(rows, cols)` of the clip area.
    pub fn size(&self) -> (u16, u16) {
        (self.clip.height, self.clip.width)
    }

    /// Narrow the clip area to `rect` (intersected with the current one).
    pub fn clipped(&mut self, rect: Rect) -> Surface<'_> {
        Surface {
            clip: self.clip.intersection(rect),
            buf: &mut *self.buf,
        }
    }

    fn contains(&self, row: u16, col: u16) -> bool {
        !self.clip.is_empty()
            && row >= self.clip.y
            && row < self.clip.bottom()
            && col >= self.clip.x
            && col < self.clip.right()
    }

    /// Write `text` starting at `(row, col)`, cut at the clip edge.
    ///
    /// Returns the column just past the last written cell (`col` when
    /// nothing was written).
    pub fn write_text(&mut self, row: u16, col: u16, text: &str, style: Style) -> u16 {
        if !self.contains(row, col) {
            return col;
        }
        let max_width = usize::from(self.clip.right() - col);
        let (end, _) = self.buf.set_stringn(col, row, text, max_width, style);
        end
    }

    /// Put a single glyph at `(row, col)`. Returns whether it was drawn.
    pub fn write_glyph(&mut self, row: u16, col: u16, glyph: &str, style: Style) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        match self.buf.cell_mut((col, row)) {
            Some(cell) => {
                cell.set_symbol(glyph).set_style(style);
                true
            }
            None => false,
        }
    }
}

/// Read one buffer row back as a string (test helper).
#[cfg(test)]
pub fn row_text(buf: &Buffer, row: u16) -> String {
    let area = buf.area;
    (area.x..area.right())
        .map(|col| buf.cell((col, row)).map_or(" ", |c| c.symbol()))
        .collect()
}
