//! Quadrant layout: panel rectangles and separators from the terminal size.
//!
//! ```text
//!        Network Performance Monitor
//!   Bandwidth        │ Latency
//!                    │
//!  ──────────────────┼──────────────────  <- mid row
//!   Stability        │ Routing
//!                    │
//!   Last update: ... │
//! ```
//!
//! Recomputed every frame, so a resize simply takes effect on the next one.

use std::ops::Range;

use ratatui::layout::Rect;
use ratatui::symbols::line;

use netwatch_core::Metric;

use crate::surface::Surface;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Fixed metric placement. Protocol has no slot.
pub const GRID: [(Quadrant, Metric); 4] = [
    (Quadrant::TopLeft, Metric::Bandwidth),
    (Quadrant::TopRight, Metric::Latency),
    (Quadrant::BottomLeft, Metric::Stability),
    (Quadrant::BottomRight, Metric::Routing),
];

/// One separator segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Border {
    Horizontal { row: u16, cols: Range<u16> },
    Vertical { col: u16, rows: Range<u16> },
    Junction { row: u16, col: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayout {
    pub borders: Vec<Border>,
    pub panels: Vec<(Metric, Rect)>,
}

#[cfg(test)]
impl DashboardLayout {
    pub fn panel(&self, metric: Metric) -> Option<Rect> {
        self.panels
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, rect)| *rect)
    }
}

/// Split a `height × width` terminal at its midpoint row and column.
///
/// Integer division puts the odd row/column into the bottom/right half.
/// Row 0 (title) and the last row (timestamp) are kept out of the panels,
/// as are the separators. Every size saturates at zero, so tiny terminals
/// produce empty rectangles rather than overlapping ones.
pub fn compute(height: u16, width: u16) -> DashboardLayout {
    let mid_row = height / 2;
    let mid_col = width / 2;

    let mut borders = Vec::with_capacity(3);
    if height > 0 && width > 0 {
        borders.push(Border::Horizontal {
            row: mid_row,
            cols: 0..width,
        });
        borders.push(Border::Vertical {
            col: mid_col,
            rows: 0..height,
        });
        borders.push(Border::Junction {
            row: mid_row,
            col: mid_col,
        });
    }

    let top_height = mid_row.saturating_sub(1);
    let bottom_height = height.saturating_sub(mid_row).saturating_sub(2);
    let left_width = mid_col;
    let right_width = width.saturating_sub(mid_col).saturating_sub(1);
    let right_x = mid_col.saturating_add(1);
    let bottom_y = mid_row.saturating_add(1);

    let panels = GRID
        .iter()
        .map(|&(quadrant, metric)| {
            let rect = match quadrant {
                Quadrant::TopLeft => Rect::new(0, 1, left_width, top_height),
                Quadrant::TopRight => Rect::new(right_x, 1, right_width, top_height),
                Quadrant::BottomLeft => Rect::new(0, bottom_y, left_width, bottom_height),
                Quadrant::BottomRight => Rect::new(right_x, bottom_y, right_width, bottom_height),
            };
            (metric, rect)
        })
        .collect();

    DashboardLayout { borders, panels }
}

/// Draw separator lines and the centre junction.
pub fn draw_borders(surface: &mut Surface<'_>, borders: &[Border]) {
    let style = theme::border();
    for border in borders {
        match border {
            Border::Horizontal { row, cols } => {
                for col in cols.clone() {
                    surface.write_glyph(*row, col, line::HORIZONTAL, style);
                }
            }
            Border::Vertical { col, rows } => {
                for row in rows.clone() {
                    surface.write_glyph(row, *col, line::VERTICAL, style);
                }
            }
            Border::Junction { row, col } => {
                surface.write_glyph(*row, *col, line::CROSS, style);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::buffer::Buffer;

    use super::*;
    use crate::surface::row_text;

    #[test]
    fn standard_terminal_quadrants() {
        let layout = compute(24, 80);
        assert_eq!(layout.panel(Metric::Bandwidth), Some(Rect::new(0, 1, 40, 11)));
        assert_eq!(layout.panel(Metric::Latency), Some(Rect::new(41, 1, 39, 11)));
        assert_eq!(layout.panel(Metric::Stability), Some(Rect::new(0, 13, 40, 10)));
        assert_eq!(layout.panel(Metric::Routing), Some(Rect::new(41, 13, 39, 10)));
        assert_eq!(layout.panel(Metric::Protocol), None);
    }

    #[test]
    fn odd_remainder_goes_to_bottom_and_right() {
        let layout = compute(25, 81);
        let top = layout.panel(Metric::Bandwidth).unwrap();
        let bottom = layout.panel(Metric::Routing).unwrap();
        // Quadrants: 12 rows / 40 cols above-left of the split, 13 / 41 below-right.
        assert_eq!((top.height, top.width), (11, 40));
        assert_eq!(bottom.x, 41);
        assert_eq!(bottom.width, 40);
        assert_eq!(bottom.height, 11);
    }

    #[test]
    fn panels_are_disjoint_and_in_bounds_for_all_sizes() {
        for height in 4..=60u16 {
            for width in 4..=60u16 {
                let layout = compute(height, width);
                let rects: Vec<Rect> = layout.panels.iter().map(|(_, r)| *r).collect();
                for (i, a) in rects.iter().enumerate() {
                    assert!(a.right() <= width && a.bottom() <= height, "{a:?} in {height}x{width}");
                    assert!(!a.contains((width / 2, a.y).into()) || a.width == 0);
                    for b in &rects[i + 1..] {
                        assert!(
                            a.intersection(*b).is_empty(),
                            "{a:?} overlaps {b:?} in {height}x{width}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn degenerate_sizes_produce_empty_panels() {
        for (height, width) in [(0, 0), (0, 10), (10, 0), (1, 1), (2, 3), (3, 2)] {
            let layout = compute(height, width);
            for (_, rect) in &layout.panels {
                assert!(rect.right() <= width.max(rect.x));
                assert!(rect.is_empty() || (rect.bottom() <= height && rect.right() <= width));
            }
        }
        assert!(compute(0, 0).borders.is_empty());
    }

    #[test]
    fn borders_cross_at_the_midpoint() {
        let layout = compute(6, 7);
        let mut buf = Buffer::empty(Rect::new(0, 0, 7, 6));
        draw_borders(&mut Surface::new(&mut buf), &layout.borders);

        assert_eq!(row_text(&buf, 0), "   │   ");
        assert_eq!(row_text(&buf, 3), "───┼───");
        assert_eq!(row_text(&buf, 5), "   │   ");
    }
}
