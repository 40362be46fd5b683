//! Metric panel: header line plus the raw probe output, clipped to its rect.

use ratatui::layout::Rect;

use netwatch_core::{MetricRecord, MetricStatus};

use crate::surface::Surface;
use crate::theme;
use crate::widgets::spinner::Spinner;
use crate::widgets::status_indicator::status_span;

/// Draws panels and owns the spinner they share.
#[derive(Debug, Default)]
pub struct PanelRenderer {
    spinner: Spinner,
}

impl PanelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw one panel into `rect`.
    ///
    /// Layout inside the rect, one column of padding on either side:
    ///
    /// ```text
    ///  === Latency === ⠹[Updating...]
    ///  PING 8.8.8.8 (8.8.8.8) 56(84) bytes of data.
    ///  64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=11.2 ms
    /// ```
    ///
    /// At most `height - 2` body rows are used, each cut to `width - 2`
    /// columns. A failed probe's message comes first, wrapped to the
    /// panel width; the last good output fills the remaining rows.
    pub fn draw(&mut self, surface: &mut Surface<'_>, title: &str, record: &MetricRecord, rect: Rect) {
        // Advance before any clipping so the animation rate does not depend
        // on whether the header fits.
        let glyph = self.spinner.glyph_for(&record.status);

        let inner = Rect {
            x: rect.x.saturating_add(1),
            y: rect.y,
            width: rect.width.saturating_sub(2),
            height: rect.height,
        };
        let mut panel = surface.clipped(inner);

        let header = format!("=== {title} === ");
        let col = panel.write_text(rect.y, inner.x, &header, theme::panel_title());
        let col = panel.write_text(rect.y, col, glyph, theme::spinner());
        let tag = status_span(&record.status);
        panel.write_text(rect.y, col, &tag.content, tag.style);

        let error_lines = match &record.status {
            MetricStatus::Error(message) => wrap_chars(message, usize::from(inner.width)),
            _ => Vec::new(),
        };
        let error_style = theme::status(record.status.category());
        let body = error_lines
            .iter()
            .map(|line| (line.as_str(), error_style))
            .chain(
                record
                    .data
                    .as_deref()
                    .unwrap_or_default()
                    .lines()
                    .map(|line| (line, theme::panel_body())),
            );

        let visible = usize::from(rect.height.saturating_sub(2));
        let rows = rect.y.saturating_add(1)..rect.bottom();
        for (row, (line, style)) in rows.zip(body.take(visible)) {
            panel.write_text(row, inner.x, line, style);
        }
    }
}

/// Split `text` into chunks of at most `width` characters.
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
