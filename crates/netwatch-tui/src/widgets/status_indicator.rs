//! Status tag: `[OK]` / `[Error: …]` with category colour.

use ratatui::text::Span;

use netwatch_core::MetricStatus;

use crate::theme;

/// Returns the bracketed status tag styled by its success/alert category.
pub fn status_span(status: &MetricStatus) -> Span<'static> {
    Span::styled(
        format!("[{}]", status.label()),
        theme::status(status.category()),
    )
}
