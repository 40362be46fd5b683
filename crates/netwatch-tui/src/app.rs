//! Dashboard: renders the four panels at a fixed cadence until cancelled.
//!
//! Collectors write to the [`MetricStore`] on their own schedule; the
//! dashboard only reads snapshots, so a slow probe never stalls a frame.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use color_eyre::eyre::Result;
use ratatui::Frame;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use netwatch_core::{CollectorSet, MetricStore};

use crate::layout;
use crate::surface::Surface;
use crate::theme;
use crate::tui::FrameSink;
use crate::widgets::panel::PanelRenderer;

pub const TITLE: &str = "Network Performance Monitor";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct Dashboard {
    store: Arc<MetricStore>,
    renderer: PanelRenderer,
    frame_interval: Duration,
    frames: u64,
}

impl Dashboard {
    pub fn new(store: Arc<MetricStore>, frame_interval: Duration) -> Self {
        Self {
            store,
            renderer: PanelRenderer::new(),
            frame_interval,
            frames: 0,
        }
    }

    #[cfg(test)]
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Render until `cancel` fires or drawing fails, then stop every
    /// collector and wait for them before returning.
    pub async fn run(
        &mut self,
        sink: &mut impl FrameSink,
        collectors: CollectorSet,
        cancel: CancellationToken,
    ) -> Result<()> {
        info!(
            collectors = collectors.count(),
            frame_ms = self.frame_interval.as_millis(),
            "dashboard started"
        );

        let result = self.frame_loop(sink, &cancel).await;
        if let Err(ref e) = result {
            error!(error = %e, "render loop failed");
        }

        cancel.cancel();
        collectors.shutdown().await;
        info!(frames = self.frames, "dashboard stopped");
        result
    }

    async fn frame_loop(
        &mut self,
        sink: &mut impl FrameSink,
        cancel: &CancellationToken,
    ) -> Result<()> {
        while !cancel.is_cancelled() {
            let started = Instant::now();
            sink.draw_frame(&mut |frame: &mut Frame<'_>| self.render(frame, Local::now()))?;
            self.frames += 1;

            // An interval too large to represent means "draw once, then
            // wait for cancellation".
            let Some(deadline) = started.checked_add(self.frame_interval) else {
                cancel.cancelled().await;
                break;
            };
            if deadline <= Instant::now() {
                debug!(elapsed = ?started.elapsed(), "frame overran its interval");
            }
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = tokio::time::sleep_until(deadline) => {}
            }
        }
        Ok(())
    }

    /// Paint one complete frame as of `now`.
    pub fn render(&mut self, frame: &mut Frame<'_>, now: DateTime<Local>) {
        let mut surface = Surface::new(frame.buffer_mut());
        let (rows, cols) = surface.size();
        let layout = layout::compute(rows, cols);

        // Title goes on top of the separator, so borders first.
        layout::draw_borders(&mut surface, &layout.borders);

        let title_width = u16::try_from(TITLE.chars().count()).unwrap_or(u16::MAX);
        let title_col = cols.saturating_sub(title_width) / 2;
        surface.write_text(0, title_col, TITLE, theme::title_bar());

        for (metric, rect) in &layout.panels {
            let record = self.store.get(*metric);
            self.renderer
                .draw(&mut surface, metric.title(), &record, *rect);
        }

        let stamp = format!("Last update: {}", now.format(TIMESTAMP_FORMAT));
        surface.write_text(rows.saturating_sub(1), 1, &stamp, theme::timestamp());
    }
}
