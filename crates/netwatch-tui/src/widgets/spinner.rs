//! Braille spinner shown next to panels whose probe is in flight.

use netwatch_core::MetricStatus;

pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// One shared frame index for every panel.
///
/// Advanced once per panel draw while that panel is `Updating`, so the
/// animation speed follows the render rate, not wall-clock time.
#[derive(Debug, Default)]
pub struct Spinner {
    index: usize,
}

impl Spinner {
    #[cfg(test)]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Glyph to draw for a panel with `status`: the next frame when
    /// updating, a blank otherwise.
    pub fn glyph_for(&mut self, status: &MetricStatus) -> &'static str {
        if !status.is_updating() {
            return " ";
        }
        let glyph = FRAMES[self.index % FRAMES.len()];
        self.index = (self.index + 1) % FRAMES.len();
        glyph
    }
}
