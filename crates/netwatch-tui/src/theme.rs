//! Palette and semantic styling for the dashboard.

use ratatui::style::{Color, Modifier, Style};

use netwatch_core::StatusCategory;

// ── Core Palette ──────────────────────────────────────────────────────

pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const LIGHT_BLUE: Color = Color::Rgb(139, 233, 253); // #8be9fd

// ── Semantic Styles ───────────────────────────────────────────────────

/// Centered title bar at the top of the screen.
pub fn title_bar() -> Style {
    Style::default()
        .fg(SUCCESS_GREEN)
        .add_modifier(Modifier::BOLD)
}

/// `=== Title ===` at the top of each panel.
pub fn panel_title() -> Style {
    Style::default().fg(LIGHT_BLUE)
}

/// Spinner glyph next to the panel title.
pub fn spinner() -> Style {
    Style::default().fg(ELECTRIC_YELLOW)
}

/// Status tag colour: success family vs. alert family.
pub fn status(category: StatusCategory) -> Style {
    match category {
        StatusCategory::Success => Style::default().fg(SUCCESS_GREEN),
        StatusCategory::Alert => Style::default()
            .fg(ERROR_RED)
            .add_modifier(Modifier::BOLD),
    }
}

/// Raw probe output inside a panel.
pub fn panel_body() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Quadrant separators.
pub fn border() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// "Last update" line at the bottom.
pub fn timestamp() -> Style {
    Style::default().fg(NEON_CYAN)
}
