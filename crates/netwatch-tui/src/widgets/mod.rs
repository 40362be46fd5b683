pub mod panel;
pub mod spinner;
pub mod status_indicator;
