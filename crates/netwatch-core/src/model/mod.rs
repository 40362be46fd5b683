// ── Domain model ──

pub mod metric;
pub mod record;

pub use metric::Metric;
pub use record::{MetricRecord, MetricStatus, StatusCategory};
