// ── Metric record: status + latest raw output ──

use std::sync::Arc;

/// Lifecycle state of a metric's record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MetricStatus {
    /// No collector cycle has started yet.
    #[default]
    Initializing,
    /// A probe invocation is in flight.
    Updating,
    /// The last probe invocation produced output.
    Ok,
    /// The last probe invocation failed; `data` still holds older output.
    Error(String),
}

/// Coarse colour category for a status tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Success,
    Alert,
}

impl MetricStatus {
    /// Status tag text as shown in the panel header (without brackets).
    pub fn label(&self) -> String {
        match self {
            Self::Initializing => "Initializing...".into(),
            Self::Updating => "Updating...".into(),
            Self::Ok => "OK".into(),
            Self::Error(message) => format!("Error: {message}"),
        }
    }

    pub fn category(&self) -> StatusCategory {
        match self {
            Self::Ok | Self::Initializing => StatusCategory::Success,
            Self::Updating | Self::Error(_) => StatusCategory::Alert,
        }
    }

    pub fn is_updating(&self) -> bool {
        matches!(self, Self::Updating)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// The latest known `(status, data)` pair for one metric.
///
/// Always replaced as a whole inside the store, so a reader never sees a
/// new status paired with old data or the other way around.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricRecord {
    pub status: MetricStatus,
    /// Raw probe output, opaque to the dashboard. `None` until the first
    /// successful probe.
    pub data: Option<Arc<str>>,
}

impl MetricRecord {
    pub fn ok(data: impl Into<Arc<str>>) -> Self {
        Self {
            status: MetricStatus::Ok,
            data: Some(data.into()),
        }
    }
}
