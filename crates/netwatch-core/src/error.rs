// ── Probe error types ──
//
// Failures a collector can observe while running its probe. These never
// leave the collector: they are rendered into the metric's record as
// `MetricStatus::Error` and the next cycle proceeds as scheduled.

use thiserror::Error;

/// Why a probe invocation produced no output.
///
/// A non-zero exit status is *not* an error: the captured output is still
/// displayed as data.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe has no command configured")]
    EmptyCommand,

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` timed out after {timeout_secs}s")]
    Timeout { program: String, timeout_secs: u64 },
}

impl ProbeError {
    /// Whether the probe binary could not be found on `PATH`.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
