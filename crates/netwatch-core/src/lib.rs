//! Concurrent data layer behind the netwatch dashboard.
//!
//! - **[`MetricStore`]** — one atomically-replaced [`MetricRecord`] per
//!   [`Metric`], shared between writers and the renderer as
//!   `Arc<MetricStore>`. Each record sits behind its own `watch` channel, so
//!   readers never observe a half-updated `(status, data)` pair.
//!
//! - **[`Probe`]** — the diagnostic collaborator. [`CommandProbe`] runs an
//!   external command (`speedtest-cli`, `ping`, ...) and returns its captured
//!   output as opaque text.
//!
//! - **[`ProbeRegistry`]** — pluggable metric → probe mapping. Unbound
//!   metrics are placeholders and stay `Initializing`.
//!
//! - **[`Collector`] / [`CollectorSet`]** — one tokio task per bound metric,
//!   running `Updating → probe → Ok | Error → sleep` until its
//!   [`CancellationToken`](tokio_util::sync::CancellationToken) fires. Both
//!   the probe and the sleep race the token, so shutdown is prompt no matter
//!   how long the interval.

pub mod collector;
pub mod error;
pub mod model;
pub mod probe;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use collector::{Collector, CollectorSet, CycleOutcome};
pub use error::ProbeError;
pub use model::{Metric, MetricRecord, MetricStatus, StatusCategory};
pub use probe::{CommandProbe, Probe, ProbeBinding, ProbeRegistry};
pub use store::MetricStore;
