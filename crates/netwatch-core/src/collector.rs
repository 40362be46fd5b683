// ── Background collectors ──
//
// One long-running task per bound metric: mark the record as updating,
// run the probe, publish the result, sleep, repeat. Every await point
// races the cancellation token so shutdown never waits out an interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::model::{Metric, MetricRecord, MetricStatus};
use crate::probe::{Probe, ProbeBinding, ProbeRegistry};
use crate::store::MetricStore;

/// Result of a single collector cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Succeeded,
    Failed,
}

/// Periodically runs one probe and publishes its output to one record.
pub struct Collector {
    metric: Metric,
    probe: Arc<dyn Probe>,
    interval: Duration,
    store: Arc<MetricStore>,
}

impl Collector {
    pub fn new(metric: Metric, binding: ProbeBinding, store: Arc<MetricStore>) -> Self {
        Self {
            metric,
            probe: binding.probe,
            interval: binding.interval,
            store,
        }
    }

    /// Run one update cycle without sleeping.
    ///
    /// `data` is left untouched while the probe runs and when it fails, so
    /// the panel keeps showing the last known output under the new status.
    pub async fn run_cycle(&self) -> CycleOutcome {
        self.store
            .update(self.metric, |record| record.status = MetricStatus::Updating);

        match self.probe.invoke().await {
            Ok(output) => {
                self.store.set(self.metric, MetricRecord::ok(output));
                CycleOutcome::Succeeded
            }
            Err(e) => {
                warn!(metric = %self.metric, error = %e, "probe failed");
                let message = e.to_string();
                self.store
                    .update(self.metric, |record| record.status = MetricStatus::Error(message));
                CycleOutcome::Failed
            }
        }
    }

    /// Loop until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        info!(
            metric = %self.metric,
            probe = %self.probe.describe(),
            interval_secs = self.interval.as_secs_f64(),
            "collector started"
        );

        let mut consecutive_failures: u32 = 0;

        while !cancel.is_cancelled() {
            debug!(metric = %self.metric, "collector cycle starting");

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                outcome = self.run_cycle() => outcome,
            };

            match outcome {
                CycleOutcome::Succeeded => {
                    if consecutive_failures > 0 {
                        info!(
                            metric = %self.metric,
                            after_failures = consecutive_failures,
                            "probe recovered"
                        );
                    }
                    consecutive_failures = 0;
                }
                CycleOutcome::Failed => {
                    consecutive_failures = consecutive_failures.saturating_add(1);
                    debug!(
                        metric = %self.metric,
                        consecutive_failures,
                        "collector cycle failed"
                    );
                }
            }

            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(metric = %self.metric, "collector stopped");
    }
}

/// Owns the lifetimes of all collector tasks.
///
/// Every collector runs on a child of the supplied token, so cancelling
/// either the parent or this set stops them all.
pub struct CollectorSet {
    cancel: CancellationToken,
    handles: Vec<(Metric, JoinHandle<()>)>,
}

impl CollectorSet {
    /// Spawn one collector per binding in `registry`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        store: &Arc<MetricStore>,
        registry: ProbeRegistry,
        parent: &CancellationToken,
    ) -> Self {
        let cancel = parent.child_token();
        let handles = registry
            .into_iter()
            .map(|(metric, binding)| {
                if !store.contains(metric) {
                    warn!(%metric, "collector bound to a metric the store does not track");
                }
                let collector = Collector::new(metric, binding, Arc::clone(store));
                let handle = tokio::spawn(collector.run(cancel.clone()));
                (metric, handle)
            })
            .collect::<Vec<_>>();

        info!(count = handles.len(), "collectors spawned");
        Self { cancel, handles }
    }

    /// Number of running collectors.
    pub fn count(&self) -> usize {
        self.handles.len()
    }

    /// Signal every collector to stop and wait for all of them to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for (metric, handle) in self.handles {
            if let Err(e) = handle.await {
                warn!(%metric, error = %e, "collector task ended abnormally");
            }
        }
        info!("all collectors joined");
    }
}
