// ── Per-metric record store ──
//
// Shared between the collectors (one writer per metric) and the renderer
// (read-only, once per frame per panel). Injected as `Arc<MetricStore>`
// rather than living in a global.

mod slot;

use std::collections::HashMap;

use tokio::sync::watch;
use tracing::warn;

use crate::model::{Metric, MetricRecord};
use slot::RecordSlot;

/// Thread-safe store holding the latest [`MetricRecord`] of each metric.
///
/// The set of metrics is fixed at construction, so lookups never take a
/// map-level lock. Each record lives behind its own slot: a reader and the
/// writer of the same metric contend only for the duration of one clone or
/// one swap, and different metrics never contend at all.
pub struct MetricStore {
    slots: HashMap<Metric, RecordSlot>,
}

impl MetricStore {
    /// Create a store with one `Initializing` record per metric.
    pub fn new(metrics: impl IntoIterator<Item = Metric>) -> Self {
        let slots = metrics
            .into_iter()
            .map(|metric| (metric, RecordSlot::new()))
            .collect();
        Self { slots }
    }

    /// Snapshot a metric's record. Never blocks on a probe and never fails:
    /// an unregistered metric reads as a default `Initializing` record.
    pub fn get(&self, metric: Metric) -> MetricRecord {
        self.slots
            .get(&metric)
            .map_or_else(MetricRecord::default, RecordSlot::snapshot)
    }

    /// Atomically replace a metric's record.
    pub fn set(&self, metric: Metric, record: MetricRecord) {
        match self.slots.get(&metric) {
            Some(slot) => slot.replace(record),
            None => warn!(%metric, "set on unregistered metric ignored"),
        }
    }

    /// Atomically modify a metric's record in place.
    ///
    /// Used for status-only transitions, where `data` must survive.
    pub fn update(&self, metric: Metric, f: impl FnOnce(&mut MetricRecord)) {
        match self.slots.get(&metric) {
            Some(slot) => slot.modify(f),
            None => warn!(%metric, "update on unregistered metric ignored"),
        }
    }

    /// Subscribe to changes of one metric's record.
    pub fn subscribe(&self, metric: Metric) -> Option<watch::Receiver<MetricRecord>> {
        self.slots.get(&metric).map(RecordSlot::subscribe)
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.slots.contains_key(&metric)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for MetricStore {
    fn default() -> Self {
        Self::new(Metric::ALL)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::model::MetricStatus;

    #[test]
    fn default_store_registers_every_metric() {
        let store = MetricStore::default();
        assert_eq!(store.len(), Metric::ALL.len());
        for metric in Metric::ALL {
            assert_eq!(store.get(metric), MetricRecord::default());
        }
    }

    #[test]
    fn unregistered_metric_reads_as_initializing() {
        let store = MetricStore::new([Metric::Latency]);
        store.set(Metric::Bandwidth, MetricRecord::ok("ignored"));
        assert!(!store.contains(Metric::Bandwidth));
        assert_eq!(store.get(Metric::Bandwidth), MetricRecord::default());
        assert!(store.subscribe(Metric::Bandwidth).is_none());
    }

    #[test]
    fn records_are_independent_per_metric() {
        let store = MetricStore::default();
        store.set(Metric::Latency, MetricRecord::ok("64 bytes from 8.8.8.8"));
        assert_eq!(store.get(Metric::Bandwidth), MetricRecord::default());
        assert_eq!(
            store.get(Metric::Latency).data.as_deref(),
            Some("64 bytes from 8.8.8.8")
        );
    }

    #[test]
    fn concurrent_readers_never_see_mixed_records() {
        // Writer alternates between two self-consistent records; every
        // snapshot must be exactly one of them (or the initial record).
        let store = Arc::new(MetricStore::default());
        let done = Arc::new(AtomicBool::new(false));

        let a = MetricRecord::ok("alpha");
        let b = MetricRecord {
            status: MetricStatus::Error("beta".into()),
            data: Some("beta".into()),
        };

        let writer = {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            let (a, b) = (a.clone(), b.clone());
            std::thread::spawn(move || {
                for i in 0..20_000 {
                    let next = if i % 2 == 0 { a.clone() } else { b.clone() };
                    store.set(Metric::Bandwidth, next);
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        while !done.load(Ordering::SeqCst) {
            let snap = store.get(Metric::Bandwidth);
            assert!(
                snap == a || snap == b || snap == MetricRecord::default(),
                "torn record: {snap:?}"
            );
        }
        assert!(writer.join().is_ok());
    }
}
