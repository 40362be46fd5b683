// ── Probe collaborator and metric → probe bindings ──

mod command;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use indexmap::IndexMap;

use crate::error::ProbeError;
use crate::model::Metric;

pub use command::CommandProbe;

/// A diagnostic operation whose raw text output fills one panel.
///
/// The dashboard never parses the returned text. Implementations may take
/// seconds to resolve; the returned future is dropped if the collector is
/// cancelled mid-flight, so it must be cancel-safe.
pub trait Probe: Send + Sync {
    /// Short description for logs (e.g. the command line).
    fn describe(&self) -> String;

    fn invoke(&self) -> BoxFuture<'_, Result<String, ProbeError>>;
}

/// A probe plus the cadence its collector runs it at.
#[derive(Clone)]
pub struct ProbeBinding {
    pub probe: Arc<dyn Probe>,
    pub interval: Duration,
}

impl fmt::Debug for ProbeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeBinding")
            .field("probe", &self.probe.describe())
            .field("interval", &self.interval)
            .finish()
    }
}

/// Ordered mapping from metric to the probe that feeds it.
///
/// At most one binding per metric, so at most one collector ever writes a
/// given record. Metrics without a binding are placeholders: their record
/// stays `Initializing`.
#[derive(Debug, Clone, Default)]
pub struct ProbeRegistry {
    bindings: IndexMap<Metric, ProbeBinding>,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `probe` to `metric`, replacing (and returning) any earlier binding.
    pub fn bind(
        &mut self,
        metric: Metric,
        probe: Arc<dyn Probe>,
        interval: Duration,
    ) -> Option<ProbeBinding> {
        self.bindings
            .insert(metric, ProbeBinding { probe, interval })
    }

    pub fn get(&self, metric: Metric) -> Option<&ProbeBinding> {
        self.bindings.get(&metric)
    }

    pub fn is_bound(&self, metric: Metric) -> bool {
        self.bindings.contains_key(&metric)
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.bindings.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl IntoIterator for ProbeRegistry {
    type Item = (Metric, ProbeBinding);
    type IntoIter = indexmap::map::IntoIter<Metric, ProbeBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebinding_replaces_the_previous_probe() {
        let mut registry = ProbeRegistry::new();
        let first = registry.bind(
            Metric::Latency,
            Arc::new(CommandProbe::new("ping", ["-c", "3", "8.8.8.8"])),
            Duration::from_secs(5),
        );
        assert!(first.is_none());

        let replaced = registry.bind(
            Metric::Latency,
            Arc::new(CommandProbe::new("ping", ["-c", "1", "1.1.1.1"])),
            Duration::from_secs(10),
        );
        assert_eq!(
            replaced.map(|b| b.probe.describe()).as_deref(),
            Some("ping -c 3 8.8.8.8")
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(Metric::Latency).map(|b| b.interval),
            Some(Duration::from_secs(10))
        );
    }

    #[test]
    fn keeps_binding_order() {
        let mut registry = ProbeRegistry::new();
        for metric in [Metric::Routing, Metric::Bandwidth, Metric::Latency] {
            registry.bind(
                metric,
                Arc::new(CommandProbe::new("true", Vec::<String>::new())),
                Duration::from_secs(1),
            );
        }
        let order: Vec<Metric> = registry.metrics().collect();
        assert_eq!(order, vec![Metric::Routing, Metric::Bandwidth, Metric::Latency]);
        assert!(!registry.is_bound(Metric::Stability));
    }
}
