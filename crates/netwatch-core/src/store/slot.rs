// ── Single-record reactive slot ──
//
// One `watch` channel per metric. The sender's internal RwLock is the
// only synchronization: writers swap the whole record under the write
// lock, readers clone it under the read lock.

use tokio::sync::watch;

use crate::model::MetricRecord;

pub(crate) struct RecordSlot {
    tx: watch::Sender<MetricRecord>,
}

impl RecordSlot {
    pub(crate) fn new() -> Self {
        let (tx, _) = watch::channel(MetricRecord::default());
        Self { tx }
    }

    /// Clone the current record.
    pub(crate) fn snapshot(&self) -> MetricRecord {
        self.tx.borrow().clone()
    }

    /// Replace the record wholesale.
    pub(crate) fn replace(&self, record: MetricRecord) {
        // `send_replace` updates unconditionally, even with zero receivers.
        self.tx.send_replace(record);
    }

    /// Read-modify-write under the slot's write lock.
    pub(crate) fn modify(&self, f: impl FnOnce(&mut MetricRecord)) {
        self.tx.send_modify(f);
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<MetricRecord> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetricStatus;

    #[test]
    fn starts_initializing() {
        let slot = RecordSlot::new();
        assert_eq!(slot.snapshot(), MetricRecord::default());
    }

    #[test]
    fn modify_keeps_untouched_fields() {
        let slot = RecordSlot::new();
        slot.replace(MetricRecord::ok("first"));
        slot.modify(|r| r.status = MetricStatus::Updating);

        let snap = slot.snapshot();
        assert_eq!(snap.status, MetricStatus::Updating);
        assert_eq!(snap.data.as_deref(), Some("first"));
    }

    #[test]
    fn subscribers_see_replacements() {
        let slot = RecordSlot::new();
        let rx = slot.subscribe();
        slot.replace(MetricRecord::ok("fresh"));
        assert!(rx.has_changed().unwrap_or(false));
        assert_eq!(rx.borrow().data.as_deref(), Some("fresh"));
    }
}
