//! Store statistics.
//!
//! Operation counters for monitoring store usage.

use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for a store.
///
/// All counters are atomic and can be read while operations are in
/// progress. They tick only on operations that succeed.
#[derive(Debug, Default)]
pub struct StoreStats {
    /// Successful read operations.
    reads: AtomicU64,
    /// Staged put operations.
    writes: AtomicU64,
    /// Staged delete operations.
    deletes: AtomicU64,
    /// Transactions opened.
    transactions_begun: AtomicU64,
    /// Transactions committed.
    transactions_committed: AtomicU64,
    /// Transactions rolled back.
    transactions_rolled_back: AtomicU64,
}

impl StoreStats {
    pub(crate) fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self) {
        self.transactions_begun.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self) {
        self.transactions_rolled_back.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time copy of all counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            transactions_begun: self.transactions_begun.load(Ordering::Relaxed),
            transactions_committed: self.transactions_committed.load(Ordering::Relaxed),
            transactions_rolled_back: self.transactions_rolled_back.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of [`StoreStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Successful read operations.
    pub reads: u64,
    /// Staged put operations.
    pub writes: u64,
    /// Staged delete operations.
    pub deletes: u64,
    /// Transactions opened.
    pub transactions_begun: u64,
    /// Transactions committed.
    pub transactions_committed: u64,
    /// Transactions rolled back.
    pub transactions_rolled_back: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let stats = StoreStats::default();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn counters_accumulate() {
        let stats = StoreStats::default();
        stats.record_read();
        stats.record_read();
        stats.record_write();
        stats.record_begin();
        stats.record_commit();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.reads, 2);
        assert_eq!(snapshot.writes, 1);
        assert_eq!(snapshot.deletes, 0);
        assert_eq!(snapshot.transactions_begun, 1);
        assert_eq!(snapshot.transactions_committed, 1);
        assert_eq!(snapshot.transactions_rolled_back, 0);
    }
}
