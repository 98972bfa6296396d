//! Staged-write bookkeeping for the open transaction.

use std::collections::HashMap;

/// A single write recorded by the open transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedWrite {
    /// Insert or update the key on commit.
    Put(i64),
    /// Remove the key on commit. Reads in the same transaction miss it.
    Delete,
}

/// Pending writes of the open transaction.
///
/// The layer exists only between `begin_transaction` and the matching
/// `commit_transaction` or `rollback_transaction`. Only keys staged here are
/// shadowed; every other read falls through to the committed map.
#[derive(Debug, Default)]
pub struct TransactionLayer {
    writes: HashMap<String, StagedWrite>,
}

impl TransactionLayer {
    /// Creates an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty layer with reserved capacity.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            writes: HashMap::with_capacity(capacity),
        }
    }

    /// Stages an upsert, replacing any earlier staged write for the key.
    pub(crate) fn stage_put(&mut self, key: String, value: i64) {
        self.writes.insert(key, StagedWrite::Put(value));
    }

    /// Stages a tombstone, replacing any earlier staged write for the key.
    pub(crate) fn stage_delete(&mut self, key: String) {
        self.writes.insert(key, StagedWrite::Delete);
    }

    /// Returns the staged write for a key, if any.
    #[must_use]
    pub fn staged(&self, key: &str) -> Option<StagedWrite> {
        self.writes.get(key).copied()
    }

    /// Returns the number of staged writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Consumes the layer, yielding its staged writes for the commit apply.
    pub(crate) fn into_writes(self) -> HashMap<String, StagedWrite> {
        self.writes
    }
}
