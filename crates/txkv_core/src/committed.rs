//! Committed key-value state.

use crate::transaction::{StagedWrite, TransactionLayer};
use std::collections::HashMap;

/// The mapping from key to value that reflects all past commits.
///
/// With no transaction open this is the complete and only source of truth;
/// it never holds uncommitted data. The only mutation path is
/// [`CommittedStore::apply`], which lands a whole transaction at once.
#[derive(Debug, Default)]
pub struct CommittedStore {
    entries: HashMap<String, i64>,
}

impl CommittedStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with reserved capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the committed value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<i64> {
        self.entries.get(key).copied()
    }

    /// Checks whether a key has a committed value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of committed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether the store holds no committed entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all committed keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Applies every staged write from a finished transaction.
    ///
    /// A staged put inserts or overwrites; a staged delete removes the key,
    /// harmlessly if it was never present.
    pub(crate) fn apply(&mut self, layer: TransactionLayer) {
        for (key, write) in layer.into_writes() {
            match write {
                StagedWrite::Put(value) => {
                    self.entries.insert(key, value);
                }
                StagedWrite::Delete => {
                    self.entries.remove(&key);
                }
            }
        }
    }
}
