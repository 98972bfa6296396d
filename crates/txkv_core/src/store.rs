//! Store facade and transaction state machine.

use crate::committed::CommittedStore;
use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::stats::{StatsSnapshot, StoreStats};
use crate::transaction::{StagedWrite, TransactionLayer};
use parking_lot::RwLock;
use tracing::{debug, trace};

/// The main store handle.
///
/// `Store` is the single dispatcher for every operation: it consults the
/// transaction state and routes reads and writes accordingly.
///
/// - With no transaction open, reads resolve against the committed map and
///   every mutation is rejected with [`StoreError::NoActiveTransaction`].
///   Mutation is transactional by construction.
/// - With a transaction open, writes land in the staging layer, and reads
///   check the staging layer first before falling through to the committed
///   map.
///
/// Only one transaction exists at a time; a second `begin_transaction` is
/// rejected with [`StoreError::TransactionAlreadyActive`] rather than
/// stacking or replacing the open one.
///
/// All methods take `&self`: the whole state sits behind a single lock, so
/// a commit applies in one critical section and the store can be shared
/// across threads, with the activation check serializing writers.
///
/// # Example
///
/// ```
/// use txkv_core::Store;
///
/// let store = Store::new();
/// store.begin_transaction()?;
/// store.put("balance", 100)?;
/// store.commit_transaction()?;
/// assert_eq!(store.get("balance")?, 100);
/// # Ok::<(), txkv_core::StoreError>(())
/// ```
pub struct Store {
    /// Committed map plus the optional staging layer, guarded together.
    state: RwLock<StoreState>,
    /// Operation counters.
    stats: StoreStats,
    /// Construction-time configuration.
    config: Config,
}

#[derive(Debug)]
struct StoreState {
    /// Ground truth for all committed entries.
    committed: CommittedStore,
    /// `Some` exactly while a transaction is open.
    transaction: Option<TransactionLayer>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            state: RwLock::new(StoreState {
                committed: CommittedStore::with_capacity(config.initial_capacity),
                transaction: None,
            }),
            stats: StoreStats::default(),
            config,
        }
    }

    /// Returns the value for `key`.
    ///
    /// Inside a transaction, writes staged by that transaction are visible
    /// to it: a staged put resolves to the staged value and a staged delete
    /// resolves to [`StoreError::KeyNotFound`] even while the committed map
    /// still holds the key. Keys with no staged entry fall through to the
    /// committed map, as does every read with no transaction open.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] if the key is absent in the
    /// resolved source. An absent key is never reported as a default value.
    pub fn get(&self, key: &str) -> StoreResult<i64> {
        let state = self.state.read();

        if let Some(layer) = &state.transaction {
            match layer.staged(key) {
                Some(StagedWrite::Put(value)) => {
                    self.stats.record_read();
                    return Ok(value);
                }
                Some(StagedWrite::Delete) => {
                    return Err(StoreError::key_not_found(key));
                }
                None => {}
            }
        }

        match state.committed.get(key) {
            Some(value) => {
                self.stats.record_read();
                Ok(value)
            }
            None => Err(StoreError::key_not_found(key)),
        }
    }

    /// Stages an upsert of `key` to `value` in the open transaction.
    ///
    /// The committed map is untouched until commit.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveTransaction`] with no transaction open,
    /// or [`StoreError::InvalidArgument`] for an empty key. Nothing is
    /// mutated on error.
    pub fn put(&self, key: &str, value: i64) -> StoreResult<()> {
        let mut state = self.state.write();
        let layer = state
            .transaction
            .as_mut()
            .ok_or(StoreError::NoActiveTransaction)?;
        validate_key(key)?;

        layer.stage_put(key.to_owned(), value);
        self.stats.record_write();
        trace!(key, value, "staged put");
        Ok(())
    }

    /// Stages a tombstone for `key` in the open transaction.
    ///
    /// After staging, reads of `key` in this transaction miss even if the
    /// committed map still holds it, and commit removes the key. Staging a
    /// delete for a key that exists nowhere is not an error; the
    /// commit-time removal is idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveTransaction`] with no transaction open,
    /// or [`StoreError::InvalidArgument`] for an empty key.
    pub fn delete(&self, key: &str) -> StoreResult<()> {
        let mut state = self.state.write();
        let layer = state
            .transaction
            .as_mut()
            .ok_or(StoreError::NoActiveTransaction)?;
        validate_key(key)?;

        layer.stage_delete(key.to_owned());
        self.stats.record_delete();
        trace!(key, "staged delete");
        Ok(())
    }

    /// Opens a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TransactionAlreadyActive`] if one is already
    /// open; the open transaction and its staged writes are unaffected.
    pub fn begin_transaction(&self) -> StoreResult<()> {
        let mut state = self.state.write();
        if state.transaction.is_some() {
            return Err(StoreError::TransactionAlreadyActive);
        }

        state.transaction = Some(TransactionLayer::with_capacity(
            self.config.transaction_capacity,
        ));
        self.stats.record_begin();
        debug!("transaction begun");
        Ok(())
    }

    /// Commits the open transaction.
    ///
    /// Every staged write lands in the committed map inside one critical
    /// section: a staged put inserts or overwrites, a staged delete removes
    /// the key. No observer can see a partially applied commit. The staging
    /// layer is discarded afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveTransaction`] with no transaction open.
    pub fn commit_transaction(&self) -> StoreResult<()> {
        let mut state = self.state.write();
        let layer = state
            .transaction
            .take()
            .ok_or(StoreError::NoActiveTransaction)?;

        let writes = layer.write_count();
        state.committed.apply(layer);
        self.stats.record_commit();
        debug!(writes, "transaction committed");
        Ok(())
    }

    /// Discards the open transaction without touching the committed map.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveTransaction`] with no transaction open.
    pub fn rollback_transaction(&self) -> StoreResult<()> {
        let mut state = self.state.write();
        let layer = state
            .transaction
            .take()
            .ok_or(StoreError::NoActiveTransaction)?;

        self.stats.record_rollback();
        debug!(discarded = layer.write_count(), "transaction rolled back");
        Ok(())
    }

    /// Executes a function within a transaction.
    ///
    /// If the function returns `Ok`, the transaction is committed.
    /// If it returns `Err`, the transaction is rolled back.
    pub fn transaction<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Self) -> StoreResult<T>,
    {
        self.begin_transaction()?;
        match f(self) {
            Ok(result) => {
                self.commit_transaction()?;
                Ok(result)
            }
            Err(e) => {
                // Try to roll back, but don't mask the original error
                let _ = self.rollback_transaction();
                Err(e)
            }
        }
    }

    /// Checks whether a transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.state.read().transaction.is_some()
    }

    /// Returns the number of writes staged by the open transaction.
    ///
    /// Zero with no transaction open.
    #[must_use]
    pub fn staged_count(&self) -> usize {
        self.state
            .read()
            .transaction
            .as_ref()
            .map_or(0, TransactionLayer::write_count)
    }

    /// Returns the number of committed entries.
    ///
    /// Staged writes are not counted until commit.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().committed.len()
    }

    /// Checks whether the committed map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().committed.is_empty()
    }

    /// Returns all committed keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.state.read().committed.keys()
    }

    /// Returns a snapshot of the operation counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("len", &self.len())
            .field("in_transaction", &self.in_transaction())
            .finish_non_exhaustive()
    }
}

/// Ensures a key is acceptable for staging.
fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::invalid_argument("key must be non-empty"));
    }
    Ok(())
}
