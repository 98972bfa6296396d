//! # txkv Core
//!
//! Transactional in-memory key-value store engine.
//!
//! This crate provides:
//! - A committed key-value map that is the single source of truth between
//!   transactions
//! - A staging layer for the one open transaction
//! - All-or-nothing commit and rollback
//! - Read-your-own-writes inside a transaction, isolation outside it
//!
//! Mutation is transactional by construction: `put` and `delete` are
//! rejected unless a transaction is open, so there is no way to change the
//! committed state without going through commit.
//!
//! # Example
//!
//! ```
//! use txkv_core::{Store, StoreError};
//!
//! let store = Store::new();
//!
//! store.begin_transaction()?;
//! store.put("balance", 100)?;
//! store.put("savings", 500)?;
//! store.commit_transaction()?;
//!
//! assert_eq!(store.get("balance")?, 100);
//!
//! store.begin_transaction()?;
//! store.put("balance", 200)?;
//! store.rollback_transaction()?;
//!
//! // The pre-transaction value is preserved
//! assert_eq!(store.get("balance")?, 100);
//! # Ok::<(), StoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod committed;
pub mod config;
pub mod error;
pub mod stats;
pub mod store;
pub mod transaction;

pub use committed::CommittedStore;
pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use stats::{StatsSnapshot, StoreStats};
pub use store::Store;
pub use transaction::{StagedWrite, TransactionLayer};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
