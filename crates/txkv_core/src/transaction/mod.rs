//! Transaction staging layer.
//!
//! A transaction is an overlay over the committed state: writes staged here
//! are invisible to the committed map until commit, and vanish without a
//! trace on rollback. Only one transaction exists at a time.

mod layer;

pub use layer::{StagedWrite, TransactionLayer};
