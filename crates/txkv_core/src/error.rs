//! Error types for the txkv store.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
///
/// Every variant is a caller-input error: the failing call leaves the store
/// exactly as it was, and the only recovery is correcting the call sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Read of a key that does not exist in the resolved source.
    #[error("key not found: {key}")]
    KeyNotFound {
        /// The key that was looked up.
        key: String,
    },

    /// Mutation, commit, or rollback attempted with no transaction open.
    #[error("no transaction in progress")]
    NoActiveTransaction,

    /// `begin_transaction` attempted while a transaction is already open.
    #[error("transaction already in progress")]
    TransactionAlreadyActive,

    /// A caller-supplied argument failed validation.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },
}

impl StoreError {
    /// Creates a key-not-found error.
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
