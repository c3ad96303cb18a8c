//! Reconciliation error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Reconciliation and archive errors.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),

    /// Invalid archive request.
    #[error("invalid archive request: {0}")]
    Invalid(String),
}

impl ReconciliationError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
