//! Record store error types.

use attachee_shared::types::{AttacheeId, DepartmentId};
use thiserror::Error;

/// Errors reported by [`AttacheeStore`](super::AttacheeStore) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Attachee not found.
    #[error("attachee not found: {0}")]
    NotFound(AttacheeId),

    /// Department not found.
    #[error("department not found: {0}")]
    DepartmentNotFound(DepartmentId),

    /// Creation input failed fiscal checks.
    #[error("invalid attachee input: {0}")]
    Invalid(#[from] crate::fiscal::FiscalError),

    /// Underlying storage operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl StoreError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<StoreError> for attachee_shared::AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) | StoreError::DepartmentNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            StoreError::Invalid(inner) => inner.into(),
            StoreError::Repository(msg) => Self::Database(msg),
        }
    }
}
