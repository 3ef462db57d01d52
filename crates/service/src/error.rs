//! Typed error enum for the service layer.

use algae_history_core::ValidationError;
use algae_history_storage::StorageError;
use thiserror::Error;

/// Everything a write or read can fail with, as seen by front-ends.
///
/// `Display` yields the human-readable message sent back to clients.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was rejected before touching the database.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Connecting to or executing against the database failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_connection())
    }
}
