//! Storage backend trait abstraction.

use algae_history_core::{HistoryRecord, NewHistoryRecord};
use async_trait::async_trait;

use crate::error::StorageError;

/// Persistence operations on the `history` table.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Insert one record, returning its assigned id.
    async fn insert_record(&self, record: &NewHistoryRecord) -> Result<i64, StorageError>;

    /// All records, newest (highest id) first.
    async fn list_records(&self) -> Result<Vec<HistoryRecord>, StorageError>;
}
