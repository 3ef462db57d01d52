//! HistoryStore implementation for PgHistoryStore.

use super::*;

use algae_history_core::NewHistoryRecord;
use async_trait::async_trait;

use crate::traits::HistoryStore;

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn insert_record(&self, record: &NewHistoryRecord) -> Result<i64, StorageError> {
        let mut conn = self.connect().await?;
        let result: Result<i64, sqlx::Error> = sqlx::query_scalar(
            "INSERT INTO history (total_cells, density_cells_ml, file_name, analysis_date)
               VALUES ($1, $2, $3, $4)
               RETURNING id",
        )
        .bind(record.total_cells)
        .bind(record.density_cells_ml)
        .bind(&record.file_name)
        .bind(record.analysis_date)
        .fetch_one(&mut conn)
        .await;
        release(conn).await;

        let id = result.map_err(StorageError::Query)?;
        tracing::debug!(id, file_name = %record.file_name, "history record inserted");
        Ok(id)
    }

    async fn list_records(&self) -> Result<Vec<HistoryRecord>, StorageError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            "SELECT id, analysis_date, file_name, total_cells, density_cells_ml
               FROM history ORDER BY id DESC",
        )
        .fetch_all(&mut conn)
        .await;
        release(conn).await;

        result.map_err(StorageError::Query)?.iter().map(row_to_record).collect()
    }
}
