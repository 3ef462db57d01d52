//! PostgreSQL storage backend using sqlx.
//!
//! No pool: each call acquires a dedicated `PgConnection`, runs its single
//! statement and closes the connection again, whichever way the statement
//! went.

mod history;

use algae_history_core::HistoryRecord;
use chrono::NaiveDateTime;
use sqlx::{Connection, PgConnection, Row};

use crate::config::DatabaseConfig;
use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgHistoryStore {
    config: DatabaseConfig,
}

impl PgHistoryStore {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    async fn connect(&self) -> Result<PgConnection, StorageError> {
        PgConnection::connect_with(self.config.connect_options()).await.map_err(|e| {
            tracing::debug!(target_db = %self.config.describe(), error = %e, "connection attempt failed");
            StorageError::Connection(e)
        })
    }

    /// Create the `history` table if needed.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        let mut conn = self.connect().await?;
        let result = run_pg_migrations(&mut conn).await;
        release(conn).await;
        result.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!(target_db = %self.config.describe(), "history schema ready");
        Ok(())
    }
}

/// Close a connection, logging rather than propagating a failed goodbye.
pub(crate) async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "error while closing connection");
    }
}

pub(crate) fn row_to_record(row: &sqlx::postgres::PgRow) -> Result<HistoryRecord, StorageError> {
    let corrupt = |source| StorageError::DataCorruption { context: "history row".to_owned(), source };
    let analysis_date: NaiveDateTime = row.try_get("analysis_date").map_err(corrupt)?;
    Ok(HistoryRecord {
        id: row.try_get("id").map_err(corrupt)?,
        analysis_date,
        file_name: row.try_get("file_name").map_err(corrupt)?,
        total_cells: row.try_get("total_cells").map_err(corrupt)?,
        density_cells_ml: row.try_get("density_cells_ml").map_err(corrupt)?,
    })
}
