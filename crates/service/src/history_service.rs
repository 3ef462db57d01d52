use std::sync::Arc;

use algae_history_core::{HistoryRecord, NewHistoryRecord};
use algae_history_storage::HistoryStore;

use crate::error::ServiceError;

pub struct HistoryService {
    store: Arc<dyn HistoryStore>,
}

impl HistoryService {
    #[must_use]
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store }
    }

    /// Validate a raw JSON request body and persist it.
    pub async fn record_from_body(&self, body: &[u8]) -> Result<i64, ServiceError> {
        let record = NewHistoryRecord::from_json_body(body)?;
        self.save(record).await
    }

    /// Persist a record that has already been validated.
    pub async fn save(&self, record: NewHistoryRecord) -> Result<i64, ServiceError> {
        match self.store.insert_record(&record).await {
            Ok(id) => {
                tracing::info!(id, file_name = %record.file_name, "history record saved");
                Ok(id)
            },
            Err(e) => {
                tracing::error!(file_name = %record.file_name, error = %e, "failed to save history record");
                Err(e.into())
            },
        }
    }

    /// All records, newest first.
    ///
    /// An unreachable database reads as an empty history, so callers cannot
    /// tell "no data" from "no connection". Failures after connecting are
    /// still reported.
    pub async fn list(&self) -> Result<Vec<HistoryRecord>, ServiceError> {
        match self.store.list_records().await {
            Ok(records) => Ok(records),
            Err(e) if e.is_connection() => {
                tracing::warn!(error = %e, "database unreachable, returning empty history");
                Ok(Vec::new())
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to read history");
                Err(e.into())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use algae_history_core::{HistoryPayload, ValidationError};
    use algae_history_storage::StorageError;
    use async_trait::async_trait;

    use super::*;

    #[derive(Clone, Copy, PartialEq)]
    enum Failure {
        None,
        Connection,
        Query,
    }

    struct StubStore {
        rows: Mutex<Vec<HistoryRecord>>,
        failure: Failure,
    }

    impl StubStore {
        fn new(failure: Failure) -> Arc<Self> {
            Arc::new(Self { rows: Mutex::new(Vec::new()), failure })
        }

        fn fail(&self) -> Result<(), StorageError> {
            match self.failure {
                Failure::None => Ok(()),
                Failure::Connection => Err(StorageError::Connection(sqlx::Error::PoolTimedOut)),
                Failure::Query => Err(StorageError::Query(sqlx::Error::RowNotFound)),
            }
        }
    }

    #[async_trait]
    impl HistoryStore for StubStore {
        async fn insert_record(&self, record: &NewHistoryRecord) -> Result<i64, StorageError> {
            self.fail()?;
            let mut rows = self.rows.lock().unwrap();
            let id = i64::try_from(rows.len()).unwrap() + 1;
            rows.push(HistoryRecord {
                id,
                analysis_date: record.analysis_date,
                file_name: record.file_name.clone(),
                total_cells: record.total_cells,
                density_cells_ml: record.density_cells_ml,
            });
            Ok(id)
        }

        async fn list_records(&self) -> Result<Vec<HistoryRecord>, StorageError> {
            self.fail()?;
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by(|a, b| b.id.cmp(&a.id));
            Ok(rows)
        }
    }

    const VALID: &[u8] =
        br#"{"timestamp":"2024-01-15T10:30:00","file_name":"sample1.jpg","total_cells":120,"density_cells_ml":4500.5}"#;

    #[tokio::test]
    async fn write_then_read_returns_newest_first() {
        let store = StubStore::new(Failure::None);
        let service = HistoryService::new(store.clone());

        service.record_from_body(VALID).await.unwrap();
        let second = br#"{"timestamp":"2024-01-16T08:00:00","file_name":"sample2.jpg","total_cells":"N/A","density_cells_ml":"N/A"}"#;
        let id = service.record_from_body(second).await.unwrap();

        let records = service.list().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].file_name, "sample2.jpg");
        assert_eq!(records[0].total_cells, None);
        assert_eq!(records[1].file_name, "sample1.jpg");
    }

    #[tokio::test]
    async fn invalid_body_persists_nothing() {
        let store = StubStore::new(Failure::None);
        let service = HistoryService::new(store.clone());

        let err = service.record_from_body(b"{oops").await.unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(err, ServiceError::Validation(ValidationError::InvalidBody)));
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn validation_runs_before_storage() {
        // A broken database must not mask a bad request.
        let service = HistoryService::new(StubStore::new(Failure::Connection));
        let err = service.record_from_body(br#"{"file_name":"a.jpg","timestamp":"never"}"#).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn write_reports_connection_failure() {
        let service = HistoryService::new(StubStore::new(Failure::Connection));
        let err = service.record_from_body(VALID).await.unwrap_err();
        assert!(err.is_connection());
        assert!(err.to_string().starts_with("Connection failed: "));
    }

    #[tokio::test]
    async fn write_reports_execute_failure() {
        let service = HistoryService::new(StubStore::new(Failure::Query));
        let err = service.record_from_body(VALID).await.unwrap_err();
        assert!(!err.is_connection());
        assert!(err.to_string().starts_with("Execute failed: "));
    }

    #[tokio::test]
    async fn read_degrades_to_empty_when_unreachable() {
        let service = HistoryService::new(StubStore::new(Failure::Connection));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn read_surfaces_query_failure() {
        let service = HistoryService::new(StubStore::new(Failure::Query));
        assert!(service.list().await.is_err());
    }

    #[tokio::test]
    async fn save_accepts_validated_payload() {
        let store = StubStore::new(Failure::None);
        let service = HistoryService::new(store.clone());
        let payload = HistoryPayload {
            timestamp: Some("2024/01/15 10:30:00".to_owned()),
            file_name: Some("analysis_1705300200.png".to_owned()),
            ..HistoryPayload::default()
        };
        service.save(payload.validate().unwrap()).await.unwrap();
        assert_eq!(store.rows.lock().unwrap()[0].file_name, "analysis_1705300200.png");
    }
}
