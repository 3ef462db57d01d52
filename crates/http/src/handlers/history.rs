use std::sync::Arc;

use axum::extract::rejection::BytesRejection;
use axum::{Json, body::Bytes, extract::State};

use algae_history_core::{HistoryRecord, RECORD_CREATED_MESSAGE};

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::StatusResponse;

/// Record one analysis result.
///
/// Takes the raw body rather than `Json<_>`, and catches the body rejection
/// itself, so that a missing, malformed or oversized body still gets the
/// `{"status":"error"}` envelope instead of axum's plain-text rejection.
pub async fn save_history(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let body = body.map_err(ApiError::from)?;
    state.history_service.record_from_body(&body).await?;
    Ok(Json(StatusResponse::success(RECORD_CREATED_MESSAGE)))
}

/// Every record, newest first. An unreachable database yields `[]`.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HistoryRecord>>, ApiError> {
    let records = state.history_service.list().await?;
    Ok(Json(records))
}
