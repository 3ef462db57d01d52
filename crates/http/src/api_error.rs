//! Typed API error for HTTP handlers.
//!
//! Every failure is rendered in-band as `{"status": "error", "message": ...}`;
//! the HTTP status code is a courtesy on top of that.

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use algae_history_core::ValidationError;
use algae_history_service::ServiceError;

use crate::response_types::StatusResponse;

#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request — the body failed validation.
    BadRequest(String),
    /// 413 Payload Too Large — the body exceeded the request size limit.
    PayloadTooLarge(String),
    /// 503 Service Unavailable — the database could not be reached.
    ServiceUnavailable(String),
    /// 500 Internal Server Error — the database rejected the statement.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(StatusResponse::error(message))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        if err.is_validation() {
            Self::BadRequest(message)
        } else if err.is_connection() {
            Self::ServiceUnavailable(message)
        } else {
            Self::Internal(message)
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "request body rejected");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge("Request body too large.".to_owned())
        } else {
            Self::BadRequest(ValidationError::InvalidBody.to_string())
        }
    }
}
