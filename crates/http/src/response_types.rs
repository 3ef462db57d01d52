//! Response types (Serialize)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// In-band outcome of a write: `{"status": "success"|"error", "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self { status: ResponseStatus::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { status: ResponseStatus::Error, message: message.into() }
    }
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct BannerResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}
