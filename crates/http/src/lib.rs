//! HTTP API server for algae-history.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod response_types;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use algae_history_service::HistoryService;

pub use response_types::{BannerResponse, ResponseStatus, StatusResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
///
/// Holds nothing mutable: the service owns the startup-scoped database
/// configuration and every request opens its own connection.
pub struct AppState {
    pub history_service: Arc<HistoryService>,
    /// Origin allowed to call the API from a browser. `None` allows any.
    pub allowed_origin: Option<HeaderValue>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.allowed_origin.clone());
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route(
            "/api/history",
            get(handlers::history::get_history).post(handlers::history::save_history),
        )
        .route("/save_history.php", post(handlers::history::save_history))
        .route("/get_history.php", get(handlers::history::get_history))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(allowed_origin: Option<HeaderValue>) -> CorsLayer {
    let origin = match allowed_origin {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::any(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse { message: "API is running" })
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
