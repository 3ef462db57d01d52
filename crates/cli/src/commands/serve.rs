use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use algae_history_http::{AppState, create_router};
use algae_history_storage::PgHistoryStore;

use crate::{database_config, history_service};

pub(crate) async fn run(port: u16, host: String, cors_origin: Option<String>) -> Result<()> {
    let config = database_config()?;
    tracing::info!(target_db = %config.describe(), "using database");

    // The server still starts without a database: reads degrade to `[]` and
    // writes report the connection failure.
    if let Err(e) = PgHistoryStore::new(config.clone()).migrate().await {
        tracing::warn!("Schema check failed: {}", e);
    }

    let allowed_origin = cors_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .context("invalid CORS origin")?;

    let state = Arc::new(AppState { history_service: history_service(config), allowed_origin });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
