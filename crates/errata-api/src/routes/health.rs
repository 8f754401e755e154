//! Health check endpoints

use axum::{Router, extract::State, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::envelope::Success;
use crate::error::ApiError;
use crate::state::AppState;

/// Health status response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check handler
async fn health(State(state): State<AppState>) -> Result<Success<HealthResponse>, ApiError> {
    metrics::counter!("errata_health_checks_total").increment(1);

    state.db.ping().await.map_err(|e| {
        warn!("Health check failed: {}", e);
        ApiError::Unavailable(e.to_string())
    })?;

    Ok(Success::ok(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
}
