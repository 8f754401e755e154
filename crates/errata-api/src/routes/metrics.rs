//! Prometheus text exposition of the counters recorded by the API

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use std::sync::Arc;

use crate::state::MetricsHandle;

/// Mount `/metrics` over an installed Prometheus recorder
pub fn routes(handle: Arc<MetricsHandle>) -> Router {
    Router::new()
        .route("/metrics", get(get_metrics))
        .with_state(handle)
}

/// GET /metrics
///
/// Record writes per entity and health checks, in text exposition format.
async fn get_metrics(State(handle): State<Arc<MetricsHandle>>) -> impl IntoResponse {
    handle.render()
}
