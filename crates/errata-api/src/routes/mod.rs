//! API routes

mod errors;
mod health;
pub mod metrics;
mod responses;

use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode, Uri, header, header::InvalidHeaderValue},
    response::{Html, IntoResponse, Response},
};
use rust_embed::Embed;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::state::{AppState, MetricsHandle};

/// Embedded browser client
#[derive(Embed)]
#[folder = "$CARGO_MANIFEST_DIR/../../static"]
struct Assets;

/// Handler for serving embedded static files
async fn serve_embedded_file(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if let Some(content) = <Assets as Embed>::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        (
            [(header::CONTENT_TYPE, mime.as_ref())],
            content.data.into_owned(),
        )
            .into_response()
    } else if let Some(content) = <Assets as Embed>::get("index.html") {
        Html(content.data.into_owned()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Cross-origin policy: one origin, the four verbs the API serves
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(allowed_origin)?;

    Ok(CorsLayer::new()
        .allow_origin([origin])
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Create the main router
pub fn create_router(state: AppState, metrics_handle: Option<Arc<MetricsHandle>>) -> Router {
    // API routes
    let mut router = Router::new()
        .merge(health::routes())
        .merge(errors::routes())
        .merge(responses::routes())
        .with_state(state);

    // Add metrics endpoint if enabled
    if let Some(handle) = metrics_handle {
        router = router.merge(metrics::routes(handle));
    }

    // Client assets; must be last so API routes take precedence
    router.fallback(serve_embedded_file)
}
