//! Response routes

use axum::{Router, extract::State, routing::get};
use errata_db::{NewResponse, ResponsePatch, ResponseRecord};
use tracing::info;

use crate::envelope::Success;
use crate::error::{ApiError, RESPONSE_NOT_FOUND};
use crate::extract::{Json, Path};
use crate::state::AppState;

/// GET /responses/
async fn list_responses(
    State(state): State<AppState>,
) -> Result<Success<Vec<ResponseRecord>>, ApiError> {
    let responses = state.responses.list().await?;
    Ok(Success::ok(responses))
}

/// GET /responses/{id}
async fn get_response(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Success<ResponseRecord>, ApiError> {
    let response = state
        .responses
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(RESPONSE_NOT_FOUND))?;

    Ok(Success::ok(response))
}

/// POST /responses/
async fn create_response(
    State(state): State<AppState>,
    Json(request): Json<NewResponse>,
) -> Result<Success<ResponseRecord>, ApiError> {
    let response = state.responses.create(request).await?;

    metrics::counter!("errata_records_created_total", "entity" => "response").increment(1);
    info!("Created response {} for error {}", response.id, response.error_id);

    Ok(Success::created(response))
}

/// PATCH /responses/{id}
async fn update_response(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ResponsePatch>,
) -> Result<Success<ResponseRecord>, ApiError> {
    let response = state
        .responses
        .update_by_id(id, patch)
        .await?
        .ok_or(ApiError::NotFound(RESPONSE_NOT_FOUND))?;

    metrics::counter!("errata_records_updated_total", "entity" => "response").increment(1);
    info!("Updated response {}", id);

    Ok(Success::ok(response))
}

/// DELETE /responses/{id}
async fn delete_response(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Success<ResponseRecord>, ApiError> {
    let response = state
        .responses
        .delete_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(RESPONSE_NOT_FOUND))?;

    metrics::counter!("errata_records_deleted_total", "entity" => "response").increment(1);
    info!("Deleted response {}", id);

    Ok(Success::ok(response))
}

/// Create response routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/responses", get(list_responses).post(create_response))
        .route("/responses/", get(list_responses).post(create_response))
        .route(
            "/responses/{id}",
            get(get_response).patch(update_response).delete(delete_response),
        )
}
