//! Error routes, including the error/response join

use axum::{Router, extract::State, routing::get};
use errata_db::{ErrorPatch, ErrorRecord, ErrorResponsePair, NewError};
use tracing::{debug, info};

use crate::envelope::Success;
use crate::error::{ApiError, ERROR_NOT_FOUND, RESPONSE_NOT_FOUND};
use crate::extract::{Json, Path};
use crate::state::AppState;

/// GET /errors/
async fn list_errors(State(state): State<AppState>) -> Result<Success<Vec<ErrorRecord>>, ApiError> {
    let errors = state.errors.list().await?;
    Ok(Success::ok(errors))
}

/// GET /errors/responses
async fn list_pairs(
    State(state): State<AppState>,
) -> Result<Success<Vec<ErrorResponsePair>>, ApiError> {
    let pairs = state.pairs.list_pairs().await?;
    Ok(Success::ok(pairs))
}

/// GET /errors/{id}/responses
async fn list_pairs_for_error(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Success<Vec<ErrorResponsePair>>, ApiError> {
    if let Some(pairs) = state.pairs.list_pairs_for_error(id).await? {
        return Ok(Success::ok(pairs));
    }

    // The join is empty either way; tell the caller which side is missing.
    debug!("No responses joined for error {}", id);
    match state.errors.get_by_id(id).await? {
        Some(_) => Err(ApiError::NotFound(RESPONSE_NOT_FOUND)),
        None => Err(ApiError::NotFound(ERROR_NOT_FOUND)),
    }
}

/// GET /errors/{id}
async fn get_error(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Success<ErrorRecord>, ApiError> {
    let error = state
        .errors
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(ERROR_NOT_FOUND))?;

    Ok(Success::ok(error))
}

/// POST /errors/
async fn create_error(
    State(state): State<AppState>,
    Json(request): Json<NewError>,
) -> Result<Success<ErrorRecord>, ApiError> {
    let error = state.errors.create(request).await?;

    metrics::counter!("errata_records_created_total", "entity" => "error").increment(1);
    info!("Created error {} ({})", error.id, error.error_code);

    Ok(Success::created(error))
}

/// PATCH /errors/{id}
async fn update_error(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ErrorPatch>,
) -> Result<Success<ErrorRecord>, ApiError> {
    let error = state
        .errors
        .update_by_id(id, patch)
        .await?
        .ok_or(ApiError::NotFound(ERROR_NOT_FOUND))?;

    metrics::counter!("errata_records_updated_total", "entity" => "error").increment(1);
    info!("Updated error {}", id);

    Ok(Success::ok(error))
}

/// DELETE /errors/{id}
async fn delete_error(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Success<ErrorRecord>, ApiError> {
    let error = state
        .errors
        .delete_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(ERROR_NOT_FOUND))?;

    metrics::counter!("errata_records_deleted_total", "entity" => "error").increment(1);
    info!("Deleted error {}", id);

    Ok(Success::ok(error))
}

/// Create error routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/errors", get(list_errors).post(create_error))
        .route("/errors/", get(list_errors).post(create_error))
        .route("/errors/responses", get(list_pairs))
        .route("/errors/{id}/responses", get(list_pairs_for_error))
        .route(
            "/errors/{id}",
            get(get_error).patch(update_error).delete(delete_error),
        )
}
