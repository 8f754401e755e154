//! API error types

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::envelope::Envelope;

pub const ERROR_NOT_FOUND: &str = "Error not found";
pub const RESPONSE_NOT_FOUND: &str = "Response not found";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Lookup by id matched nothing; rendered as a `fail` envelope
    #[error("{0}")]
    NotFound(&'static str),

    /// Request could not be extracted; keeps the status axum assigned
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Database(#[from] errata_db::DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::NotFound(msg) => Envelope::fail(*msg),
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                Envelope::error(e.to_string())
            }
            _ => Envelope::error(self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
