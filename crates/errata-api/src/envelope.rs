//! JSend response envelope
//!
//! Every body this API produces has one of three shapes:
//!
//! ```json
//! { "status": "success", "data": ... }
//! { "status": "fail", "data": { "msg": "..." } }
//! { "status": "error", "message": "..." }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Body of a `fail` envelope
#[derive(Debug, Serialize)]
pub struct FailData {
    pub msg: String,
}

/// Serialized form of every response body
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success { data: T },
    Fail { data: FailData },
    Error { message: String },
}

impl Envelope<()> {
    pub fn fail(msg: impl Into<String>) -> Self {
        Envelope::Fail {
            data: FailData { msg: msg.into() },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Envelope::Error {
            message: message.into(),
        }
    }
}

/// A successful handler result
pub struct Success<T> {
    status: StatusCode,
    data: T,
}

impl<T> Success<T> {
    /// 200 OK
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// 201 Created
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        (self.status, Json(Envelope::Success { data: self.data })).into_response()
    }
}
