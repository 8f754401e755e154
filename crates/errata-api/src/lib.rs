//! Errata REST API
//!
//! This crate provides the Axum-based HTTP layer for Errata: the error and
//! response CRUD routes, the error/response join routes, the JSend envelope
//! every body is wrapped in, and the embedded browser client.

pub mod envelope;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use envelope::{Envelope, Success};
pub use error::ApiError;
pub use routes::{cors_layer, create_router};
pub use state::{AppState, MetricsHandle};
