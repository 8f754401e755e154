//! Errata Database Layer
//!
//! This crate provides the persistence layer for Errata: a pooled SQLite
//! handle, one generic repository instantiated for the `errors` and
//! `responses` tables, and the join queries that pair them.

pub mod error;
pub mod models;
pub mod repository;

pub use error::DbError;
pub use models::*;
pub use repository::{
    Database, Entity, ErrorRepository, Errors, PairRepository, Repository, ResponseRepository,
    Responses, Value,
};

/// Re-export sqlx types for convenience
pub use sqlx::SqlitePool;
