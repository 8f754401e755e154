//! Database repository implementation

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use crate::error::DbError;

// Submodules
mod entity;
mod errors;
mod pairs;
mod responses;

pub use entity::{Entity, Repository, Value};
pub use errors::{ErrorRepository, Errors};
pub use pairs::PairRepository;
pub use responses::{ResponseRepository, Responses};

/// Database connection and operations
///
/// Owns the connection pool. Repositories borrow a clone of it, so the
/// process entry point decides when the pool is opened and closed.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        info!("Connecting to database: {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Open a private in-memory database
    ///
    /// Every SQLite connection to `:memory:` sees its own database, so the pool
    /// is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self, DbError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Get the underlying pool for advanced usage
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repository over the `errors` table
    pub fn errors(&self) -> ErrorRepository {
        Repository::new(self.pool.clone())
    }

    /// Repository over the `responses` table
    pub fn responses(&self) -> ResponseRepository {
        Repository::new(self.pool.clone())
    }

    /// Join queries across `errors` and `responses`
    pub fn pairs(&self) -> PairRepository {
        PairRepository::new(self.pool.clone())
    }

    /// Round trip to the store
    pub async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), DbError> {
        info!("Running database migrations");

        // responses.error_id carries no REFERENCES clause: a response may
        // outlive its error and may point at an id that never existed.
        let statements = [
            (
                "errors",
                r#"
                CREATE TABLE IF NOT EXISTS errors (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    description TEXT NOT NULL,
                    workshop TEXT NOT NULL,
                    error_code TEXT NOT NULL,
                    error_message TEXT NOT NULL
                )
                "#,
            ),
            (
                "responses",
                r#"
                CREATE TABLE IF NOT EXISTS responses (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    cause TEXT NOT NULL,
                    solution TEXT NOT NULL,
                    error_id INTEGER NOT NULL
                )
                "#,
            ),
            (
                "idx_responses_error_id",
                r#"
                CREATE INDEX IF NOT EXISTS idx_responses_error_id ON responses(error_id)
                "#,
            ),
        ];

        for (name, sql) in statements {
            sqlx::query(sql)
                .execute(&self.pool)
                .await
                .map_err(|e| DbError::Migration(format!("{}: {}", name, e)))?;
        }

        info!("Database migrations completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();
        db.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_new_tables_are_empty() {
        let db = Database::in_memory().await.unwrap();

        assert!(db.errors().list().await.unwrap().is_empty());
        assert!(db.responses().list().await.unwrap().is_empty());
        assert!(db.pairs().list_pairs().await.unwrap().is_empty());
    }
}
