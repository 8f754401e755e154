//! Join queries across errors and responses

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbError;
use crate::models::ErrorResponsePair;

const PAIR_SELECT: &str = r#"
    SELECT errors.id AS error_id,
           errors.description AS description,
           errors.workshop AS workshop,
           errors.error_code AS error_code,
           errors.error_message AS error_message,
           responses.id AS response_id,
           responses.cause AS cause,
           responses.solution AS solution
    FROM errors
    INNER JOIN responses ON responses.error_id = errors.id
"#;

/// Read-only view of every (error, response) pair
#[derive(Clone)]
pub struct PairRepository {
    pool: SqlitePool,
}

impl PairRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// One entry per response whose error exists
    pub async fn list_pairs(&self) -> Result<Vec<ErrorResponsePair>, DbError> {
        let sql = format!("{} ORDER BY errors.id, responses.id", PAIR_SELECT);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        debug!(count = rows.len(), "Listed error/response pairs");
        rows.iter()
            .map(|row| ErrorResponsePair::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Pairs for one error, or `None` when the join is empty
    ///
    /// An error without responses and an unknown error id both produce `None`.
    pub async fn list_pairs_for_error(
        &self,
        error_id: i64,
    ) -> Result<Option<Vec<ErrorResponsePair>>, DbError> {
        let sql = format!("{} WHERE errors.id = ? ORDER BY responses.id", PAIR_SELECT);
        let rows = sqlx::query(&sql)
            .bind(error_id)
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        rows.iter()
            .map(|row| ErrorResponsePair::try_from(row).map_err(DbError::from))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{ErrorRecord, NewError, NewResponse, ResponseRecord};
    use crate::repository::Database;

    async fn seed_error(db: &Database, code: &str) -> ErrorRecord {
        db.errors()
            .create(NewError {
                description: Some(format!("fault {}", code)),
                workshop: Some("W1".to_string()),
                error_code: Some(code.to_string()),
                error_message: Some("boom".to_string()),
            })
            .await
            .unwrap()
    }

    async fn seed_response(db: &Database, error_id: i64, cause: &str) -> ResponseRecord {
        db.responses()
            .create(NewResponse {
                cause: Some(cause.to_string()),
                solution: Some("fix it".to_string()),
                error_id: Some(error_id),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_pairs_one_entry_per_matching_response() {
        let db = Database::in_memory().await.unwrap();
        let with_two = seed_error(&db, "E001").await;
        let without = seed_error(&db, "E002").await;
        let first = seed_response(&db, with_two.id, "cable").await;
        let second = seed_response(&db, with_two.id, "fuse").await;
        seed_response(&db, 999, "orphan").await;

        let pairs = db.pairs().list_pairs().await.unwrap();

        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|p| p.error_id == with_two.id));
        assert!(pairs.iter().all(|p| p.error_id != without.id));
        assert_eq!(pairs[0].response_id, first.id);
        assert_eq!(pairs[0].cause, "cable");
        assert_eq!(pairs[1].response_id, second.id);
        assert_eq!(pairs[1].error_code, "E001");
    }

    #[tokio::test]
    async fn test_pairs_for_error_carry_both_sides() {
        let db = Database::in_memory().await.unwrap();
        let error = seed_error(&db, "E001").await;
        let response = seed_response(&db, error.id, "log overflow").await;

        let pairs = db
            .pairs()
            .list_pairs_for_error(error.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(pairs.len(), 1);
        let pair = &pairs[0];
        assert_eq!(pair.error_id, error.id);
        assert_eq!(pair.description, error.description);
        assert_eq!(pair.workshop, error.workshop);
        assert_eq!(pair.error_message, error.error_message);
        assert_eq!(pair.response_id, response.id);
        assert_eq!(pair.cause, "log overflow");
        assert_eq!(pair.solution, "fix it");
    }

    #[tokio::test]
    async fn test_pairs_for_error_without_responses_is_none() {
        let db = Database::in_memory().await.unwrap();
        let error = seed_error(&db, "E001").await;

        assert_eq!(db.pairs().list_pairs_for_error(error.id).await.unwrap(), None);
        assert_eq!(db.pairs().list_pairs_for_error(12345).await.unwrap(), None);
    }
}
