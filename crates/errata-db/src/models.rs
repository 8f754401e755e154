//! Database models

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// A fault reported by a workshop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub id: i64,
    pub description: String,
    pub workshop: String,
    pub error_code: String,
    pub error_message: String,
}

/// A cause/solution pair attached to an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub id: i64,
    pub cause: String,
    pub solution: String,
    /// References `errors.id` by value; the error may no longer exist
    pub error_id: i64,
}

/// One row of the `errors ⋈ responses` projection
///
/// Both primary keys are kept under distinct names so neither shadows the
/// other in the flattened record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponsePair {
    pub error_id: i64,
    pub description: String,
    pub workshop: String,
    pub error_code: String,
    pub error_message: String,
    pub response_id: i64,
    pub cause: String,
    pub solution: String,
}

/// Create payload for an error
///
/// Absent fields are written as NULL and rejected by the table constraints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewError {
    pub description: Option<String>,
    pub workshop: Option<String>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

/// Create payload for a response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewResponse {
    pub cause: Option<String>,
    pub solution: Option<String>,
    pub error_id: Option<i64>,
}

/// Partial update for an error
///
/// `None` leaves the column untouched, `Some(None)` writes NULL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPatch {
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub workshop: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub error_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub error_message: Option<Option<String>>,
}

/// Partial update for a response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePatch {
    #[serde(default, deserialize_with = "present")]
    pub cause: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub solution: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub error_id: Option<Option<i64>>,
}

/// Marks a key as present even when its value is `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ==================== TryFrom Implementations ====================

impl TryFrom<&SqliteRow> for ErrorRecord {
    type Error = sqlx::Error;

    fn try_from(row: &SqliteRow) -> Result<Self, Self::Error> {
        Ok(ErrorRecord {
            id: row.try_get("id")?,
            description: row.try_get("description")?,
            workshop: row.try_get("workshop")?,
            error_code: row.try_get("error_code")?,
            error_message: row.try_get("error_message")?,
        })
    }
}

impl TryFrom<&SqliteRow> for ResponseRecord {
    type Error = sqlx::Error;

    fn try_from(row: &SqliteRow) -> Result<Self, Self::Error> {
        Ok(ResponseRecord {
            id: row.try_get("id")?,
            cause: row.try_get("cause")?,
            solution: row.try_get("solution")?,
            error_id: row.try_get("error_id")?,
        })
    }
}

impl TryFrom<&SqliteRow> for ErrorResponsePair {
    type Error = sqlx::Error;

    fn try_from(row: &SqliteRow) -> Result<Self, Self::Error> {
        Ok(ErrorResponsePair {
            error_id: row.try_get("error_id")?,
            description: row.try_get("description")?,
            workshop: row.try_get("workshop")?,
            error_code: row.try_get("error_code")?,
            error_message: row.try_get("error_message")?,
            response_id: row.try_get("response_id")?,
            cause: row.try_get("cause")?,
            solution: row.try_get("solution")?,
        })
    }
}
