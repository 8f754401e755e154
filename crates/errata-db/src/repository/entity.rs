//! Generic single-table repository

use std::marker::PhantomData;

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbError;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A column value bound into a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(Option<String>),
    Integer(Option<i64>),
}

impl Value {
    fn bind(self, query: SqliteQuery<'_>) -> SqliteQuery<'_> {
        match self {
            Value::Text(v) => query.bind(v),
            Value::Integer(v) => query.bind(v),
        }
    }
}

/// A table with a generated integer `id` and a fixed set of writable columns
pub trait Entity: Send + Sync + 'static {
    /// Row as read back from the store
    type Record: for<'r> TryFrom<&'r SqliteRow, Error = sqlx::Error> + Send;
    /// Create payload
    type New: Send;
    /// Partial update payload
    type Patch: Send;

    const TABLE: &'static str;

    /// Writable columns in insert order
    const COLUMNS: &'static [&'static str];

    /// One value per entry of `COLUMNS`, in the same order
    fn insert_values(new: Self::New) -> Vec<Value>;

    /// The columns present in the patch and their new values
    fn patch_values(patch: Self::Patch) -> Vec<(&'static str, Value)>;
}

/// CRUD over one [`Entity`] table
///
/// Each operation is a single statement. A missing row is reported as
/// `Ok(None)`; store failures are returned as [`DbError`] untouched.
pub struct Repository<E: Entity> {
    pool: SqlitePool,
    _entity: PhantomData<E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn projection() -> String {
        format!("id, {}", E::COLUMNS.join(", "))
    }

    fn decode(row: &SqliteRow) -> Result<E::Record, DbError> {
        <E::Record as TryFrom<&SqliteRow>>::try_from(row).map_err(DbError::from)
    }

    /// All rows, by ascending id
    pub async fn list(&self) -> Result<Vec<E::Record>, DbError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", Self::projection(), E::TABLE);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        debug!(table = E::TABLE, count = rows.len(), "Listed rows");
        rows.iter().map(Self::decode).collect()
    }

    /// The row with `id`, if any
    pub async fn get_by_id(&self, id: i64) -> Result<Option<E::Record>, DbError> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", Self::projection(), E::TABLE);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::decode).transpose()
    }

    /// Insert a row and return it as stored
    pub async fn create(&self, new: E::New) -> Result<E::Record, DbError> {
        let placeholders = vec!["?"; E::COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            E::TABLE,
            E::COLUMNS.join(", "),
            placeholders,
            Self::projection()
        );

        let mut query = sqlx::query(&sql);
        for value in E::insert_values(new) {
            query = value.bind(query);
        }
        let row = query.fetch_one(&self.pool).await?;

        Self::decode(&row)
    }

    /// Overwrite the columns present in `patch`, leaving the others as stored
    ///
    /// Only the supplied columns appear in the `SET` clause, so concurrent
    /// patches touching different columns of the same row do not clobber
    /// each other. An empty patch reads the row back unchanged.
    pub async fn update_by_id(
        &self,
        id: i64,
        patch: E::Patch,
    ) -> Result<Option<E::Record>, DbError> {
        let assignments = E::patch_values(patch);
        if assignments.is_empty() {
            return self.get_by_id(id).await;
        }

        let set_clause = assignments
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ? RETURNING {}",
            E::TABLE,
            set_clause,
            Self::projection()
        );

        let mut query = sqlx::query(&sql);
        for (_, value) in assignments {
            query = value.bind(query);
        }
        let row = query.bind(id).fetch_optional(&self.pool).await?;

        row.as_ref().map(Self::decode).transpose()
    }

    /// Delete the row with `id` and return what was removed
    pub async fn delete_by_id(&self, id: i64) -> Result<Option<E::Record>, DbError> {
        let sql = format!(
            "DELETE FROM {} WHERE id = ? RETURNING {}",
            E::TABLE,
            Self::projection()
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::decode).transpose()
    }
}
