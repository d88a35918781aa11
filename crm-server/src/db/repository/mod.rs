//! Repository Module
//!
//! CRUD operations over the SQLite store. Every mutation runs in one
//! transaction together with its pre-checks (referent existence, uniqueness,
//! target existence). Write transactions take the database write lock up front
//! with `BEGIN IMMEDIATE`, so a concurrent writer waits on `busy_timeout`
//! instead of failing when it upgrades a stale read snapshot.

pub mod client;
pub mod client_note;
pub mod invoice;
pub mod payment;
pub mod report;
pub mod trip;
pub mod user;

use shared::{AppError, ErrorCode};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool, Transaction};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{1}")]
    NotFound(ErrorCode, String),

    #[error("{1}")]
    Duplicate(ErrorCode, String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    /// Not-found error carrying the code's default message
    pub fn not_found(code: ErrorCode) -> Self {
        Self::NotFound(code, code.message().to_string())
    }

    /// Duplicate-key error carrying the code's default message
    pub fn duplicate(code: ErrorCode) -> Self {
        Self::Duplicate(code, code.message().to_string())
    }

    /// Re-tag a store-level unique violation with a domain code
    pub fn on_duplicate(self, code: ErrorCode) -> Self {
        match self {
            Self::Duplicate(..) => Self::duplicate(code),
            other => other,
        }
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error()
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(ErrorCode::AlreadyExists, db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(code, msg) => AppError::with_message(code, msg),
            RepoError::Duplicate(code, msg) => AppError::with_message(code, msg),
            RepoError::Database(msg) => {
                tracing::error!(target: "database", error = %msg, "Database error occurred");
                AppError::database("Database error")
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Open a write transaction holding the reserved lock from its first statement
pub(crate) async fn begin_write(pool: &SqlitePool) -> RepoResult<Transaction<'static, Sqlite>> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

/// Whether a row with `id` exists in `table`
///
/// `table` is always one of this module's own table names.
pub(crate) async fn row_exists(
    conn: &mut SqliteConnection,
    table: &'static str,
    id: i64,
) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(&format!("SELECT id FROM {table} WHERE id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

/// Fail with `code` unless a row with `id` exists in `table`
pub(crate) async fn ensure_exists(
    conn: &mut SqliteConnection,
    table: &'static str,
    id: i64,
    code: ErrorCode,
) -> RepoResult<()> {
    if row_exists(conn, table, id).await? {
        Ok(())
    } else {
        Err(RepoError::not_found(code))
    }
}

/// Append `AND <column> contains <value>` (case-insensitive) when a filter is set
pub(crate) fn push_contains(qb: &mut QueryBuilder<'_, Sqlite>, column: &str, value: Option<&str>) {
    if let Some(value) = value {
        qb.push(format!(" AND instr(lower({column}), lower("))
            .push_bind(value.to_string())
            .push(")) > 0");
    }
}

/// Append `AND <column> = <value>` when a filter is set
pub(crate) fn push_eq_i64(qb: &mut QueryBuilder<'_, Sqlite>, column: &str, value: Option<i64>) {
    if let Some(value) = value {
        qb.push(format!(" AND {column} = ")).push_bind(value);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::DbService;
    use sqlx::SqlitePool;

    pub async fn pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }
}
