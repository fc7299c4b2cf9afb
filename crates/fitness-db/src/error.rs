//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("record not found: {0}")]
    NotFound(String),

    /// A uniqueness rule rejected the write
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DbError {
    /// Map a unique-constraint violation to `Conflict`, pass anything else through
    pub fn unique_or(err: sqlx::Error, what: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Conflict(what.into()),
            _ => Self::Sqlx(err),
        }
    }
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;
