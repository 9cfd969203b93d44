//! Database error types.

use thiserror::Error;

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur in the data access layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Caller supplied unusable input (empty update, bad filter range).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested row does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A uniqueness rule would be violated.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// The pool could not hand out a connection.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// The database rejected a statement or the connection died mid-query.
    #[error("query failed: {0}")]
    Query(#[from] tokio_postgres::Error),
}

impl DbError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }
}

impl From<deadpool_postgres::PoolError> for DbError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
