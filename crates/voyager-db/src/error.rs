//! Database error types for voyager-db.

use thiserror::Error;
use voyager_core::errors::{CoreError, ValidationError};

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned data that could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// A schema migration failed. The schema is in an unknown state.
    #[error("Migration '{name}' failed: {reason}")]
    Migration { name: String, reason: String },

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// No exoplanet has the requested identity.
    #[error("exoplanet not found: {0}")]
    NotFound(i64),

    /// The connection pool could not hand out a connection.
    #[error("Connection pool error: {0}")]
    Pool(String),

    /// Domain rule violated (validation, out-of-range input).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ValidationError> for DatabaseError {
    fn from(error: ValidationError) -> Self {
        Self::Core(CoreError::Validation(error))
    }
}
