use std::sync::PoisonError;
use thiserror::Error;
use crate::database::DatabaseError;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),

    /// Row not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Unique constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::Lock(error.to_string())
    }
}

impl From<String> for RepositoryError {
    fn from(error: String) -> Self {
        if error.contains("validation") || error.contains("invalid") {
            RepositoryError::Validation(error)
        } else {
            RepositoryError::Database(DatabaseError::GenericError(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_conversion_picks_variant() {
        assert!(matches!(
            RepositoryError::from("invalid role".to_string()),
            RepositoryError::Validation(_)
        ));
        assert!(matches!(
            RepositoryError::from("disk full".to_string()),
            RepositoryError::Database(_)
        ));
    }
}
