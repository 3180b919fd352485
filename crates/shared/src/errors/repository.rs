use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl RepositoryError {
    /// Maps Postgres constraint violations onto the matching variant so
    /// callers can answer 409/400 instead of a bare database error.
    pub fn from_constraint(err: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();

            if db_err.is_unique_violation() {
                return RepositoryError::AlreadyExists(constraint);
            }

            if db_err.is_foreign_key_violation() {
                return RepositoryError::ForeignKey(constraint);
            }
        }

        if matches!(err, SqlxError::RowNotFound) {
            return RepositoryError::NotFound;
        }

        RepositoryError::Sqlx(err)
    }
}
