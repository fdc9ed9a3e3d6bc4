//! Storage-layer error type.

use mindmath_core::error::AppError;

/// Failures from the SurrealDB layer. `NotFound` is the only variant
/// callers branch on; the rest collapse into `AppError::Database` at
/// the crate boundary.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("surrealdb: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("migration: {0}")]
    Migration(String),

    #[error("{entity} not found ({id})")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::NotFound { entity, id },
            other => AppError::Database(other.to_string()),
        }
    }
}
