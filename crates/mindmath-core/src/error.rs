//! Errors shared across the MindMath backend.

use thiserror::Error;

/// Application-level error taxonomy. Crate-local error types convert
/// into this at their boundaries; the HTTP layer maps each variant to
/// a status code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("{entity} already exists")]
    AlreadyExists { entity: String },

    #[error("authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("validation: {message}")]
    Validation { message: String },

    #[error("database: {0}")]
    Database(String),

    #[error("crypto: {0}")]
    Crypto(String),

    #[error("internal: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;
