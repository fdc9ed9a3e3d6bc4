//! Authentication error types.

use mindmath_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Signature check failed, unexpected signing algorithm, or
    /// required claims absent/malformed.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// No live session backs the credential. Covers both "never
    /// existed" and "already revoked" — indistinguishable on purpose
    /// so revocation state is not observable.
    #[error("session not found")]
    SessionNotFound,

    /// The session row exists but is past its expiry.
    #[error("session has expired")]
    SessionExpired,

    /// Login identity check failed (unknown email or wrong password).
    #[error("invalid email or password")]
    InvalidLogin,

    /// Session store failure — infrastructure, not an auth decision.
    #[error("session store unavailable: {0}")]
    Store(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(msg) => AppError::Database(msg),
            AuthError::Crypto(msg) => AppError::Crypto(msg),
            other => AppError::AuthenticationFailed {
                reason: other.to_string(),
            },
        }
    }
}
