//! HTTP error mapping.
//!
//! Every authentication failure collapses to one uniform 401 body so
//! callers cannot distinguish a bad signature from a revoked session;
//! the subtype stays in server-side logs. Store failures surface as
//! 503 — "we could not check" is not "you are not authenticated".

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mindmath_auth::AuthError;
use mindmath_core::error::AppError;
use serde_json::json;

#[derive(Debug)]
pub struct ApiError(AppError);

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError(AppError::AuthenticationFailed {
            reason: "unauthorized".into(),
        })
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError(AppError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::AuthenticationFailed { reason } => {
                tracing::debug!(reason = %reason, "authentication rejected");
                (StatusCode::UNAUTHORIZED, "unauthorized".to_string())
            }
            AppError::NotFound { entity, .. } => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            AppError::AlreadyExists { entity } => {
                (StatusCode::CONFLICT, format!("{entity} already exists"))
            }
            AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "database failure");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service unavailable".to_string(),
                )
            }
            AppError::Crypto(msg) | AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
