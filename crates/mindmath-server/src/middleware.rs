//! Request gate — bearer credential extraction and validation.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use mindmath_auth::AuthError;
use surrealdb::Connection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Identity attached to the request after successful validation.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub session_id: Uuid,
}

/// Extract the credential from `Authorization: Bearer <credential>`.
///
/// The scheme keyword is a case-sensitive exact match, separated by
/// exactly one space from a non-empty remainder.
fn bearer_credential(header: &str) -> Option<&str> {
    match header.split_once(' ') {
        Some(("Bearer", credential)) if !credential.is_empty() && !credential.contains(' ') => {
            Some(credential)
        }
        _ => None,
    }
}

/// Middleware protecting a route subtree. On success, inserts an
/// [`AuthContext`] extension; on any auth failure, responds with the
/// uniform 401 regardless of subtype.
pub async fn require_auth<C: Connection>(
    State(state): State<AppState<C>>,
    mut request: Request,
    next: Next,
) -> Response {
    let credential = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_credential);

    let Some(credential) = credential else {
        return ApiError::unauthorized().into_response();
    };

    match state.auth.validate(credential).await {
        Ok(authenticated) => {
            request.extensions_mut().insert(AuthContext {
                user_id: authenticated.user_id,
                session_id: authenticated.session_id,
            });
            next.run(request).await
        }
        Err(err @ AuthError::Store(_)) => ApiError::from(err).into_response(),
        Err(err) => {
            tracing::debug!(error = %err, "rejected credential");
            ApiError::unauthorized().into_response()
        }
    }
}
