//! User account handlers: registration, login, profile management,
//! and logout.
//!
//! The login handler owns the identity check (user lookup + password
//! verification) and then asks the auth service for a credential; the
//! auth service itself never touches the user repository.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use chrono::Utc;
use mindmath_auth::{AuthError, password};
use mindmath_core::error::AppError;
use mindmath_core::models::user::{CreateUser, UpdateUser, User};
use mindmath_core::repository::UserRepository;
use serde::Deserialize;
use serde::Serialize;
use serde_json::{Value, json};
use surrealdb::Connection;

use crate::error::ApiError;
use crate::middleware::AuthContext;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

fn validation(message: impl Into<String>) -> ApiError {
    AppError::Validation {
        message: message.into(),
    }
    .into()
}

fn validate_register(req: &RegisterRequest, min_password_length: usize) -> Result<(), ApiError> {
    if !req.email.contains('@') || req.email.len() < 3 {
        return Err(validation("invalid email address"));
    }
    if req.username.len() < 3 || req.username.len() > 50 {
        return Err(validation("username must be 3-50 characters"));
    }
    if req.password.len() < min_password_length {
        return Err(validation(format!(
            "password must be at least {min_password_length} characters"
        )));
    }
    if req.first_name.is_empty() || req.last_name.is_empty() {
        return Err(validation("first and last name are required"));
    }
    Ok(())
}

/// Provenance metadata for the session row; advisory only.
fn request_provenance(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());
    let device_info = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    (ip_address, device_info)
}

pub async fn register<C: Connection>(
    State(state): State<AppState<C>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    validate_register(&req, state.auth.config().min_password_length)?;

    match state.users.get_by_email(&req.email).await {
        Ok(_) => {
            return Err(AppError::AlreadyExists {
                entity: "email".into(),
            }
            .into());
        }
        Err(AppError::NotFound { .. }) => {}
        Err(e) => return Err(e.into()),
    }
    match state.users.get_by_username(&req.username).await {
        Ok(_) => {
            return Err(AppError::AlreadyExists {
                entity: "username".into(),
            }
            .into());
        }
        Err(AppError::NotFound { .. }) => {}
        Err(e) => return Err(e.into()),
    }

    let password_hash = password::hash_password(&req.password)?;
    let user = state
        .users
        .create(CreateUser {
            email: req.email,
            username: req.username,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login<C: Connection>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Unknown email and wrong password are indistinguishable 401s.
    let user = state
        .users
        .get_by_email(&req.email)
        .await
        .map_err(|e| match e {
            AppError::NotFound { .. } => ApiError::from(AuthError::InvalidLogin),
            other => ApiError::from(other),
        })?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        return Err(AuthError::InvalidLogin.into());
    }

    let (ip_address, device_info) = request_provenance(&headers);
    let token = state.auth.issue(&user, ip_address, device_info).await?;

    let user = state
        .users
        .update(
            user.id,
            UpdateUser {
                last_login_at: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await?;

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse { token, user }))
}

pub async fn get_profile<C: Connection>(
    State(state): State<AppState<C>>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<User>, ApiError> {
    let user = state.users.get_by_id(ctx.user_id).await?;
    Ok(Json(user))
}

pub async fn update_profile<C: Connection>(
    State(state): State<AppState<C>>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users
        .update(
            ctx.user_id,
            UpdateUser {
                first_name: req.first_name,
                last_name: req.last_name,
                ..Default::default()
            },
        )
        .await?;
    Ok(Json(user))
}

pub async fn update_password<C: Connection>(
    State(state): State<AppState<C>>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.new_password.len() < state.auth.config().min_password_length {
        return Err(validation(format!(
            "password must be at least {} characters",
            state.auth.config().min_password_length
        )));
    }

    let user = state.users.get_by_id(ctx.user_id).await?;
    if !password::verify_password(&req.current_password, &user.password_hash)? {
        return Err(AuthError::InvalidLogin.into());
    }

    let password_hash = password::hash_password(&req.new_password)?;
    state
        .users
        .update(
            ctx.user_id,
            UpdateUser {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )
        .await?;

    tracing::info!(user_id = %ctx.user_id, "password updated");
    Ok(Json(json!({ "message": "password updated" })))
}

/// Logout of this session only.
pub async fn logout<C: Connection>(
    State(state): State<AppState<C>>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Value>, ApiError> {
    state.auth.revoke_one(ctx.session_id).await?;
    tracing::info!(user_id = %ctx.user_id, session_id = %ctx.session_id, "session revoked");
    Ok(Json(json!({ "message": "logged out" })))
}

/// Logout of all devices.
pub async fn logout_all<C: Connection>(
    State(state): State<AppState<C>>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Value>, ApiError> {
    let revoked = state.auth.revoke_all(ctx.user_id).await?;
    tracing::info!(user_id = %ctx.user_id, count = revoked, "all sessions revoked");
    Ok(Json(json!({ "message": "logged out everywhere", "revoked": revoked })))
}
