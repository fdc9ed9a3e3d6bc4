//! Route composition.

use axum::routing::{delete, get, post, put};
use axum::{Json, Router, middleware};
use serde_json::{Value, json};
use surrealdb::Connection;

use crate::handlers::user;
use crate::middleware::require_auth;
use crate::state::AppState;

/// Build the application router.
///
/// - `POST /api/v1/users/register`, `POST /api/v1/users/login` — public
/// - `GET|PUT /api/v1/users/profile`, `PUT /api/v1/users/password`,
///   `DELETE /api/v1/users/logout`, `DELETE /api/v1/users/logout-all`
///   — behind the request gate
/// - `GET /api/health`
pub fn router<C: Connection>(state: AppState<C>) -> Router {
    let public = Router::new()
        .route("/api/v1/users/register", post(user::register::<C>))
        .route("/api/v1/users/login", post(user::login::<C>));

    let protected = Router::new()
        .route(
            "/api/v1/users/profile",
            get(user::get_profile::<C>).put(user::update_profile::<C>),
        )
        .route("/api/v1/users/password", put(user::update_password::<C>))
        .route("/api/v1/users/logout", delete(user::logout::<C>))
        .route("/api/v1/users/logout-all", delete(user::logout_all::<C>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<C>,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .route("/api/health", get(health))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
