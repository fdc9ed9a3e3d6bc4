//! Shared application state.

use std::sync::Arc;

use mindmath_auth::{AuthConfig, AuthService};
use mindmath_db::repository::{SurrealSessionRepository, SurrealUserRepository};
use surrealdb::{Connection, Surreal};

/// Handles shared by every request. Generic over the SurrealDB
/// engine so tests can run against the in-memory engine.
pub struct AppState<C: Connection> {
    pub auth: Arc<AuthService<SurrealSessionRepository<C>>>,
    pub users: SurrealUserRepository<C>,
}

impl<C: Connection> AppState<C> {
    pub fn new(db: Surreal<C>, auth_config: AuthConfig) -> Self {
        Self {
            auth: Arc::new(AuthService::new(
                SurrealSessionRepository::new(db.clone()),
                auth_config,
            )),
            users: SurrealUserRepository::new(db),
        }
    }
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
            users: self.users.clone(),
        }
    }
}
