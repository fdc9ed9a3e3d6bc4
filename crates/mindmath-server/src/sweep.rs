//! Background sweep of expired session rows.
//!
//! Expired sessions already fail validation; this task only reclaims
//! storage. Runs until the process exits.

use std::sync::Arc;
use std::time::Duration;

use mindmath_auth::AuthService;
use mindmath_core::repository::SessionRepository;

pub async fn run<S: SessionRepository>(auth: Arc<AuthService<S>>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        match auth.sweep_expired().await {
            Ok(0) => {}
            Ok(count) => tracing::info!(count, "swept expired sessions"),
            Err(e) => tracing::warn!(error = %e, "session sweep failed"),
        }
    }
}
