//! MindMath API server — application entry point.

use std::time::Duration;

use mindmath_server::{AppConfig, AppState, router, sweep};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mindmath=info")),
        )
        .json()
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(name = %config.name, port = config.port, "Starting MindMath server");

    let db = mindmath_db::connect(&config.db).await?;
    mindmath_db::run_migrations(&db).await?;

    let app_state = AppState::new(db, config.auth.clone());

    tokio::spawn(sweep::run(
        app_state.auth.clone(),
        Duration::from_secs(config.sweep_interval_secs),
    ));

    let app = router::router(app_state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
