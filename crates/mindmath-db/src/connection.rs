//! Connection bootstrap for the backing SurrealDB instance.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;

use crate::error::DbError;

/// Connection settings, normally populated from the environment by
/// the server crate.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket address, e.g. `127.0.0.1:8000`.
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "mindmath".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// Open an authenticated connection and select the configured
/// namespace and database. The returned client is cheap to clone and
/// shared across repositories.
pub async fn connect(config: &DbConfig) -> Result<Surreal<Client>, DbError> {
    tracing::info!(
        url = %config.url,
        namespace = %config.namespace,
        database = %config.database,
        "connecting to SurrealDB"
    );

    let db = Surreal::new::<Ws>(&config.url).await?;
    db.signin(Root {
        username: config.username.clone(),
        password: config.password.clone(),
    })
    .await?;
    db.use_ns(&config.namespace).use_db(&config.database).await?;

    Ok(db)
}
