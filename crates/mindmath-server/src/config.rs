//! Server configuration from environment variables.
//!
//! Every setting has a development default; production deployments
//! override via the environment. Configuration is loaded once at
//! startup and passed down explicitly — no global config singleton.

use mindmath_auth::AuthConfig;
use mindmath_db::DbConfig;
use tracing::warn;

const DEV_JWT_SECRET: &str = "dev-only-jwt-secret";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application name; doubles as the credential issuer.
    pub name: String,
    pub port: u16,
    pub auth: AuthConfig,
    pub db: DbConfig,
    /// Interval between expired-session sweeps, in seconds.
    pub sweep_interval_secs: u64,
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let name = env_or("APP_NAME", "mindmath-api");

        let port: u16 = env_or("APP_PORT", "8080")
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid APP_PORT: {e}"))?;

        let jwt_secret = env_or("JWT_SECRET", DEV_JWT_SECRET);
        if jwt_secret == DEV_JWT_SECRET {
            warn!("JWT_SECRET not set; using the development default");
        }

        let session_ttl_secs: u64 = env_or("SESSION_TTL_SECS", "86400")
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid SESSION_TTL_SECS: {e}"))?;

        let sweep_interval_secs: u64 = env_or("SWEEP_INTERVAL_SECS", "3600")
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid SWEEP_INTERVAL_SECS: {e}"))?;

        Ok(Self {
            auth: AuthConfig {
                jwt_secret,
                issuer: name.clone(),
                session_ttl_secs,
                min_password_length: 8,
            },
            db: DbConfig {
                url: env_or("SURREALDB_URL", "127.0.0.1:8000"),
                namespace: env_or("SURREALDB_NS", "mindmath"),
                database: env_or("SURREALDB_DB", "main"),
                username: env_or("SURREALDB_USER", "root"),
                password: env_or("SURREALDB_PASS", "root"),
            },
            name,
            port,
            sweep_interval_secs,
        })
    }
}
