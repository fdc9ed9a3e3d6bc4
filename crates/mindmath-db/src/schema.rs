//! SurrealDB schema and migration runner.
//!
//! Tables are SCHEMAFULL; UUIDs are stored as record-id strings.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

/// Ordered list of schema migrations as (version, name, DDL). Append
/// only; never edit an entry that has shipped.
const MIGRATIONS: &[(u32, &str, &str)] = &[(1, "initial_schema", SCHEMA_V1)];

const TRACKING_DDL: &str = "
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration COLUMNS version UNIQUE;
";

const SCHEMA_V1: &str = "
-- accounts
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD username ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD first_name ON TABLE user TYPE string;
DEFINE FIELD last_name ON TABLE user TYPE string;
DEFINE FIELD last_login_at ON TABLE user TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE user TYPE datetime DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;
DEFINE INDEX idx_user_username ON TABLE user COLUMNS username UNIQUE;

-- sessions; the unique token index is what turns a (negligible)
-- token collision into a create error instead of an overwrite
DEFINE TABLE session SCHEMAFULL;
DEFINE FIELD user_id ON TABLE session TYPE string;
DEFINE FIELD session_token ON TABLE session TYPE string;
DEFINE FIELD ip_address ON TABLE session TYPE option<string>;
DEFINE FIELD device_info ON TABLE session TYPE option<string>;
DEFINE FIELD expires_at ON TABLE session TYPE datetime;
DEFINE FIELD created_at ON TABLE session TYPE datetime DEFAULT time::now();
DEFINE INDEX idx_session_token ON TABLE session COLUMNS session_token UNIQUE;
DEFINE INDEX idx_session_user ON TABLE session COLUMNS user_id;
DEFINE INDEX idx_session_expires ON TABLE session COLUMNS expires_at;
";

#[derive(Debug, SurrealValue)]
struct MigrationRow {
    version: u32,
}

async fn current_version<C: Connection>(db: &Surreal<C>) -> Result<u32, DbError> {
    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let rows: Vec<MigrationRow> = result.take(0)?;
    Ok(rows.first().map(|r| r.version).unwrap_or(0))
}

/// Apply pending migrations. Safe to run on every startup: the
/// tracking DDL is idempotent and applied versions are recorded in
/// `_migration`.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(TRACKING_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let applied = current_version(db).await?;
    for &(version, name, sql) in MIGRATIONS {
        if version <= applied {
            continue;
        }
        tracing::info!(version, name, "applying migration");

        db.query(sql)
            .await?
            .check()
            .map_err(|e| DbError::Migration(format!("v{version} {name}: {e}")))?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", version))
            .bind(("name", name))
            .await?
            .check()
            .map_err(|e| DbError::Migration(format!("recording v{version}: {e}")))?;
    }

    Ok(())
}
