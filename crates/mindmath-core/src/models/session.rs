//! Session domain model.
//!
//! One row per authenticated device/browser instance. A session is
//! valid strictly while `now < expires_at` AND the row still exists;
//! deleting the row revokes the session immediately, regardless of
//! any expiry embedded in a previously minted credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    /// High-entropy opaque token linking credentials back to this row.
    /// Unique across all sessions, never reused, immutable.
    pub session_token: String,
    /// Provenance metadata, advisory only.
    pub ip_address: Option<String>,
    pub device_info: Option<String>,
    /// `created_at + TTL` at issuance; never extended.
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    pub user_id: Uuid,
    pub session_token: String,
    pub ip_address: Option<String>,
    pub device_info: Option<String>,
    pub expires_at: DateTime<Utc>,
}
