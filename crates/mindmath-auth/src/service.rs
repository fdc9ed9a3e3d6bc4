//! Authentication service — credential issuance, validation, and
//! revocation orchestration.

use chrono::{Duration, Utc};
use mindmath_core::error::AppError;
use mindmath_core::models::session::CreateSession;
use mindmath_core::models::user::User;
use mindmath_core::repository::SessionRepository;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::token;

/// Identity resolved from a validated credential.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user_id: Uuid,
    pub session_id: Uuid,
}

/// Sole authority for turning a user identity into a usable
/// credential and for answering "is this credential currently valid,
/// and for whom".
///
/// Generic over the session store so the auth layer has no dependency
/// on the database crate. Holds no mutable state of its own — all
/// durable state lives in the store, so concurrent calls need no
/// in-process locking.
pub struct AuthService<S: SessionRepository> {
    sessions: S,
    config: AuthConfig,
}

impl<S: SessionRepository> AuthService<S> {
    pub fn new(sessions: S, config: AuthConfig) -> Self {
        Self { sessions, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Create a session for the user and mint a credential bound to
    /// it. If the store rejects the session, no credential is minted.
    pub async fn issue(
        &self,
        user: &User,
        ip_address: Option<String>,
        device_info: Option<String>,
    ) -> Result<String, AuthError> {
        let session_token = token::generate_session_token();
        let expires_at = Utc::now() + Duration::seconds(self.config.session_ttl_secs as i64);

        let session = self
            .sessions
            .create(CreateSession {
                user_id: user.id,
                session_token,
                ip_address,
                device_info,
                expires_at,
            })
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        // The credential's expiry mirrors the session row exactly.
        token::encode_credential(user.id, &session.session_token, expires_at, &self.config)
    }

    /// Verify a credential and resolve the identity behind it.
    ///
    /// The signed claims are only a pre-filter: the session row is
    /// fetched and checked for freshness on every call, which is what
    /// makes revocation effective immediately instead of at natural
    /// token expiry.
    pub async fn validate(&self, credential: &str) -> Result<Authenticated, AuthError> {
        let claims = token::decode_credential(credential, &self.config)?;

        Uuid::parse_str(&claims.sub)
            .map_err(|e| AuthError::InvalidCredential(format!("malformed sub claim: {e}")))?;

        let session = self
            .sessions
            .get_by_token(&claims.session_token)
            .await
            .map_err(|e| match e {
                AppError::NotFound { .. } => AuthError::SessionNotFound,
                other => AuthError::Store(other.to_string()),
            })?;

        // The stored expiry is ground truth, not the signed claim.
        if Utc::now() >= session.expires_at {
            return Err(AuthError::SessionExpired);
        }

        Ok(Authenticated {
            user_id: session.user_id,
            session_id: session.id,
        })
    }

    /// Revoke a single session. Idempotent — an already-absent id is
    /// success, not an error.
    pub async fn revoke_one(&self, session_id: Uuid) -> Result<(), AuthError> {
        match self.sessions.delete_by_id(session_id).await {
            Ok(()) | Err(AppError::NotFound { .. }) => {
                tracing::debug!(%session_id, "session revoked");
                Ok(())
            }
            Err(e) => Err(AuthError::Store(e.to_string())),
        }
    }

    /// Revoke every session owned by the user ("log out of all
    /// devices"). Returns the number of sessions deleted.
    pub async fn revoke_all(&self, user_id: Uuid) -> Result<u64, AuthError> {
        let count = self
            .sessions
            .delete_all_for_user(user_id)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        tracing::debug!(%user_id, count, "all sessions revoked for user");
        Ok(count)
    }

    /// Delete session rows past their expiry. Hygiene only — expired
    /// rows already fail validation without being swept.
    pub async fn sweep_expired(&self) -> Result<u64, AuthError> {
        let count = self
            .sessions
            .delete_expired()
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        if count > 0 {
            tracing::debug!(count, "expired sessions deleted");
        }
        Ok(count)
    }
}
