//! Credential codec — signed, time-bounded bearer tokens — and
//! opaque session token generation.
//!
//! Credentials are HS256 JWTs binding a user id to a session token.
//! The codec is purely cryptographic/structural; it never touches the
//! session store. The signed expiry is a fast pre-filter only — the
//! session row remains ground truth.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialClaims {
    /// Subject — user ID (UUID string).
    pub sub: String,
    /// Opaque token of the backing session row.
    pub session_token: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Not-before (Unix timestamp).
    pub nbf: i64,
    /// Expiration (Unix timestamp) — equals the session's
    /// `expires_at` at mint time; the two must never diverge.
    pub exp: i64,
}

/// Encode a signed HS256 credential.
pub fn encode_credential(
    user_id: Uuid,
    session_token: &str,
    expires_at: DateTime<Utc>,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = CredentialClaims {
        sub: user_id.to_string(),
        session_token: session_token.to_string(),
        iss: config.issuer.clone(),
        iat: now,
        nbf: now,
        exp: expires_at.timestamp(),
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    let header = Header::new(Algorithm::HS256);
    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("credential encode: {e}")))
}

/// Decode and verify a credential.
///
/// Only HS256 is accepted — a token declaring any other algorithm
/// fails verification, so signature-stripping and algorithm-confusion
/// tokens are rejected. Zero leeway keeps the codec's expiry check in
/// agreement with the store-side comparison.
pub fn decode_credential(
    credential: &str,
    config: &AuthConfig,
) -> Result<CredentialClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_nbf = true;
    validation.set_issuer(&[&config.issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "nbf", "iss"]);

    jsonwebtoken::decode::<CredentialClaims>(credential, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
            _ => AuthError::InvalidCredential(e.to_string()),
        })
}

/// Generate a cryptographically random opaque session token
/// (32 bytes → base64url-encoded, no padding).
pub fn generate_session_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rand::Rng::random(&mut rng);
    URL_SAFE_NO_PAD.encode(bytes)
}
