//! Authentication configuration.

/// Configuration for the authentication service.
///
/// Passed explicitly at construction — the auth core carries no
/// ambient global state.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric HS256 signing key, held only by the server process.
    pub jwt_secret: String,
    /// JWT issuer (`iss` claim).
    pub issuer: String,
    /// Session lifetime in seconds (default: 86_400 = 24 hours).
    /// Applied once at issuance; expiry never slides.
    pub session_ttl_secs: u64,
    /// Minimum password length for registration policy.
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: "mindmath".into(),
            session_ttl_secs: 86_400,
            min_password_length: 8,
        }
    }
}
