//! MindMath Auth — session-backed bearer credential issuance,
//! validation, and revocation.
//!
//! A credential is only accepted when it is cryptographically valid
//! AND a live session row backs it, so logout takes effect on the
//! very next request instead of at natural token expiry.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{Authenticated, AuthService};
pub use token::CredentialClaims;
