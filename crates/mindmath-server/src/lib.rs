//! MindMath Server — HTTP surface for the mental-math backend.
//!
//! Library target so the router can be exercised in integration
//! tests; the binary in `main.rs` is a thin wrapper.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod sweep;

pub use config::AppConfig;
pub use state::AppState;
