//! Domain models for the MindMath backend.
//!
//! These are fixed-shape types shared across all crates. The wider
//! app (exercises, progress, learning paths) lives behind its own
//! repositories and is not part of this core.

pub mod session;
pub mod user;
