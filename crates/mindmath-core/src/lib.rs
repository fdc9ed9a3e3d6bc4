//! MindMath Core — domain models, repository traits, and shared
//! error types for the mental-math training backend.

pub mod error;
pub mod models;
pub mod repository;
