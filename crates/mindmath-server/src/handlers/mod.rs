//! HTTP request handlers.

pub mod user;
