//! HTTP route handlers.

pub mod generators;
pub mod health;
