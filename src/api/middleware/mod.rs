//! Request processing middleware.

pub mod auth;
pub mod tracing;
