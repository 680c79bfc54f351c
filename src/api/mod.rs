//! HTTP layer translating requests into store operations.
//!
//! # Modules
//!
//! - [`dto`] - Request/response serialization types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication and request tracing
//! - [`routes`] - API route table

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
