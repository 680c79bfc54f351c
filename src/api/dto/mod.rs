//! Data Transfer Objects for API requests and responses.

pub mod config;
pub mod health;
pub mod url;
