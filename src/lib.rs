//! # golinks
//!
//! A short-link redirection service: short names map to destination URLs,
//! visitors get redirected, and an internal API creates and inspects
//! mappings.
//!
//! ## Architecture
//!
//! - **Domain** ([`domain`]) - The [`domain::Route`] entity and its wire
//!   encoding
//! - **Store** ([`store`]) - Backend-agnostic route storage: the
//!   [`store::KvDriver`] capability set, [`store::RouteStore`] and the
//!   ordered, seekable [`store::RouteIterator`]
//! - **Infrastructure** ([`infrastructure`]) - Concrete drivers (Redis,
//!   in-memory)
//! - **API** ([`api`]) - Axum handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"
//! export API_KEY="change-me"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::domain::Route;
    pub use crate::error::AppError;
    pub use crate::state::{AppState, DynRouteStore};
    pub use crate::store::{KvDriver, RouteStore, StoreError};
}
