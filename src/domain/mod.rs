//! Domain layer containing the core business entity.
//!
//! The [`route::Route`] entity is the single persisted record of the
//! system. Data access contracts live in [`crate::store`]; concrete
//! backends in [`crate::infrastructure`].

pub mod route;

pub use route::Route;
