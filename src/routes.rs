//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{name}`   - Short link redirect (public)
//! - `GET /healthz`  - Health check: store connectivity (public)
//! - `/api/*`        - Management API (`X-Api-Key` required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Static shared-secret header for `/api`
//! - **Path normalization** - Trailing slash handling

use axum::routing::get;
use axum::{middleware, Router};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let router = Router::new()
        .route("/{name}", get(redirect_handler))
        .route("/healthz", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
