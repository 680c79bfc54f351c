//! API route configuration.
//!
//! All API endpoints require the shared-secret header enforced by
//! [`crate::api::middleware::auth`].

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers::{
    config_handler, delete_url_handler, get_url_handler, list_urls_handler, put_auto_url_handler,
    put_url_handler,
};
use crate::state::AppState;

/// All API routes, protected by the API key middleware.
///
/// # Endpoints
///
/// - `POST   /url`         - Create a route under an auto-allocated name
/// - `GET    /url/{name}`  - Fetch a route
/// - `POST   /url/{name}`  - Create or overwrite a route
/// - `DELETE /url/{name}`  - Delete a route (idempotent)
/// - `GET    /urls`        - List routes (name-cursor pagination)
/// - `GET    /config`      - Service configuration for clients
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/url", post(put_auto_url_handler))
        .route(
            "/url/{name}",
            get(get_url_handler)
                .post(put_url_handler)
                .delete(delete_url_handler),
        )
        .route("/urls", get(list_urls_handler))
        .route("/config", get(config_handler))
}
