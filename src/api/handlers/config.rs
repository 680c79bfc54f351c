//! Handler for the service configuration endpoint.

use axum::{extract::State, Json};

use crate::api::dto::config::ConfigResponse;
use crate::state::AppState;

/// Exposes the configuration API clients need to render short links.
///
/// # Endpoint
///
/// `GET /api/config`
pub async fn config_handler(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        host: state.host.clone(),
    })
}
