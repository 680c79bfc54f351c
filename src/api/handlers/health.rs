//! Handler for health check endpoint.

use axum::{extract::State, http::StatusCode, Json};
use tokio::time::timeout;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// # Response Codes
///
/// - **200 OK**: backing store reachable
/// - **503 Service Unavailable**: store ping failed or timed out
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;

    let healthy = store_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { store: store_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks backing store connectivity via PING, bounded by the request
/// deadline.
async fn check_store(state: &AppState) -> CheckStatus {
    match timeout(state.request_timeout, state.store.ping()).await {
        Ok(Ok(())) => CheckStatus {
            status: "ok".to_string(),
            message: Some("Store connected".to_string()),
        },
        Ok(Err(e)) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Store error: {e}")),
        },
        Err(_) => CheckStatus {
            status: "error".to_string(),
            message: Some("Store ping timed out".to_string()),
        },
    }
}
