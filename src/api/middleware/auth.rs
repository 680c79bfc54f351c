//! Shared-secret API key middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Header carrying the shared secret for internal API routes.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authenticates requests against the configured static API key.
///
/// # Header Format
///
/// ```text
/// X-Api-Key: <key>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, empty, or does not
/// match the configured key. A service configured with an empty key rejects
/// every API request.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if presented.is_empty() || presented != st.api_key {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "missing or invalid API key" }),
        ));
    }

    Ok(next.run(req).await)
}
