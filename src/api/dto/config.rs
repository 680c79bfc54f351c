//! DTO for the service configuration endpoint.

use serde::Serialize;

/// Subset of service configuration exposed to API clients.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub host: Option<String>,
}
