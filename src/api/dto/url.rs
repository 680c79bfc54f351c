//! DTOs for the route management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Route;

/// Request to create or overwrite a route.
#[derive(Debug, Deserialize)]
pub struct PutUrlRequest {
    /// Destination URL. Must parse as an absolute URL.
    pub url: String,
}

/// A route as presented by the API.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub name: String,
    pub url: String,
    pub time: DateTime<Utc>,

    /// Full short link, present when the service is configured with a host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl RouteResponse {
    pub fn from_route(name: String, route: &Route, host: Option<&str>) -> Self {
        let source_url = host.map(|h| format!("https://{h}/{name}"));
        Self {
            name,
            url: route.url.clone(),
            time: route.created_at,
            source_url,
        }
    }
}

/// Query parameters for the route listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListUrlsParams {
    /// Resume listing from this name (inclusive).
    #[serde(default)]
    pub start: String,
    /// Maximum number of routes returned in one page.
    pub limit: Option<usize>,
}

/// One page of routes.
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub routes: Vec<RouteResponse>,

    /// Pass as `start` to fetch the next page; absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}
