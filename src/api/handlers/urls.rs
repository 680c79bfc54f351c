//! Handlers for route management endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::warn;
use url::Url;

use super::{bounded, bounded_raw};
use crate::api::dto::url::{ListUrlsParams, PutUrlRequest, RouteListResponse, RouteResponse};
use crate::domain::Route;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::StoreError;
use crate::utils::encode::encode_id;

/// Names that collide with service routes or store bookkeeping and cannot
/// be claimed. The store also rejects `next_id` on its own; listing it here
/// gives the caller the same 400 as the other reserved names.
const RESERVED_NAMES: &[&str] = &["api", "edit", "healthz", "next_id"];

/// Attempts at finding an unclaimed auto-generated name before giving up.
const MAX_ALLOC_ATTEMPTS: usize = 10;

const DEFAULT_PAGE_SIZE: usize = 100;
const MAX_PAGE_SIZE: usize = 1000;

/// Fetches a single route.
///
/// # Endpoint
///
/// `GET /api/url/{name}`
pub async fn get_url_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RouteResponse>, AppError> {
    let route = bounded(state.request_timeout, state.store.get(&name)).await?;
    Ok(Json(RouteResponse::from_route(
        name,
        &route,
        state.host.as_deref(),
    )))
}

/// Creates or overwrites a route under an explicit name.
///
/// # Endpoint
///
/// `POST /api/url/{name}`
///
/// The write is a full overwrite; there is no partial update.
pub async fn put_url_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<PutUrlRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    validate_name(&name)?;
    put_route(&state, name, req).await
}

/// Creates a route under an auto-allocated name.
///
/// # Endpoint
///
/// `POST /api/url`
///
/// Allocates an ID via the namespace counter and encodes it as a base-36
/// name. Allocation is collision-checked against manually claimed names and
/// retried a bounded number of times.
pub async fn put_auto_url_handler(
    State(state): State<AppState>,
    Json(req): Json<PutUrlRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let name = allocate_name(&state).await?;
    put_route(&state, name, req).await
}

/// Deletes a route. Idempotent: deleting an unknown name also returns 204.
///
/// # Endpoint
///
/// `DELETE /api/url/{name}`
pub async fn delete_url_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    bounded(state.request_timeout, state.store.del(&name)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists routes in ascending key order, paginated with a name cursor.
///
/// # Endpoint
///
/// `GET /api/urls?start=<name>&limit=<n>`
///
/// The listing is a snapshot taken when the request is handled; writes that
/// land during iteration are not reflected. A page that fills up carries a
/// `next` cursor naming the first route of the following page.
pub async fn list_urls_handler(
    Query(params): Query<ListUrlsParams>,
    State(state): State<AppState>,
) -> Result<Json<RouteListResponse>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let page = bounded(state.request_timeout, async {
        let mut iter = state.store.list(&params.start).await?;

        let mut routes = Vec::new();
        while routes.len() < limit && iter.advance().await {
            if let (Some(name), Some(route)) = (iter.name(), iter.route()) {
                routes.push(RouteResponse::from_route(
                    name.to_string(),
                    route,
                    state.host.as_deref(),
                ));
            }
        }

        // One extra advance to learn whether (and where) a next page starts.
        let next = if iter.advance().await {
            iter.name().map(str::to_string)
        } else {
            None
        };

        if let Some(e) = iter.last_error() {
            warn!("route listing ended early: {e}");
        }

        Ok::<_, StoreError>(RouteListResponse { routes, next })
    })
    .await?;

    Ok(Json(page))
}

async fn put_route(
    state: &AppState,
    name: String,
    req: PutUrlRequest,
) -> Result<Json<RouteResponse>, AppError> {
    let url = Url::parse(&req.url).map_err(|e| {
        AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
    })?;

    let route = Route::new(url);
    bounded(state.request_timeout, state.store.put(&name, &route)).await?;

    Ok(Json(RouteResponse::from_route(
        name,
        &route,
        state.host.as_deref(),
    )))
}

/// Allocates an unclaimed auto-generated name.
async fn allocate_name(state: &AppState) -> Result<String, AppError> {
    for _ in 0..MAX_ALLOC_ATTEMPTS {
        let id = bounded(state.request_timeout, state.store.next_id()).await?;
        let name = encode_id(id);

        // The counter never repeats, but a user may have claimed the same
        // name manually.
        match bounded_raw(state.request_timeout, state.store.get(&name)).await? {
            Err(StoreError::NotFound) => return Ok(name),
            Ok(_) => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::internal(
        "Could not allocate a route name",
        json!({ "attempts": MAX_ALLOC_ATTEMPTS }),
    ))
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::bad_request("Name must not be empty", json!({})));
    }
    if name.contains('/') || name.contains(char::is_whitespace) {
        return Err(AppError::bad_request(
            "Name must not contain slashes or whitespace",
            json!({ "name": name }),
        ));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(AppError::bad_request(
            "Name is reserved",
            json!({ "name": name }),
        ));
    }
    Ok(())
}
