//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use super::bounded_raw;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::StoreError;

/// Redirects a short name to its destination URL.
///
/// # Endpoint
///
/// `GET /{name}`
///
/// A name with no stored route is not an error from the visitor's point of
/// view: the response redirects to the creation flow (`/edit/{name}`) so the
/// link can be claimed. Any other store failure is an opaque 500; a deadline
/// overrun is a 504.
pub async fn redirect_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    match bounded_raw(state.request_timeout, state.store.get(&name)).await? {
        Ok(route) => Ok(Redirect::temporary(&route.url)),
        Err(StoreError::NotFound) => Ok(Redirect::temporary(&format!("/edit/{name}"))),
        Err(e) => Err(e.into()),
    }
}
