//! HTTP request handlers for API endpoints.

pub mod config;
pub mod health;
pub mod redirect;
pub mod urls;

pub use config::config_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use urls::{
    delete_url_handler, get_url_handler, list_urls_handler, put_auto_url_handler, put_url_handler,
};

use std::future::Future;
use std::time::Duration;

use serde_json::json;
use tokio::time::timeout;

use crate::error::AppError;
use crate::store::StoreResult;

/// Runs a store operation under the per-request deadline, keeping the
/// store-level result intact for callers that branch on specific errors.
///
/// Timeouts surface as a distinct 504, never as not-found or an internal
/// error; the operation itself is simply abandoned (store operations are
/// not transactional, so there is nothing to roll back).
pub(crate) async fn bounded_raw<T>(
    limit: Duration,
    op: impl Future<Output = StoreResult<T>>,
) -> Result<StoreResult<T>, AppError> {
    timeout(limit, op)
        .await
        .map_err(|_| AppError::timeout("Store operation timed out", json!({})))
}

/// Like [`bounded_raw`], but maps any store error straight to its API
/// response.
pub(crate) async fn bounded<T>(
    limit: Duration,
    op: impl Future<Output = StoreResult<T>>,
) -> Result<T, AppError> {
    bounded_raw(limit, op).await?.map_err(AppError::from)
}
