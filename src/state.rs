//! Shared application state injected into all handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::store::{KvDriver, RouteStore};

/// Route store over a backend chosen at startup.
pub type DynRouteStore = RouteStore<Box<dyn KvDriver>>;

/// State shared across request tasks.
///
/// Holds the process-wide store handle (created once at startup) plus the
/// few config values the handlers need. Cloning is cheap; the store itself
/// is never cloned.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DynRouteStore>,
    /// Host used when rendering the source URL of a link; `None` means the
    /// response omits it.
    pub host: Option<String>,
    /// Shared secret expected in the `X-Api-Key` header for `/api` routes.
    pub api_key: String,
    /// Deadline applied to every store call made on behalf of a request.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        store: Arc<DynRouteStore>,
        host: Option<String>,
        api_key: String,
        request_timeout: Duration,
    ) -> Self {
        Self {
            store,
            host,
            api_key,
            request_timeout,
        }
    }
}
