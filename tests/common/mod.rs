#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::{middleware, Router};
use golinks::api::handlers::{health_handler, redirect_handler};
use golinks::api::middleware::auth;
use golinks::api::routes::protected_routes;
use golinks::infrastructure::MemoryDriver;
use golinks::state::{AppState, DynRouteStore};
use golinks::store::{KvDriver, RouteStore};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_PREFIX: &str = "golinks";

pub fn memory_store() -> Arc<DynRouteStore> {
    let driver: Box<dyn KvDriver> = Box::new(MemoryDriver::new());
    Arc::new(RouteStore::new(driver, TEST_PREFIX))
}

pub fn create_test_state() -> AppState {
    AppState::new(
        memory_store(),
        Some("go.example.com".to_string()),
        TEST_API_KEY.to_string(),
        Duration::from_secs(5),
    )
}

/// Router covering the public surface (redirect + health).
pub fn public_app(state: AppState) -> Router {
    Router::new()
        .route("/{name}", get(redirect_handler))
        .route("/healthz", get(health_handler))
        .with_state(state)
}

/// Router covering `/api` behind the shared-secret middleware.
pub fn api_app(state: AppState) -> Router {
    let api = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    Router::new().nest("/api", api).with_state(state)
}

pub async fn seed_route(state: &AppState, name: &str, url: &str) {
    state
        .store
        .put(name, &golinks::domain::Route::new(url))
        .await
        .unwrap();
}
