//! HTTP server initialization and runtime setup.
//!
//! Handles backend selection, store construction, and Axum server
//! lifecycle including graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::ServiceExt;

use crate::config::{Backend, Config};
use crate::infrastructure::{MemoryDriver, RedisDriver};
use crate::routes::app_router;
use crate::state::AppState;
use crate::store::{KvDriver, RouteStore};

/// Runs the HTTP server with the given configuration.
///
/// Initializes the selected key-value backend (a failed connection is fatal
/// and prevents startup), the route store, and the Axum server. The store
/// connection is a process-wide resource: it is created once here and
/// released when the server future completes, on both clean shutdown and
/// error paths.
///
/// # Errors
///
/// Returns an error if the backend is unreachable, the bind fails, or the
/// server runtime errors.
pub async fn run(config: Config) -> Result<()> {
    let driver: Box<dyn KvDriver> = match config.backend {
        Backend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("redis backend selected but no Redis URL configured")?;
            Box::new(
                RedisDriver::connect(url)
                    .await
                    .context("failed to initialize the Redis backend")?,
            )
        }
        Backend::Memory => {
            tracing::warn!("Using in-memory backend; routes will not survive a restart");
            Box::new(MemoryDriver::new())
        }
    };

    let store = Arc::new(RouteStore::new(driver, config.key_prefix.clone()));
    store.ping().await.context("store connectivity check failed")?;
    tracing::info!("Route store ready (prefix '{}')", config.key_prefix);

    let state = AppState::new(
        store,
        config.host.clone(),
        config.api_key.clone(),
        Duration::from_secs(config.request_timeout_secs),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
