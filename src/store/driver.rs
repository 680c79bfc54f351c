//! Key-value driver contract and store error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by the route store and its drivers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No value exists for the requested name.
    #[error("route not found")]
    NotFound,

    /// A record failed to decode into a [`crate::domain::Route`] (or, on
    /// the write path, to encode into its stored form).
    ///
    /// Fatal for single-record operations; bulk scans skip the record
    /// instead.
    #[error("stored record for '{name}' failed to decode")]
    CorruptRecord {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The name is reserved for store bookkeeping and cannot hold a route.
    #[error("name '{0}' is reserved")]
    ReservedName(String),

    /// The backing store rejected or failed an operation (I/O, backend
    /// error, closed connection). The store performs no automatic retry.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backing store could not be reached at construction time.
    #[error("failed to connect to store: {0}")]
    Connection(String),
}

/// Result type for store and driver operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Capability set a backing store must provide to the route store.
///
/// The driver is a stateless adapter over a live connection handle; it owns
/// no namespacing and makes no ordering guarantee for [`scan_keys`]. The
/// route store layer establishes filtering and sort order on top.
///
/// Implementations must be safe for concurrent use: every route store
/// operation may call into the driver from a different request task.
///
/// # Implementations
///
/// - [`crate::infrastructure::RedisDriver`] - production Redis backend
/// - [`crate::infrastructure::MemoryDriver`] - in-process backend for tests
///   and single-node deployments
///
/// [`scan_keys`]: KvDriver::scan_keys
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KvDriver: Send + Sync {
    /// Fetches the raw value for `key`.
    ///
    /// Returns `Ok(None)` when the key is absent. An absent key is distinct
    /// from an empty value (`Ok(Some(vec![]))`).
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Writes `value` under `key`, overwriting any existing value.
    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Removes `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Returns all keys matching `pattern` (glob-style, e.g. `prefix:*`),
    /// in no particular order.
    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>>;

    /// Atomically increments the integer at `key` and returns the new value.
    ///
    /// Must be atomic across processes; callers rely on it for collision-free
    /// ID allocation. An absent key starts from zero.
    async fn increment(&self, key: &str) -> StoreResult<u64>;

    /// Lightweight connectivity check.
    async fn ping(&self) -> StoreResult<()>;
}

// Lets the store be used as `RouteStore<Box<dyn KvDriver>>` where the
// concrete backend is chosen at runtime.
#[async_trait]
impl<T: KvDriver + ?Sized> KvDriver for Box<T> {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key).await
    }

    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        (**self).scan_keys(pattern).await
    }

    async fn increment(&self, key: &str) -> StoreResult<u64> {
        (**self).increment(key).await
    }

    async fn ping(&self) -> StoreResult<()> {
        (**self).ping().await
    }
}
