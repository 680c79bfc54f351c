//! Redis-backed key-value driver.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tracing::info;

use crate::store::{KvDriver, StoreError, StoreResult};

/// Production [`KvDriver`] over a Redis connection.
///
/// Uses `ConnectionManager` for connection reuse and reconnects; the manager
/// is cheap to clone and safe for concurrent callers, so the process holds a
/// single driver shared by all request tasks.
pub struct RedisDriver {
    conn: ConnectionManager,
}

impl RedisDriver {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails. Callers treat
    /// this as fatal at startup.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("failed to create Redis client: {e}"))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("failed to connect to Redis: {e}")))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {e}")))?;

        info!("✓ Connected to Redis");

        Ok(Self { conn: manager })
    }
}

fn map_err(e: redis::RedisError) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl KvDriver for RedisDriver {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<Vec<u8>>>(key).await.map_err(map_err)
    }

    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await.map_err(map_err)
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(map_err)
    }

    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.conn.clone();
        conn.keys::<_, Vec<String>>(pattern).await.map_err(map_err)
    }

    async fn increment(&self, key: &str) -> StoreResult<u64> {
        let mut conn = self.conn.clone();
        // INCR is atomic server-side; never read-modify-write here.
        conn.incr::<_, _, u64>(key, 1u64).await.map_err(map_err)
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.map_err(map_err)
    }
}
