//! In-process key-value driver.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::store::{KvDriver, StoreError, StoreResult};

/// [`KvDriver`] backed by a process-local map.
///
/// Used by the test suite and by `BACKEND=memory` runs where persistence
/// across restarts is not needed. Counters share the value map, mirroring
/// Redis semantics where INCR operates on a plain string key.
#[derive(Default)]
pub struct MemoryDriver {
    data: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Matches a key against a glob pattern supporting a single trailing `*`,
/// which is the only shape the store emits.
fn matches(pattern: &str, key: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix),
        None => key == pattern,
    }
}

#[async_trait]
impl KvDriver for MemoryDriver {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let data = self.data.lock().expect("memory driver poisoned");
        Ok(data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut data = self.data.lock().expect("memory driver poisoned");
        data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut data = self.data.lock().expect("memory driver poisoned");
        data.remove(key);
        Ok(())
    }

    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let data = self.data.lock().expect("memory driver poisoned");
        Ok(data
            .keys()
            .filter(|k| matches(pattern, k))
            .cloned()
            .collect())
    }

    async fn increment(&self, key: &str) -> StoreResult<u64> {
        let mut data = self.data.lock().expect("memory driver poisoned");
        let current = match data.get(key) {
            None => 0,
            Some(bytes) => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .ok_or_else(|| {
                    StoreError::Unavailable(format!("key '{key}' holds a non-integer value"))
                })?,
        };
        let next = current.wrapping_add(1);
        data.insert(key.to_string(), next.to_string().into_bytes());
        Ok(next)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
