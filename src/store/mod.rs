//! Backend-agnostic route storage.
//!
//! [`RouteStore`] provides namespace-aware CRUD and enumeration over
//! [`Route`] records, generic over the [`KvDriver`] capability set so the
//! backing store can be swapped without touching store or iterator logic.
//!
//! Error policy: single-record lookups are strict (a record that fails to
//! decode surfaces [`StoreError::CorruptRecord`]), bulk reads are
//! best-effort ([`RouteStore::get_all`] skips undecodable records, the
//! iterator stops cleanly). This asymmetry is deliberate and covered by
//! tests; do not "fix" one side to match the other.

pub mod driver;
pub mod iterator;

pub use driver::{KvDriver, StoreError, StoreResult};
pub use iterator::RouteIterator;

use std::collections::HashMap;

use crate::domain::Route;

/// Key reserved inside each namespace for the auto-increment counter.
const NEXT_ID_KEY: &str = "next_id";

/// Maps logical route names to physical store keys and back.
///
/// All prefixing lives here so the add/strip pair can never disagree.
/// `unkey` is the exact inverse of `key`; it returns `None` for keys
/// outside the namespace.
#[derive(Debug, Clone)]
pub(crate) struct KeySpace {
    prefix: String,
}

impl KeySpace {
    fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Physical key for a logical name: `<prefix>:<name>`.
    pub(crate) fn key(&self, name: &str) -> String {
        format!("{}:{}", self.prefix, name)
    }

    /// Logical name for a physical key, or `None` if the key does not
    /// belong to this namespace.
    pub(crate) fn unkey<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(&self.prefix)?.strip_prefix(':')
    }

    /// Glob pattern matching every key in the namespace.
    fn scan_pattern(&self) -> String {
        format!("{}:*", self.prefix)
    }
}

/// Namespace-aware route storage over an arbitrary key-value driver.
///
/// A store is constructed once at startup with a fixed key prefix; changing
/// the prefix at runtime is unsupported and would orphan existing keys.
/// The store holds no mutable state of its own and is safe to share across
/// request tasks. It never logs; every failure is a typed [`StoreError`].
pub struct RouteStore<D: KvDriver> {
    driver: D,
    keys: KeySpace,
}

impl<D: KvDriver> RouteStore<D> {
    /// Creates a store namespacing all keys under `prefix`.
    pub fn new(driver: D, prefix: impl Into<String>) -> Self {
        Self {
            driver,
            keys: KeySpace::new(prefix),
        }
    }

    /// Fetches the route stored under `name`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no value exists for the name.
    /// - [`StoreError::CorruptRecord`] if the stored bytes do not decode;
    ///   never swallowed here, the rest of the system relies on the
    ///   returned route being exact.
    ///
    /// The counter key is not a route; looking it up is always `NotFound`
    /// regardless of whether the counter has been touched.
    pub async fn get(&self, name: &str) -> StoreResult<Route> {
        if name == NEXT_ID_KEY {
            return Err(StoreError::NotFound);
        }
        let key = self.keys.key(name);
        let bytes = self.driver.get(&key).await?.ok_or(StoreError::NotFound)?;
        Route::decode(&bytes).map_err(|source| StoreError::CorruptRecord {
            name: name.to_string(),
            source,
        })
    }

    /// Stores `route` under `name`, overwriting any existing record.
    ///
    /// There is no optimistic concurrency check; the last write wins.
    ///
    /// # Errors
    ///
    /// [`StoreError::ReservedName`] if `name` is the counter key. Allowing
    /// the write would clobber the counter and the record would be
    /// invisible to [`RouteStore::list`] and [`RouteStore::get_all`].
    pub async fn put(&self, name: &str, route: &Route) -> StoreResult<()> {
        if name == NEXT_ID_KEY {
            return Err(StoreError::ReservedName(name.to_string()));
        }
        let key = self.keys.key(name);
        let bytes = route.encode().map_err(|source| StoreError::CorruptRecord {
            name: name.to_string(),
            source,
        })?;
        self.driver.set(&key, &bytes).await
    }

    /// Removes the route stored under `name`. Idempotent: deleting a name
    /// that was never written succeeds. The counter key is never a route,
    /// so deleting it is a no-op rather than a counter reset.
    pub async fn del(&self, name: &str) -> StoreResult<()> {
        if name == NEXT_ID_KEY {
            return Ok(());
        }
        self.driver.delete(&self.keys.key(name)).await
    }

    /// Returns an iterator over routes whose physical key is
    /// lexicographically >= the namespaced form of `start` (all routes when
    /// `start` is empty), in ascending byte order of the physical key.
    ///
    /// The candidate key set is captured once, here. Writes that land after
    /// this call are not reflected in the iteration; a record deleted
    /// mid-iteration ends the scan cleanly. This staleness window is part
    /// of the contract.
    pub async fn list(&self, start: &str) -> StoreResult<RouteIterator<'_, D>> {
        let mut keys = self.driver.scan_keys(&self.keys.scan_pattern()).await?;
        if !start.is_empty() {
            let from = self.keys.key(start);
            keys.retain(|k| k.as_str() >= from.as_str());
        }
        // The counter lives in the same namespace but is not a route.
        let counter = self.keys.key(NEXT_ID_KEY);
        keys.retain(|k| *k != counter);
        keys.sort_unstable();
        Ok(RouteIterator::new(&self.driver, &self.keys, keys))
    }

    /// Bulk read of every route in the namespace.
    ///
    /// Best-effort: records that vanish mid-scan or fail to decode are
    /// skipped, not surfaced. Use [`RouteStore::get`] when a missing or
    /// corrupt record must be an error.
    pub async fn get_all(&self) -> StoreResult<HashMap<String, Route>> {
        let keys = self.driver.scan_keys(&self.keys.scan_pattern()).await?;

        let mut routes = HashMap::new();
        for key in keys {
            let Some(name) = self.keys.unkey(&key) else {
                continue;
            };
            if name == NEXT_ID_KEY {
                continue;
            }
            let Ok(Some(bytes)) = self.driver.get(&key).await else {
                continue;
            };
            let Ok(route) = Route::decode(&bytes) else {
                continue;
            };
            routes.insert(name.to_string(), route);
        }

        Ok(routes)
    }

    /// Atomically allocates the next numeric ID in this namespace.
    ///
    /// Delegates to the driver's atomic increment; concurrent callers from
    /// any number of processes never observe the same value.
    pub async fn next_id(&self) -> StoreResult<u64> {
        self.driver.increment(&self.keys.key(NEXT_ID_KEY)).await
    }

    /// Connectivity check, delegated to the driver.
    pub async fn ping(&self) -> StoreResult<()> {
        self.driver.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::driver::MockKvDriver;
    use super::*;

    fn store(driver: MockKvDriver) -> RouteStore<MockKvDriver> {
        RouteStore::new(driver, "golinks")
    }

    #[test]
    fn test_keyspace_round_trip() {
        let ks = KeySpace::new("golinks");
        assert_eq!(ks.key("abc"), "golinks:abc");
        assert_eq!(ks.unkey("golinks:abc"), Some("abc"));
        assert_eq!(ks.unkey("golinks:a:b"), Some("a:b"));
        assert_eq!(ks.unkey("other:abc"), None);
        assert_eq!(ks.unkey("golinks"), None);
        assert_eq!(ks.scan_pattern(), "golinks:*");
    }

    #[tokio::test]
    async fn test_get_maps_absent_to_not_found() {
        let mut driver = MockKvDriver::new();
        driver
            .expect_get()
            .withf(|key| key == "golinks:missing")
            .returning(|_| Ok(None));

        let err = store(driver).get("missing").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_get_surfaces_corrupt_record() {
        let mut driver = MockKvDriver::new();
        driver
            .expect_get()
            .returning(|_| Ok(Some(b"{broken".to_vec())));

        let err = store(driver).get("bad").await.unwrap_err();
        assert!(matches!(err, StoreError::CorruptRecord { ref name, .. } if name == "bad"));
    }

    #[tokio::test]
    async fn test_get_propagates_driver_failure() {
        let mut driver = MockKvDriver::new();
        driver
            .expect_get()
            .returning(|_| Err(StoreError::Unavailable("connection reset".into())));

        let err = store(driver).get("any").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_put_writes_namespaced_key() {
        let route = Route::new("https://example.com");
        let encoded = route.encode().unwrap();

        let mut driver = MockKvDriver::new();
        driver
            .expect_set()
            .withf(move |key, value| key == "golinks:abc" && value == encoded.as_slice())
            .once()
            .returning(|_, _| Ok(()));

        store(driver).put("abc", &route).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_propagates_scan_failure() {
        let mut driver = MockKvDriver::new();
        driver
            .expect_scan_keys()
            .returning(|_| Err(StoreError::Unavailable("timeout".into())));

        let st = store(driver);
        assert!(st.list("").await.is_err());
    }

    #[tokio::test]
    async fn test_get_all_skips_undecodable_records() {
        let mut driver = MockKvDriver::new();
        driver.expect_scan_keys().returning(|_| {
            Ok(vec![
                "golinks:good".to_string(),
                "golinks:bad".to_string(),
                "golinks:next_id".to_string(),
            ])
        });
        driver.expect_get().returning(|key| match key {
            "golinks:good" => Ok(Some(Route::new("https://example.com").encode().unwrap())),
            "golinks:bad" => Ok(Some(b"garbage".to_vec())),
            other => panic!("unexpected get for {other}"),
        });

        let routes = store(driver).get_all().await.unwrap();
        assert_eq!(routes.len(), 1);
        assert!(routes.contains_key("good"));
    }

    #[tokio::test]
    async fn test_counter_key_is_not_a_route() {
        // None of these may reach the driver.
        let st = store(MockKvDriver::new());

        let err = st.get("next_id").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));

        let err = st
            .put("next_id", &Route::new("https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ReservedName(ref name) if name == "next_id"));

        st.del("next_id").await.unwrap();
    }

    #[tokio::test]
    async fn test_next_id_uses_counter_key() {
        let mut driver = MockKvDriver::new();
        driver
            .expect_increment()
            .withf(|key| key == "golinks:next_id")
            .returning(|_| Ok(7));

        assert_eq!(store(driver).next_id().await.unwrap(), 7);
    }
}
