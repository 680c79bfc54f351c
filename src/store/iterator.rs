//! Seekable cursor over a captured, sorted key range.

use crate::domain::Route;
use crate::store::driver::{KvDriver, StoreError};
use crate::store::KeySpace;

/// A restartable, seekable cursor over routes captured by
/// [`crate::store::RouteStore::list`].
///
/// The key set is a snapshot: it was collected and sorted when the iterator
/// was created and is never refreshed. Values are fetched and decoded
/// lazily, one per [`advance`]. Fetch and decode failures are absorbed: the
/// iterator becomes exhausted and [`last_error`] reports the cause, matching
/// the best-effort policy of bulk scans. The iterator holds no store locks,
/// only the in-memory key list and a position.
///
/// [`advance`]: RouteIterator::advance
/// [`last_error`]: RouteIterator::last_error
pub struct RouteIterator<'a, D: KvDriver> {
    driver: &'a D,
    keys_ns: &'a KeySpace,
    /// Captured physical keys in ascending byte order.
    keys: Vec<String>,
    /// Index of the next key to visit.
    next: usize,
    current: Option<Current>,
    last_error: Option<StoreError>,
    released: bool,
}

struct Current {
    name: String,
    route: Route,
}

impl<'a, D: KvDriver> RouteIterator<'a, D> {
    pub(crate) fn new(driver: &'a D, keys_ns: &'a KeySpace, keys: Vec<String>) -> Self {
        Self {
            driver,
            keys_ns,
            keys,
            next: 0,
            current: None,
            last_error: None,
            released: false,
        }
    }

    /// True only while positioned on a valid element.
    pub fn valid(&self) -> bool {
        self.current.is_some()
    }

    /// Moves to the next captured key and fetches its route.
    ///
    /// Returns `false` once the key set is exhausted, or when fetching or
    /// decoding the next candidate fails. A failure is terminal for the
    /// iteration and is reported via [`RouteIterator::last_error`] instead
    /// of being raised here.
    pub async fn advance(&mut self) -> bool {
        if self.released {
            self.last_error = Some(StoreError::Unavailable(
                "iterator advanced after release".to_string(),
            ));
            return false;
        }

        self.current = None;
        let Some(key) = self.keys.get(self.next).cloned() else {
            return false;
        };
        self.next += 1;

        let name = match self.keys_ns.unkey(&key) {
            Some(name) => name.to_string(),
            // Scan patterns guarantee the prefix; a miss here means the
            // snapshot was built for a different namespace.
            None => {
                return self.exhaust(StoreError::Unavailable(format!(
                    "key '{key}' outside namespace"
                )));
            }
        };

        let bytes = match self.driver.get(&key).await {
            Ok(Some(bytes)) => bytes,
            // Key vanished between the snapshot and this fetch.
            Ok(None) => return self.exhaust(StoreError::NotFound),
            Err(e) => return self.exhaust(e),
        };

        match Route::decode(&bytes) {
            Ok(route) => {
                self.current = Some(Current { name, route });
                true
            }
            Err(source) => self.exhaust(StoreError::CorruptRecord { name, source }),
        }
    }

    /// Repositions to the first captured key >= the namespaced form of
    /// `name`, then advances. Returns whether a valid element was reached;
    /// seeking past the end leaves the iterator exhausted.
    pub async fn seek(&mut self, name: &str) -> bool {
        if self.released {
            self.last_error = Some(StoreError::Unavailable(
                "iterator advanced after release".to_string(),
            ));
            return false;
        }

        let target = self.keys_ns.key(name);
        self.next = self
            .keys
            .partition_point(|k| k.as_str() < target.as_str());
        self.current = None;
        self.advance().await
    }

    /// Logical (prefix-stripped) name of the current element.
    pub fn name(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.name.as_str())
    }

    /// Decoded route at the current position.
    pub fn route(&self) -> Option<&Route> {
        self.current.as_ref().map(|c| &c.route)
    }

    /// The failure that ended the iteration early, if any.
    pub fn last_error(&self) -> Option<&StoreError> {
        self.last_error.as_ref()
    }

    /// Drops the captured key set. Safe to call repeatedly; any later
    /// [`advance`](RouteIterator::advance) records an error and returns
    /// `false` rather than continuing.
    pub fn release(&mut self) {
        self.released = true;
        self.current = None;
        self.keys = Vec::new();
        self.next = 0;
    }

    /// Records a terminal failure and exhausts the iterator.
    fn exhaust(&mut self, err: StoreError) -> bool {
        self.last_error = Some(err);
        self.next = self.keys.len();
        false
    }
}
