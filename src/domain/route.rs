//! Route entity representing a short-name to URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored route: the destination URL plus opaque metadata.
///
/// The `name` is not part of the record; it is the key the record is stored
/// under. The serialized form matches the original wire format (`url` and
/// `time` fields). Fields this version does not know about are captured in
/// `extra` and written back verbatim, so records produced by newer service
/// versions survive a read-modify-write cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Destination URL. Stored opaquely; the store never interprets it.
    pub url: String,

    /// Creation timestamp.
    #[serde(rename = "time")]
    pub created_at: DateTime<Utc>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Route {
    /// Creates a route pointing at `url`, timestamped now.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            created_at: Utc::now(),
            extra: Map::new(),
        }
    }

    /// Serializes the route to its stored JSON form.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserializes a route from its stored JSON form.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
