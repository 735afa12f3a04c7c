//! Analytics event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product analytics event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    /// Event name, e.g. `coach_profile_viewed`
    pub name: String,

    /// Arbitrary event properties
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,

    /// Client-side timestamp
    pub occurred_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Create an event named `name`, timestamped now.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Map::new(),
            occurred_at: Utc::now(),
        }
    }

    /// Attach a property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Override the timestamp.
    pub fn at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}

/// Server acknowledgement of a tracked event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Whether the event was stored
    pub accepted: bool,
}
