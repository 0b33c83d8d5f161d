//! Loader limits.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_EVENTS;

/// Limits applied to the raw-record fetch.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoaderConfig {
    /// Maximum records fetched per request. Default: 50 000.
    pub max_events: Option<usize>,
    /// Fetch deadline in milliseconds. Unset means no deadline.
    pub fetch_timeout_ms: Option<u64>,
}

impl LoaderConfig {
    pub fn effective_max_events(&self) -> usize {
        self.max_events.unwrap_or(DEFAULT_MAX_EVENTS)
    }

    pub fn fetch_timeout(&self) -> Option<std::time::Duration> {
        self.fetch_timeout_ms.map(std::time::Duration::from_millis)
    }
}
