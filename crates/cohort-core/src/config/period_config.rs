//! Period window configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PERIOD_COUNT;

/// How many trailing weekly periods a request covers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PeriodConfig {
    /// Number of weekly periods, newest first. Default: 8.
    pub count: Option<usize>,
}

impl PeriodConfig {
    /// Returns the effective period count, defaulting to 8.
    pub fn effective_count(&self) -> usize {
        self.count.unwrap_or(DEFAULT_PERIOD_COUNT)
    }
}
