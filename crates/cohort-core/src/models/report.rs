//! Retention report: ordered cohort rows plus request diagnostics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cohort's retention curve.
///
/// `retention[0]` is always 100; `retention[j]` is the percentage of the
/// cohort observed `j` weeks after joining. Length is `cohort index + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionRow {
    pub cohort_label: String,
    pub retention: Vec<Option<u8>>,
}

/// Why a report has the rows it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// The matrix was computed; rows may still be empty.
    Complete,
    /// The tenant/segment has no qualifying events.
    NoData,
    /// The segment does not belong to the tenant.
    InvalidScope,
}

/// A period as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInfo {
    pub label: String,
    pub index: usize,
    pub start: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    pub events_loaded: usize,
    pub malformed_skipped: usize,
    /// Distinct entities across all loaded events.
    pub entities: usize,
    /// Entities whose first-seen week falls outside the observed window.
    pub entities_outside_window: usize,
    pub cohorts_emitted: usize,
}

/// The full result of one retention computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionReport {
    pub status: ReportStatus,
    /// Non-empty cohorts in recency order (newest first).
    pub rows: Vec<RetentionRow>,
    pub periods: Vec<PeriodInfo>,
    pub stats: ReportStats,
}

impl RetentionReport {
    pub fn no_data(periods: Vec<PeriodInfo>, stats: ReportStats) -> Self {
        Self {
            status: ReportStatus::NoData,
            rows: Vec::new(),
            periods,
            stats,
        }
    }

    pub fn invalid_scope() -> Self {
        Self {
            status: ReportStatus::InvalidScope,
            rows: Vec::new(),
            periods: Vec::new(),
            stats: ReportStats::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize the rows in the `{cohort_label, retention}` wire shape.
    pub fn rows_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.rows).unwrap_or(serde_json::Value::Array(Vec::new()))
    }
}
