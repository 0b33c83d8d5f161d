//! Retention computation policies.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What to report for an offset whose later period falls outside the
/// observed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfWindowPolicy {
    /// Report 0, as if every member churned.
    #[default]
    Zero,
    /// Report null: not measurable yet.
    Null,
}

impl FromStr for OutOfWindowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "0" => Ok(Self::Zero),
            "null" | "none" => Ok(Self::Null),
            other => Err(format!("unknown out-of-window policy: {other}")),
        }
    }
}

/// How a caller-supplied date range affects period bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRangePolicy {
    /// The range is logged only; periods are the trailing window ending now.
    #[default]
    Ignore,
    /// Periods end at `min(range.to, now)` and cover the range's weeks,
    /// clamped to the configured period count.
    AnchorToRangeEnd,
}

impl FromStr for DateRangePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "anchor_to_range_end" | "anchor" => Ok(Self::AnchorToRangeEnd),
            other => Err(format!("unknown date range policy: {other}")),
        }
    }
}

/// Configuration for the retention matrix builder.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetentionConfig {
    pub out_of_window: Option<OutOfWindowPolicy>,
    pub date_range: Option<DateRangePolicy>,
}

impl RetentionConfig {
    pub fn effective_out_of_window(&self) -> OutOfWindowPolicy {
        self.out_of_window.unwrap_or_default()
    }

    pub fn effective_date_range(&self) -> DateRangePolicy {
        self.date_range.unwrap_or_default()
    }
}
