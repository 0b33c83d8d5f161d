//! Golden retention scenarios stored as JSON under `golden/`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use cohort_core::models::RetentionRow;

/// One golden record: `entity_id` active at `occurred_at` (unparsed).
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenEvent {
    pub entity_id: String,
    pub occurred_at: String,
}

/// A self-contained scenario: anchor, events, expected rows.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub name: String,
    pub now: DateTime<Utc>,
    #[serde(default = "default_periods")]
    pub periods: usize,
    pub events: Vec<GoldenEvent>,
    pub expected: Vec<RetentionRow>,
    #[serde(default)]
    pub expected_malformed: usize,
}

fn default_periods() -> usize {
    8
}

fn golden_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load one scenario by file name.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_golden(file_name: &str) -> GoldenScenario {
    let path = golden_root().join(file_name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// All scenario file names, sorted.
pub fn list_golden() -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(golden_root())
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter_map(|e| e.file_name().into_string().ok())
                .filter(|name| name.ends_with(".json"))
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
