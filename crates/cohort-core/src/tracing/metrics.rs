//! Structured span field names shared by the engine and the storage adapter.
//!
//! Consistent field names keep log queries stable across crates.

/// Span name for one retention computation.
pub const RETENTION_SPAN: &str = "cohort.retention";

/// Fetch: time spent in the event source, milliseconds.
pub const FETCH_TIME_MS: &str = "fetch_time_ms";

/// Fetch: parsed events handed to the engine.
pub const EVENTS_LOADED: &str = "events_loaded";

/// Fetch: records skipped for malformed timestamps.
pub const MALFORMED_SKIPPED: &str = "malformed_skipped";

/// Index: time to build the first-seen map and activity index, milliseconds.
pub const INDEX_BUILD_TIME_MS: &str = "index_build_time_ms";

/// Matrix: time to build the retention matrix, milliseconds.
pub const MATRIX_BUILD_TIME_MS: &str = "matrix_build_time_ms";

/// Output: non-empty cohorts emitted.
pub const COHORTS_EMITTED: &str = "cohorts_emitted";
