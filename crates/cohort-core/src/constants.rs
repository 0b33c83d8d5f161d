/// Cohort engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Length of one period in days. Weekly granularity is fixed.
pub const PERIOD_LENGTH_DAYS: i64 = 7;

/// Default number of trailing weekly periods computed per request.
pub const DEFAULT_PERIOD_COUNT: usize = 8;

/// Upper bound on the configurable period count (two years of weeks).
pub const MAX_PERIOD_COUNT: usize = 104;

/// Default cap on raw records fetched per tenant request.
pub const DEFAULT_MAX_EVENTS: usize = 50_000;

/// Segment identifier meaning "no segment filter".
pub const SEGMENT_ALL: &str = "all";

/// Percentage reported for the cohort's own period.
pub const FULL_RETENTION: u8 = 100;

/// Project-level config file name.
pub const CONFIG_FILE_NAME: &str = "cohort.toml";
