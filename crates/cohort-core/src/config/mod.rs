//! Configuration system for the cohort engine.
//! TOML-based, layered resolution: overrides > env > project file > defaults.

pub mod cohort_config;
pub mod loader_config;
pub mod period_config;
pub mod retention_config;

pub use cohort_config::{CohortConfig, ConfigOverrides};
pub use loader_config::LoaderConfig;
pub use period_config::PeriodConfig;
pub use retention_config::{DateRangePolicy, OutOfWindowPolicy, RetentionConfig};
