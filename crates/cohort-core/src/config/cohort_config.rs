//! Top-level cohort configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    DateRangePolicy, LoaderConfig, OutOfWindowPolicy, PeriodConfig, RetentionConfig,
};
use crate::constants::{CONFIG_FILE_NAME, MAX_PERIOD_COUNT};
use crate::errors::ConfigError;

/// Environment variables read by `CohortConfig::load`.
pub const ENV_PERIOD_COUNT: &str = "COHORT_PERIOD_COUNT";
pub const ENV_OUT_OF_WINDOW: &str = "COHORT_OUT_OF_WINDOW";
pub const ENV_DATE_RANGE_POLICY: &str = "COHORT_DATE_RANGE_POLICY";
pub const ENV_MAX_EVENTS: &str = "COHORT_MAX_EVENTS";
pub const ENV_FETCH_TIMEOUT_MS: &str = "COHORT_FETCH_TIMEOUT_MS";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_overrides`)
/// 2. Environment variables (`COHORT_*`)
/// 3. Project config (`cohort.toml` in the given root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CohortConfig {
    pub periods: PeriodConfig,
    pub retention: RetentionConfig,
    pub loader: LoaderConfig,
}

/// Overrides supplied by the embedding application.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub period_count: Option<usize>,
    pub out_of_window: Option<OutOfWindowPolicy>,
    pub date_range: Option<DateRangePolicy>,
    pub max_events: Option<usize>,
    pub fetch_timeout_ms: Option<u64>,
}

impl CohortConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing and embedding).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &CohortConfig) -> Result<(), ConfigError> {
        if let Some(count) = config.periods.count {
            if count == 0 || count > MAX_PERIOD_COUNT {
                return Err(ConfigError::ValidationFailed {
                    field: "periods.count".to_string(),
                    message: format!("must be between 1 and {MAX_PERIOD_COUNT}"),
                });
            }
        }
        if config.loader.max_events == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "loader.max_events".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.loader.fetch_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "loader.fetch_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut CohortConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: CohortConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `Some` values in `other` win.
    fn merge(base: &mut CohortConfig, other: &CohortConfig) {
        if other.periods.count.is_some() {
            base.periods.count = other.periods.count;
        }
        if other.retention.out_of_window.is_some() {
            base.retention.out_of_window = other.retention.out_of_window;
        }
        if other.retention.date_range.is_some() {
            base.retention.date_range = other.retention.date_range;
        }
        if other.loader.max_events.is_some() {
            base.loader.max_events = other.loader.max_events;
        }
        if other.loader.fetch_timeout_ms.is_some() {
            base.loader.fetch_timeout_ms = other.loader.fetch_timeout_ms;
        }
    }

    /// Apply `COHORT_*` environment variables. Unparseable values are ignored.
    fn apply_env_overrides(config: &mut CohortConfig) {
        if let Some(v) = env_parsed::<usize>(ENV_PERIOD_COUNT) {
            config.periods.count = Some(v);
        }
        if let Some(v) = env_parsed::<OutOfWindowPolicy>(ENV_OUT_OF_WINDOW) {
            config.retention.out_of_window = Some(v);
        }
        if let Some(v) = env_parsed::<DateRangePolicy>(ENV_DATE_RANGE_POLICY) {
            config.retention.date_range = Some(v);
        }
        if let Some(v) = env_parsed::<usize>(ENV_MAX_EVENTS) {
            config.loader.max_events = Some(v);
        }
        if let Some(v) = env_parsed::<u64>(ENV_FETCH_TIMEOUT_MS) {
            config.loader.fetch_timeout_ms = Some(v);
        }
    }

    /// Apply programmatic overrides (highest priority).
    pub fn apply_overrides(config: &mut CohortConfig, o: &ConfigOverrides) {
        if let Some(v) = o.period_count {
            config.periods.count = Some(v);
        }
        if let Some(v) = o.out_of_window {
            config.retention.out_of_window = Some(v);
        }
        if let Some(v) = o.date_range {
            config.retention.date_range = Some(v);
        }
        if let Some(v) = o.max_events {
            config.loader.max_events = Some(v);
        }
        if let Some(v) = o.fetch_timeout_ms {
            config.loader.fetch_timeout_ms = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable config env var");
            None
        }
    }
}
