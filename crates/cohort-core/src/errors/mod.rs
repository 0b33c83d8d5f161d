//! Error handling for the cohort engine.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod load_error;
pub mod retention_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::CohortErrorCode;
pub use load_error::LoadError;
pub use retention_error::RetentionError;
pub use storage_error::StorageError;
