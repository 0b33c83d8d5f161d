//! CohortErrorCode trait for stable, caller-visible error codes.

/// Every error enum implements this to expose a structured code string
/// that callers can match on without parsing messages.
pub trait CohortErrorCode {
    /// Returns the error code string (e.g., "FETCH_FAILED").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const FETCH_FAILED: &str = "FETCH_FAILED";
pub const INVALID_SCOPE: &str = "INVALID_SCOPE";
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
pub const UNSUPPORTED_SIGNAL: &str = "UNSUPPORTED_SIGNAL";
pub const CANCELLED: &str = "CANCELLED";
pub const DEADLINE_EXCEEDED: &str = "DEADLINE_EXCEEDED";
pub const TRUNCATED: &str = "TRUNCATED";
