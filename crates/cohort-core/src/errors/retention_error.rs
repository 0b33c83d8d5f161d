//! Errors surfaced by a retention computation.

use super::error_code::{self, CohortErrorCode};
use super::LoadError;
use crate::types::EventSourceKind;

/// Errors that abort a retention computation. A computation that fails
/// never yields a partial matrix.
#[derive(Debug, thiserror::Error)]
pub enum RetentionError {
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Fetch failed: {0}")]
    Fetch(#[from] LoadError),

    #[error("Source {source_kind} has no recurring activity signal for tenant {tenant_id}")]
    UnsupportedSignal {
        source_kind: EventSourceKind,
        tenant_id: String,
    },

    #[error("Fetch exceeded deadline: {elapsed_ms}ms > {deadline_ms}ms")]
    DeadlineExceeded { elapsed_ms: u64, deadline_ms: u64 },

    /// The loader hit its row cap. Dropped records could hold an entity's
    /// first occurrence, so no cohort assignment is trustworthy.
    #[error("Fetch truncated at {limit} records; raise loader.max_events or narrow the scope")]
    Truncated { limit: usize },

    #[error("Computation cancelled")]
    Cancelled,
}

impl CohortErrorCode for RetentionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => error_code::INVALID_REQUEST,
            Self::Fetch(e) => e.error_code(),
            Self::UnsupportedSignal { .. } => error_code::UNSUPPORTED_SIGNAL,
            Self::DeadlineExceeded { .. } => error_code::DEADLINE_EXCEEDED,
            Self::Truncated { .. } => error_code::TRUNCATED,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
