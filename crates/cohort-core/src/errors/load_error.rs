//! Errors raised by an `EventSource` while fetching raw records.

use super::error_code::{self, CohortErrorCode};
use super::StorageError;

/// Errors from the entity/event loader boundary.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The segment does not exist or belongs to another tenant.
    #[error("Segment {segment_id} is not defined for tenant {tenant_id}")]
    SegmentNotInTenant {
        tenant_id: String,
        segment_id: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Event fetch failed: {message}")]
    Unavailable { message: String },
}

impl LoadError {
    /// True when the failure means "this scope has no data" rather than a fault.
    pub fn is_invalid_scope(&self) -> bool {
        matches!(self, Self::SegmentNotInTenant { .. })
    }
}

impl CohortErrorCode for LoadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SegmentNotInTenant { .. } => error_code::INVALID_SCOPE,
            Self::Storage(e) => e.error_code(),
            Self::Unavailable { .. } => error_code::FETCH_FAILED,
        }
    }
}
