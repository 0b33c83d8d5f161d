//! # cohort-core
//!
//! Foundation crate for the cohort retention engine.
//! Defines types, traits, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::CohortConfig;
pub use errors::{CohortErrorCode, LoadError, RetentionError};
pub use models::{
    DateRange, PeriodInfo, ReportStats, ReportStatus, RetentionReport, RetentionRequest,
    RetentionRow,
};
pub use traits::{Cancellable, CancellationToken, EventSource};
pub use types::{
    EntityId, EventBatch, EventSourceKind, RawEvent, RawRecord, RetentionSignal, SegmentScope,
    TenantId,
};
