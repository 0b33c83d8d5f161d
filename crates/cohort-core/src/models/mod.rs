//! Request and response models at the engine boundary.

pub mod report;
pub mod request;

pub use report::{PeriodInfo, ReportStats, ReportStatus, RetentionReport, RetentionRow};
pub use request::{DateRange, RetentionRequest};
