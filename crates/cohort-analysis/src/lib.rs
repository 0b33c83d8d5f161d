//! # cohort-analysis
//!
//! Weekly cohort retention: period indexing, first-seen resolution,
//! activity indexing, the retention matrix, and response assembly, wired
//! together by `CohortEngine`.

pub mod activity;
pub mod assembler;
pub mod engine;
pub mod first_seen;
pub mod matrix;
pub mod periods;
pub mod window;

pub use activity::ActivityIndex;
pub use engine::CohortEngine;
pub use first_seen::{Cohort, FirstSeen};
pub use matrix::{later_period_index, retention_percentage, MatrixBuilder, MatrixRow};
pub use periods::{week_label, Period, PeriodIndex};
