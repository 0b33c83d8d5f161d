//! Test fixtures for the cohort workspace: in-memory and fault-injecting
//! event sources, a fixed reference clock, and golden JSON scenarios.

pub mod golden;
pub mod sources;
pub mod time;

pub use golden::{list_golden, load_golden, GoldenScenario};
pub use sources::{CancellingEventSource, FailingEventSource, InMemoryEventSource, SlowEventSource};
pub use time::{reference_now, weeks_ago};
