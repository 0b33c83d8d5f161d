//! Seams between the engine and its collaborators.

pub mod cancellation;
pub mod event_source;

pub use cancellation::{Cancellable, CancellationToken};
pub use event_source::EventSource;
