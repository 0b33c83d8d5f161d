//! Shared domain types: identifiers, raw events, and collection aliases.

pub mod collections;
pub mod event;
pub mod identifiers;
pub mod timestamp;

pub use event::{EventBatch, EventSourceKind, RawEvent, RawRecord, RetentionSignal};
pub use identifiers::{EntityId, SegmentScope, TenantId};
pub use timestamp::parse_timestamp;
