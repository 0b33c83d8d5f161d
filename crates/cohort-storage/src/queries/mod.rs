//! Query modules, one per concern.

pub mod events;
pub mod ingest;
pub mod scope;
