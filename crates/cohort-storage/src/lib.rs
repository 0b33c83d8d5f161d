//! # cohort-storage
//!
//! SQLite persistence for the raw records the retention engine consumes:
//! leads, lead activity, visitor sessions, and segment membership.
//! `SqliteEventSource` adapts it to the `EventSource` trait.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod source;

pub use connection::DatabaseManager;
pub use source::SqliteEventSource;
