//! Insert helpers for the tables the loader reads.
//!
//! Upstream CRUD owns these tables in production; the helpers exist for
//! seeding, fixtures, and tests.

use cohort_core::errors::StorageError;
use rusqlite::{params, Connection};

fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

pub fn insert_segment(
    conn: &Connection,
    segment_id: &str,
    site_id: &str,
    name: Option<&str>,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO segments (id, site_id, name) VALUES (?1, ?2, ?3)",
        params![segment_id, site_id, name],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

pub fn add_segment_member(
    conn: &Connection,
    segment_id: &str,
    entity_id: &str,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT OR IGNORE INTO segment_members (segment_id, entity_id) VALUES (?1, ?2)",
        params![segment_id, entity_id],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

pub fn insert_lead(
    conn: &Connection,
    lead_id: &str,
    site_id: &str,
    created_at: &str,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO leads (id, site_id, created_at) VALUES (?1, ?2, ?3)",
        params![lead_id, site_id, created_at],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

/// Record activity for an existing lead. Returns the row id.
pub fn insert_lead_activity(
    conn: &Connection,
    lead_id: &str,
    site_id: &str,
    occurred_at: &str,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO lead_activity (lead_id, site_id, occurred_at) VALUES (?1, ?2, ?3)",
        params![lead_id, site_id, occurred_at],
    )
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

/// Record a visitor session start. Returns the row id.
pub fn insert_visitor_session(
    conn: &Connection,
    site_id: &str,
    visitor_id: &str,
    started_at: &str,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO visitor_sessions (site_id, visitor_id, started_at) VALUES (?1, ?2, ?3)",
        params![site_id, visitor_id, started_at],
    )
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}
