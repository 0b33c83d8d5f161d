//! Tenant/segment scope checks.

use cohort_core::errors::StorageError;
use rusqlite::{params, Connection, OptionalExtension};

/// True when `segment_id` exists and is owned by `site_id`.
pub fn segment_belongs_to_site(
    conn: &Connection,
    site_id: &str,
    segment_id: &str,
) -> Result<bool, StorageError> {
    let owner: Option<String> = conn
        .query_row(
            "SELECT site_id FROM segments WHERE id = ?1",
            params![segment_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    Ok(owner.as_deref() == Some(site_id))
}

/// True when the site has any lead activity beyond creation.
pub fn has_lead_activity(conn: &Connection, site_id: &str) -> Result<bool, StorageError> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM lead_activity WHERE site_id = ?1)",
        params![site_id],
        |row| row.get::<_, i64>(0),
    )
    .map(|v| v != 0)
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}
