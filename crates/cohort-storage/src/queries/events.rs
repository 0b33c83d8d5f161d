//! Raw record queries per event source.
//!
//! Rows come back newest first by parsed instant, so unix seconds, naive SQL
//! timestamps and RFC 3339 strings interleave correctly. Unparseable values
//! sort last. One extra row is requested to detect truncation.

use cohort_core::errors::StorageError;
use cohort_core::types::{EntityId, EventSourceKind, RawRecord, TenantId};
use rusqlite::{params, Connection};

const LEAD_EVENTS: &str = "
    SELECT l.id AS entity_id, l.created_at AS occurred_at
    FROM leads l
    WHERE l.site_id = ?1
    UNION ALL
    SELECT a.lead_id AS entity_id, a.occurred_at AS occurred_at
    FROM lead_activity a
    JOIN leads l ON l.id = a.lead_id
    WHERE a.site_id = ?1 AND l.site_id = ?1";

const SESSION_EVENTS: &str = "
    SELECT s.visitor_id AS entity_id, s.started_at AS occurred_at
    FROM visitor_sessions s
    WHERE s.site_id = ?1";

/// `occurred_at` normalised to `YYYY-MM-DD HH:MM:SS` UTC, NULL when SQLite
/// cannot read it. All-digit values are unix seconds.
const ORDER_KEY: &str = "
    CASE
        WHEN e.occurred_at <> '' AND e.occurred_at NOT GLOB '*[^0-9]*'
            THEN datetime(CAST(e.occurred_at AS INTEGER), 'unixepoch')
        ELSE datetime(e.occurred_at)
    END";

const SEGMENT_FILTER: &str =
    "WHERE e.entity_id IN (SELECT entity_id FROM segment_members WHERE segment_id = ?3)";

fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

/// Records fetched for one scope.
#[derive(Debug, Clone, Default)]
pub struct FetchedRecords {
    pub records: Vec<RawRecord>,
    pub truncated: bool,
}

/// Load raw records for a site, optionally restricted to segment members.
///
/// The caller is responsible for checking that the segment belongs to the
/// site; this query only filters by membership.
pub fn query_records(
    conn: &Connection,
    site_id: &str,
    segment_id: Option<&str>,
    kind: EventSourceKind,
    limit: usize,
) -> Result<FetchedRecords, StorageError> {
    let inner = match kind {
        EventSourceKind::Leads => LEAD_EVENTS,
        EventSourceKind::VisitorSessions => SESSION_EVENTS,
    };
    let filter = if segment_id.is_some() { SEGMENT_FILTER } else { "" };
    let sql = format!(
        "SELECT e.entity_id, e.occurred_at FROM ({inner}) e {filter}
         ORDER BY ({ORDER_KEY}) IS NULL, ({ORDER_KEY}) DESC, e.occurred_at DESC
         LIMIT ?2"
    );
    let fetch_limit = i64::try_from(limit.saturating_add(1)).unwrap_or(i64::MAX);

    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;

    let tenant = TenantId::new(site_id);
    let segment = segment_id.map(str::to_string);
    let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<RawRecord> {
        Ok(RawRecord {
            entity_id: EntityId::new(row.get::<_, String>(0)?),
            occurred_at: row.get(1)?,
            tenant_id: tenant.clone(),
            segment_id: segment.clone(),
        })
    };

    let rows = match segment_id {
        Some(seg) => stmt.query_map(params![site_id, fetch_limit, seg], map_row),
        None => stmt.query_map(params![site_id, fetch_limit], map_row),
    }
    .map_err(sqlite_err)?;

    let mut records = rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)?;

    let truncated = records.len() > limit;
    records.truncate(limit);

    Ok(FetchedRecords { records, truncated })
}
