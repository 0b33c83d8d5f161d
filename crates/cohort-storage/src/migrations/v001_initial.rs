//! V001: Initial schema.
//! segments, segment_members, leads, visitor_sessions.

pub const MIGRATION_SQL: &str = r#"
-- Segments are owned by exactly one site (tenant).
CREATE TABLE IF NOT EXISTS segments (
    id TEXT PRIMARY KEY,
    site_id TEXT NOT NULL,
    name TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_segments_site
    ON segments(site_id);

-- Membership is by entity id: a lead id or a visitor id.
CREATE TABLE IF NOT EXISTS segment_members (
    segment_id TEXT NOT NULL REFERENCES segments(id) ON DELETE CASCADE,
    entity_id TEXT NOT NULL,
    PRIMARY KEY (segment_id, entity_id)
) STRICT;

-- Timestamps are stored as text; malformed values are skipped at load time.
CREATE TABLE IF NOT EXISTS leads (
    id TEXT PRIMARY KEY,
    site_id TEXT NOT NULL,
    created_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_leads_site_created
    ON leads(site_id, created_at);

CREATE TABLE IF NOT EXISTS visitor_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    site_id TEXT NOT NULL,
    visitor_id TEXT NOT NULL,
    started_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_visitor_sessions_site_started
    ON visitor_sessions(site_id, started_at);
"#;
