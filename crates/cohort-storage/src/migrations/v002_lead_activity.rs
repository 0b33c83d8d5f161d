//! V002: lead_activity: recurring activity for leads beyond creation.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS lead_activity (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    lead_id TEXT NOT NULL REFERENCES leads(id) ON DELETE CASCADE,
    site_id TEXT NOT NULL,
    occurred_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_lead_activity_site_occurred
    ON lead_activity(site_id, occurred_at);
CREATE INDEX IF NOT EXISTS idx_lead_activity_lead
    ON lead_activity(lead_id);
"#;
