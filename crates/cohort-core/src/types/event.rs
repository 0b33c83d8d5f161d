//! Raw activity records and the batch a loader hands to the engine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identifiers::{EntityId, TenantId};
use super::timestamp::parse_timestamp;

/// Which entity/event stream the retention matrix is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSourceKind {
    /// Lead creation plus recorded lead activity.
    Leads,
    /// Visitor session starts.
    VisitorSessions,
}

impl EventSourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::VisitorSessions => "visitor_sessions",
        }
    }
}

impl fmt::Display for EventSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leads" | "lead" => Ok(Self::Leads),
            "visitor_sessions" | "visitors" | "sessions" => Ok(Self::VisitorSessions),
            other => Err(format!("unknown event source: {other}")),
        }
    }
}

/// Whether a source carries activity beyond each entity's creation.
///
/// Retention measured over a creation-only stream is 0 for every later week
/// by construction, so the engine refuses to compute it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionSignal {
    Recurring,
    CreationOnly,
}

/// A record as supplied by the loader, timestamp not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub entity_id: EntityId,
    pub occurred_at: String,
    pub tenant_id: TenantId,
    pub segment_id: Option<String>,
}

impl RawRecord {
    pub fn new(
        entity_id: impl Into<EntityId>,
        occurred_at: impl Into<String>,
        tenant_id: impl Into<TenantId>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            occurred_at: occurred_at.into(),
            tenant_id: tenant_id.into(),
            segment_id: None,
        }
    }

    /// Parse into a `RawEvent`. `None` when the timestamp is malformed.
    pub fn parse(&self) -> Option<RawEvent> {
        let occurred_at = parse_timestamp(&self.occurred_at)?;
        Some(RawEvent {
            entity_id: self.entity_id.clone(),
            occurred_at,
            tenant_id: self.tenant_id.clone(),
            segment_id: self.segment_id.clone(),
        })
    }
}

/// One timestamped occurrence for one entity. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub entity_id: EntityId,
    pub occurred_at: DateTime<Utc>,
    pub tenant_id: TenantId,
    pub segment_id: Option<String>,
}

impl RawEvent {
    pub fn new(
        entity_id: impl Into<EntityId>,
        occurred_at: DateTime<Utc>,
        tenant_id: impl Into<TenantId>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            occurred_at,
            tenant_id: tenant_id.into(),
            segment_id: None,
        }
    }
}

/// Parsed records for one request, plus what was dropped on the way in.
#[derive(Debug, Clone)]
pub struct EventBatch {
    pub events: Vec<RawEvent>,
    /// Records skipped because their timestamp could not be parsed.
    pub skipped_malformed: usize,
    /// True when the loader hit its row cap.
    pub truncated: bool,
    pub signal: RetentionSignal,
}

impl EventBatch {
    /// Parse raw records, skipping (and counting) malformed timestamps.
    pub fn from_records(records: Vec<RawRecord>, signal: RetentionSignal) -> Self {
        let mut events = Vec::with_capacity(records.len());
        let mut skipped_malformed = 0;
        for record in &records {
            match record.parse() {
                Some(event) => events.push(event),
                None => {
                    skipped_malformed += 1;
                    tracing::debug!(
                        entity_id = %record.entity_id,
                        occurred_at = %record.occurred_at,
                        "skipping record with malformed timestamp"
                    );
                }
            }
        }
        Self {
            events,
            skipped_malformed,
            truncated: false,
            signal,
        }
    }

    pub fn empty(signal: RetentionSignal) -> Self {
        Self {
            events: Vec::new(),
            skipped_malformed: 0,
            truncated: false,
            signal,
        }
    }

    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
