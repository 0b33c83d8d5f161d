//! `EventSource` backed by the SQLite store.

use std::sync::Arc;
use std::time::Instant;

use cohort_core::errors::LoadError;
use cohort_core::traits::EventSource;
use cohort_core::types::{EventBatch, EventSourceKind, RetentionSignal, SegmentScope, TenantId};

use crate::connection::DatabaseManager;
use crate::queries::{events, scope};

/// Loads tenant-scoped, segment-filtered records from `DatabaseManager`.
#[derive(Clone)]
pub struct SqliteEventSource {
    db: Arc<DatabaseManager>,
}

impl SqliteEventSource {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }
}

impl EventSource for SqliteEventSource {
    fn load_events(
        &self,
        tenant: &TenantId,
        segment: &SegmentScope,
        kind: EventSourceKind,
        limit: usize,
    ) -> Result<EventBatch, LoadError> {
        let start = Instant::now();
        let site_id = tenant.as_str();
        let segment_id = segment.segment_id();

        let (fetched, signal) = self.db.with_reader(|conn| {
            if let Some(seg) = segment_id {
                if !scope::segment_belongs_to_site(conn, site_id, seg)? {
                    return Ok(None);
                }
            }
            let fetched = events::query_records(conn, site_id, segment_id, kind, limit)?;
            let signal = match kind {
                EventSourceKind::VisitorSessions => RetentionSignal::Recurring,
                EventSourceKind::Leads if scope::has_lead_activity(conn, site_id)? => {
                    RetentionSignal::Recurring
                }
                EventSourceKind::Leads => RetentionSignal::CreationOnly,
            };
            Ok(Some((fetched, signal)))
        })?
        .ok_or_else(|| LoadError::SegmentNotInTenant {
            tenant_id: site_id.to_string(),
            segment_id: segment.to_string(),
        })?;

        if fetched.truncated {
            tracing::warn!(
                tenant = site_id,
                source = %kind,
                limit,
                "event fetch hit row cap; oldest records dropped"
            );
        }

        let batch =
            EventBatch::from_records(fetched.records, signal).with_truncated(fetched.truncated);

        tracing::debug!(
            tenant = site_id,
            segment = %segment,
            source = %kind,
            events = batch.len(),
            malformed = batch.skipped_malformed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded events from sqlite"
        );

        Ok(batch)
    }
}
