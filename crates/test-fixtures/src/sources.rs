//! `EventSource` implementations for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

use cohort_core::errors::LoadError;
use cohort_core::traits::{Cancellable, CancellationToken, EventSource};
use cohort_core::types::collections::{FxHashMap, FxHashSet};
use cohort_core::types::{
    EntityId, EventBatch, EventSourceKind, RawRecord, RetentionSignal, SegmentScope, TenantId,
};

struct Segment {
    tenant: TenantId,
    members: FxHashSet<EntityId>,
}

/// Records held in memory, keyed by source kind.
#[derive(Default)]
pub struct InMemoryEventSource {
    records: FxHashMap<EventSourceKind, Vec<RawRecord>>,
    segments: FxHashMap<String, Segment>,
    creation_only: FxHashSet<(TenantId, EventSourceKind)>,
    calls: AtomicUsize,
}

impl InMemoryEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record with an unparsed timestamp.
    pub fn with_raw(
        mut self,
        kind: EventSourceKind,
        tenant: &str,
        entity: &str,
        occurred_at: &str,
    ) -> Self {
        self.records
            .entry(kind)
            .or_default()
            .push(RawRecord::new(entity, occurred_at, tenant));
        self
    }

    /// Add a record at `at`, rendered as RFC 3339.
    pub fn with_event(
        self,
        kind: EventSourceKind,
        tenant: &str,
        entity: &str,
        at: DateTime<Utc>,
    ) -> Self {
        let ts = at.to_rfc3339_opts(SecondsFormat::Secs, true);
        self.with_raw(kind, tenant, entity, &ts)
    }

    /// Visitor-session shorthand.
    pub fn with_visit(self, tenant: &str, entity: &str, at: DateTime<Utc>) -> Self {
        self.with_event(EventSourceKind::VisitorSessions, tenant, entity, at)
    }

    pub fn with_segment(mut self, segment_id: &str, tenant: &str, members: &[&str]) -> Self {
        self.segments.insert(
            segment_id.to_string(),
            Segment {
                tenant: TenantId::new(tenant),
                members: members.iter().map(|m| EntityId::new(*m)).collect(),
            },
        );
        self
    }

    /// Report `kind` for `tenant` as carrying creation events only.
    pub fn creation_only(mut self, tenant: &str, kind: EventSourceKind) -> Self {
        self.creation_only.insert((TenantId::new(tenant), kind));
        self
    }

    /// Number of `load_events` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EventSource for InMemoryEventSource {
    fn load_events(
        &self,
        tenant: &TenantId,
        segment: &SegmentScope,
        kind: EventSourceKind,
        limit: usize,
    ) -> Result<EventBatch, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let members = match segment.segment_id() {
            None => None,
            Some(id) => match self.segments.get(id) {
                Some(seg) if &seg.tenant == tenant => Some(&seg.members),
                _ => {
                    return Err(LoadError::SegmentNotInTenant {
                        tenant_id: tenant.to_string(),
                        segment_id: id.to_string(),
                    })
                }
            },
        };

        let mut records: Vec<RawRecord> = self
            .records
            .get(&kind)
            .map(|all| {
                all.iter()
                    .filter(|r| &r.tenant_id == tenant)
                    .filter(|r| members.map_or(true, |m| m.contains(&r.entity_id)))
                    .cloned()
                    .map(|mut r| {
                        r.segment_id = segment.segment_id().map(str::to_string);
                        r
                    })
                    .collect()
            })
            .unwrap_or_default();

        let truncated = records.len() > limit;
        records.truncate(limit);

        let signal = if self.creation_only.contains(&(tenant.clone(), kind)) {
            RetentionSignal::CreationOnly
        } else {
            RetentionSignal::Recurring
        };
        Ok(EventBatch::from_records(records, signal).with_truncated(truncated))
    }
}

/// Always fails with `LoadError::Unavailable`.
pub struct FailingEventSource {
    message: String,
}

impl FailingEventSource {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl EventSource for FailingEventSource {
    fn load_events(
        &self,
        _tenant: &TenantId,
        _segment: &SegmentScope,
        _kind: EventSourceKind,
        _limit: usize,
    ) -> Result<EventBatch, LoadError> {
        Err(LoadError::Unavailable {
            message: self.message.clone(),
        })
    }
}

/// Sleeps for `delay` before delegating.
pub struct SlowEventSource<S> {
    inner: S,
    delay: Duration,
}

impl<S: EventSource> SlowEventSource<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl<S: EventSource> EventSource for SlowEventSource<S> {
    fn load_events(
        &self,
        tenant: &TenantId,
        segment: &SegmentScope,
        kind: EventSourceKind,
        limit: usize,
    ) -> Result<EventBatch, LoadError> {
        std::thread::sleep(self.delay);
        self.inner.load_events(tenant, segment, kind, limit)
    }
}

/// Trips `token` while the fetch is in flight, then delegates.
pub struct CancellingEventSource<S> {
    inner: S,
    token: CancellationToken,
}

impl<S: EventSource> CancellingEventSource<S> {
    pub fn new(inner: S, token: CancellationToken) -> Self {
        Self { inner, token }
    }
}

impl<S: EventSource> EventSource for CancellingEventSource<S> {
    fn load_events(
        &self,
        tenant: &TenantId,
        segment: &SegmentScope,
        kind: EventSourceKind,
        limit: usize,
    ) -> Result<EventBatch, LoadError> {
        self.token.cancel();
        self.inner.load_events(tenant, segment, kind, limit)
    }
}
