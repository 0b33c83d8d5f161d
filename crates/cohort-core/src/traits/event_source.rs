//! The entity/event loader seam.

use crate::errors::LoadError;
use crate::types::{EventBatch, EventSourceKind, SegmentScope, TenantId};

/// Supplies raw `(entity_id, occurred_at)` records for one tenant.
///
/// Implementations apply the tenant and segment filters themselves and must
/// return `LoadError::SegmentNotInTenant` when the segment does not belong to
/// the tenant. At most `limit` records are returned; hitting the cap sets
/// `EventBatch::truncated`. Retries, if any, are the implementation's concern.
pub trait EventSource: Send + Sync {
    fn load_events(
        &self,
        tenant: &TenantId,
        segment: &SegmentScope,
        kind: EventSourceKind,
        limit: usize,
    ) -> Result<EventBatch, LoadError>;
}

impl<T: EventSource + ?Sized> EventSource for std::sync::Arc<T> {
    fn load_events(
        &self,
        tenant: &TenantId,
        segment: &SegmentScope,
        kind: EventSourceKind,
        limit: usize,
    ) -> Result<EventBatch, LoadError> {
        (**self).load_events(tenant, segment, kind, limit)
    }
}
