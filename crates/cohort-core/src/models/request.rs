//! Retention request: tenant, segment scope, optional range, event source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::RetentionError;
use crate::types::{EventSourceKind, SegmentScope, TenantId};

/// Inclusive date range supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }
}

/// One invocation of the retention engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionRequest {
    pub tenant_id: TenantId,
    #[serde(default)]
    pub segment: SegmentScope,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    pub source: EventSourceKind,
}

impl RetentionRequest {
    pub fn new(tenant_id: impl Into<TenantId>, source: EventSourceKind) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            segment: SegmentScope::All,
            date_range: None,
            source,
        }
    }

    pub fn with_segment(mut self, segment: SegmentScope) -> Self {
        self.segment = segment;
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Reject requests that cannot be scoped.
    pub fn validate(&self) -> Result<(), RetentionError> {
        if self.tenant_id.as_str().trim().is_empty() {
            return Err(RetentionError::InvalidRequest {
                reason: "tenant id is required".to_string(),
            });
        }
        if let Some(range) = &self.date_range {
            if range.from > range.to {
                return Err(RetentionError::InvalidRequest {
                    reason: format!(
                        "date range starts after it ends: {} > {}",
                        range.from, range.to
                    ),
                });
            }
        }
        Ok(())
    }
}
