//! CohortEngine: runs one retention request end to end.
//!
//! Stages: validate → resolve window → fetch → {first-seen, activity}
//! (joined) → matrix → assemble. A request either produces a full report or
//! fails as a whole; no stage emits partial rows.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use cohort_core::config::CohortConfig;
use cohort_core::errors::{CohortErrorCode, RetentionError};
use cohort_core::models::{
    ReportStats, ReportStatus, RetentionReport, RetentionRequest, RetentionRow,
};
use cohort_core::tracing::metrics;
use cohort_core::traits::{Cancellable, CancellationToken, EventSource};
use cohort_core::types::RetentionSignal;

use crate::activity::ActivityIndex;
use crate::assembler;
use crate::first_seen::FirstSeen;
use crate::matrix::MatrixBuilder;
use crate::periods::PeriodIndex;
use crate::window::resolve_window;

/// Retention engine over an `EventSource`.
pub struct CohortEngine<S: EventSource> {
    source: S,
    config: CohortConfig,
}

impl<S: EventSource> CohortEngine<S> {
    pub fn new(source: S, config: CohortConfig) -> Self {
        Self { source, config }
    }

    /// Create an engine with compiled-default configuration.
    pub fn with_defaults(source: S) -> Self {
        Self::new(source, CohortConfig::default())
    }

    pub fn config(&self) -> &CohortConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Compute a report anchored at the current instant.
    pub fn compute(&self, request: &RetentionRequest) -> Result<RetentionReport, RetentionError> {
        self.compute_at(request, Utc::now(), &CancellationToken::new())
    }

    /// Reference behavior: any failure is logged and yields an empty list.
    pub fn compute_or_empty(&self, request: &RetentionRequest) -> Vec<RetentionRow> {
        match self.compute(request) {
            Ok(report) => report.rows,
            Err(e) => {
                tracing::warn!(
                    tenant = %request.tenant_id,
                    source = %request.source,
                    code = e.error_code(),
                    error = %e,
                    "retention computation failed; returning empty result"
                );
                Vec::new()
            }
        }
    }

    /// Compute independent requests in parallel against one shared `now`.
    pub fn compute_many(
        &self,
        requests: &[RetentionRequest],
        now: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Vec<Result<RetentionReport, RetentionError>> {
        requests
            .par_iter()
            .map(|req| self.compute_at(req, now, cancel))
            .collect()
    }

    /// Compute a report with an explicit anchor instant and cancellation token.
    ///
    /// Output is a pure function of `now` and the fetched events.
    pub fn compute_at(
        &self,
        request: &RetentionRequest,
        now: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<RetentionReport, RetentionError> {
        let span = tracing::info_span!(
            metrics::RETENTION_SPAN,
            tenant = %request.tenant_id,
            segment = %request.segment,
            source = %request.source,
        );
        let _guard = span.enter();

        request.validate()?;
        checkpoint(cancel)?;

        let window = resolve_window(
            now,
            request.date_range.as_ref(),
            self.config.retention.effective_date_range(),
            self.config.periods.effective_count(),
        );
        if let Some(range) = &request.date_range {
            tracing::debug!(
                from = %range.from,
                to = %range.to,
                policy = ?self.config.retention.effective_date_range(),
                anchor = %window.anchor,
                periods = window.count,
                "date range supplied"
            );
        }
        let periods = PeriodIndex::build(window.anchor, window.count);

        // ── Fetch ──────────────────────────────────────────────────────
        let fetch_start = Instant::now();
        let fetched = self.source.load_events(
            &request.tenant_id,
            &request.segment,
            request.source,
            self.config.loader.effective_max_events(),
        );
        let fetch_elapsed = fetch_start.elapsed();

        let batch = match fetched {
            Ok(batch) => batch,
            Err(e) if e.is_invalid_scope() => {
                tracing::info!(error = %e, "segment not in tenant scope; no data");
                return Ok(RetentionReport::invalid_scope());
            }
            Err(e) => {
                tracing::error!(code = e.error_code(), error = %e, "event fetch failed");
                return Err(e.into());
            }
        };

        if let Some(deadline) = self.config.loader.fetch_timeout() {
            if fetch_elapsed > deadline {
                return Err(RetentionError::DeadlineExceeded {
                    elapsed_ms: fetch_elapsed.as_millis() as u64,
                    deadline_ms: deadline.as_millis() as u64,
                });
            }
        }
        checkpoint(cancel)?;

        tracing::debug!(
            { metrics::FETCH_TIME_MS } = fetch_elapsed.as_millis() as u64,
            { metrics::EVENTS_LOADED } = batch.len(),
            { metrics::MALFORMED_SKIPPED } = batch.skipped_malformed,
            truncated = batch.truncated,
            "events fetched"
        );

        if batch.truncated {
            let limit = self.config.loader.effective_max_events();
            tracing::warn!(limit, "event fetch hit row cap; refusing to build cohorts");
            return Err(RetentionError::Truncated { limit });
        }

        let mut stats = ReportStats {
            events_loaded: batch.len(),
            malformed_skipped: batch.skipped_malformed,
            ..Default::default()
        };

        if batch.is_empty() {
            return Ok(RetentionReport::no_data(periods.to_info(), stats));
        }

        if batch.signal == RetentionSignal::CreationOnly {
            return Err(RetentionError::UnsupportedSignal {
                source_kind: request.source,
                tenant_id: request.tenant_id.to_string(),
            });
        }

        // ── Index ──────────────────────────────────────────────────────
        let index_start = Instant::now();
        let (first_seen, activity) = rayon::join(
            || FirstSeen::resolve(&batch.events),
            || ActivityIndex::build(&batch.events),
        );
        let (cohorts, outside) = first_seen.cohorts(&periods);
        checkpoint(cancel)?;

        stats.entities = first_seen.len();
        stats.entities_outside_window = outside;
        tracing::debug!(
            { metrics::INDEX_BUILD_TIME_MS } = index_start.elapsed().as_millis() as u64,
            entities = stats.entities,
            outside_window = outside,
            "indexes built"
        );

        // ── Matrix ─────────────────────────────────────────────────────
        let matrix_start = Instant::now();
        let matrix = MatrixBuilder::new(
            &periods,
            &activity,
            self.config.retention.effective_out_of_window(),
        )
        .build(&cohorts);
        checkpoint(cancel)?;

        let rows = assembler::assemble(matrix);
        stats.cohorts_emitted = rows.len();

        tracing::info!(
            { metrics::MATRIX_BUILD_TIME_MS } = matrix_start.elapsed().as_millis() as u64,
            { metrics::COHORTS_EMITTED } = rows.len(),
            "retention matrix computed"
        );

        Ok(RetentionReport {
            status: ReportStatus::Complete,
            rows,
            periods: periods.to_info(),
            stats,
        })
    }
}

fn checkpoint(cancel: &CancellationToken) -> Result<(), RetentionError> {
    if cancel.is_cancelled() {
        return Err(RetentionError::Cancelled);
    }
    Ok(())
}
