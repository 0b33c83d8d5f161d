//! Criterion benchmarks for cohort-analysis.
//!
//! - First-seen resolution over 50K events
//! - Activity index build over 50K events
//! - Matrix build for 8 periods
//! - Full engine run over the in-memory source

use chrono::{DateTime, Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cohort_analysis::{ActivityIndex, CohortEngine, FirstSeen, MatrixBuilder, PeriodIndex};
use cohort_core::config::OutOfWindowPolicy;
use cohort_core::models::RetentionRequest;
use cohort_core::traits::CancellationToken;
use cohort_core::types::{EventSourceKind, RawEvent};
use test_fixtures::{reference_now, InMemoryEventSource};

const EVENTS: usize = 50_000;
const ENTITIES: usize = 5_000;

/// Deterministic spread of events across ~10 weeks.
fn offset(i: usize) -> Duration {
    Duration::minutes(((i * 7919) % (10 * 7 * 24 * 60)) as i64)
}

fn make_events(now: DateTime<Utc>) -> Vec<RawEvent> {
    (0..EVENTS)
        .map(|i| RawEvent::new(format!("e{}", i % ENTITIES), now - offset(i), "bench"))
        .collect()
}

fn bench_first_seen(c: &mut Criterion) {
    let events = make_events(reference_now());
    c.bench_function("first_seen_resolve_50k", |bench| {
        bench.iter(|| FirstSeen::resolve(black_box(&events)))
    });
}

fn bench_activity_index(c: &mut Criterion) {
    let events = make_events(reference_now());
    c.bench_function("activity_index_build_50k", |bench| {
        bench.iter(|| ActivityIndex::build(black_box(&events)))
    });
}

fn bench_matrix_build(c: &mut Criterion) {
    let now = reference_now();
    let events = make_events(now);
    let periods = PeriodIndex::build(now, 8);
    let activity = ActivityIndex::build(&events);
    let (cohorts, _) = FirstSeen::resolve(&events).cohorts(&periods);

    c.bench_function("matrix_build_8_periods", |bench| {
        bench.iter(|| {
            MatrixBuilder::new(&periods, &activity, OutOfWindowPolicy::Zero)
                .build(black_box(&cohorts))
        })
    });
}

fn bench_engine(c: &mut Criterion) {
    let now = reference_now();
    let source = (0..EVENTS).fold(InMemoryEventSource::new(), |src, i| {
        src.with_visit("bench", &format!("e{}", i % ENTITIES), now - offset(i))
    });
    let engine = CohortEngine::with_defaults(source);
    let request = RetentionRequest::new("bench", EventSourceKind::VisitorSessions);
    let cancel = CancellationToken::new();

    c.bench_function("engine_compute_50k", |bench| {
        bench.iter(|| engine.compute_at(black_box(&request), now, &cancel))
    });
}

criterion_group!(
    benches,
    bench_first_seen,
    bench_activity_index,
    bench_matrix_build,
    bench_engine
);
criterion_main!(benches);
