use chrono::Duration;
use proptest::prelude::*;

use cohort_analysis::{ActivityIndex, CohortEngine, FirstSeen, PeriodIndex};
use cohort_core::models::{RetentionReport, RetentionRequest};
use cohort_core::traits::{CancellationToken, EventSource};
use cohort_core::types::collections::FxHashSet;
use cohort_core::types::{EventSourceKind, RawEvent, SegmentScope, TenantId};
use test_fixtures::{reference_now, InMemoryEventSource};

// Up to ~10 weeks back so some entities fall before the 8-week window.
const MAX_HOURS_BACK: i64 = 10 * 7 * 24;

fn events_strategy() -> impl Strategy<Value = Vec<(u8, i64)>> {
    prop::collection::vec((0u8..24, 0i64..MAX_HOURS_BACK), 0..120)
}

fn source_from(events: &[(u8, i64)]) -> InMemoryEventSource {
    let now = reference_now();
    events.iter().fold(InMemoryEventSource::new(), |src, (id, back)| {
        src.with_visit("site", &format!("e{id}"), now - Duration::hours(*back))
    })
}

fn compute(source: InMemoryEventSource, segment: SegmentScope) -> RetentionReport {
    let request =
        RetentionRequest::new("site", EventSourceKind::VisitorSessions).with_segment(segment);
    CohortEngine::with_defaults(source)
        .compute_at(&request, reference_now(), &CancellationToken::new())
        .unwrap()
}

proptest! {
    #[test]
    fn rows_are_well_formed(events in events_strategy()) {
        let report = compute(source_from(&events), SegmentScope::All);

        let mut last_index = None;
        for row in &report.rows {
            let index = report
                .periods
                .iter()
                .position(|p| p.label == row.cohort_label)
                .expect("row label is a window period");
            prop_assert_eq!(row.retention.len(), index + 1);
            prop_assert_eq!(row.retention[0], Some(100));
            for v in &row.retention {
                prop_assert!(matches!(v, Some(p) if *p <= 100));
            }
            prop_assert!(last_index.map_or(true, |l| l < index));
            last_index = Some(index);
        }
    }

    #[test]
    fn result_is_independent_of_record_order(events in events_strategy()) {
        let mut reversed = events.clone();
        reversed.reverse();
        let forward = compute(source_from(&events), SegmentScope::All);
        let backward = compute(source_from(&reversed), SegmentScope::All);
        prop_assert_eq!(&forward.rows, &backward.rows);
        prop_assert_eq!(forward.stats.entities, backward.stats.entities);

        let again = compute(source_from(&events), SegmentScope::All);
        prop_assert_eq!(forward, again);
    }

    #[test]
    fn cohorts_partition_entities(events in events_strategy()) {
        let now = reference_now();
        let raw: Vec<RawEvent> = events
            .iter()
            .map(|(id, back)| RawEvent::new(format!("e{id}"), now - Duration::hours(*back), "site"))
            .collect();
        let periods = PeriodIndex::build(now, 8);
        let first_seen = FirstSeen::resolve(&raw);
        let (cohorts, outside) = first_seen.cohorts(&periods);

        let distinct: FxHashSet<_> = raw.iter().map(|e| e.entity_id.clone()).collect();
        let members: usize = cohorts.iter().map(|c| c.original_count()).sum();
        prop_assert_eq!(members + outside, distinct.len());

        // Every member was active in its own cohort week.
        let activity = ActivityIndex::build(&raw);
        for cohort in &cohorts {
            prop_assert_eq!(
                activity.retained_count(&cohort.label, &cohort.members),
                cohort.original_count()
            );
        }
    }

    #[test]
    fn segment_never_grows_population(
        events in events_strategy(),
        keep in prop::collection::vec(0u8..24, 0..12)
    ) {
        let names: Vec<String> = keep.iter().map(|id| format!("e{id}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();

        let all = compute(source_from(&events), SegmentScope::All);
        let seg = compute(
            source_from(&events).with_segment("seg", "site", &refs),
            SegmentScope::Segment("seg".to_string()),
        );

        prop_assert!(seg.stats.entities <= all.stats.entities);
        prop_assert!(seg.stats.entities <= names.len());
        prop_assert!(seg.rows.len() <= all.rows.len());
    }

    #[test]
    fn segment_cohorts_are_subsets_per_period(
        events in events_strategy(),
        keep in prop::collection::vec(0u8..24, 0..12)
    ) {
        let names: Vec<String> = keep.iter().map(|id| format!("e{id}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let source = source_from(&events).with_segment("seg", "site", &refs);
        let tenant = TenantId::new("site");
        let load = |scope: &SegmentScope| {
            source
                .load_events(&tenant, scope, EventSourceKind::VisitorSessions, usize::MAX)
                .unwrap()
                .events
        };
        let periods = PeriodIndex::build(reference_now(), 8);

        let (all, _) = FirstSeen::resolve(&load(&SegmentScope::All)).cohorts(&periods);
        let (seg, _) = FirstSeen::resolve(&load(&SegmentScope::Segment("seg".to_string())))
            .cohorts(&periods);

        prop_assert_eq!(all.len(), seg.len());
        for (a, s) in all.iter().zip(&seg) {
            prop_assert_eq!(&a.label, &s.label);
            prop_assert!(s.original_count() <= a.original_count(), "period {}", a.label);
            prop_assert!(s.members.is_subset(&a.members), "period {}", a.label);
        }
    }
}
