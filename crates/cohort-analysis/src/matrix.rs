//! Retention Matrix Builder.
//!
//! For a cohort at recency index `c` the row has `c + 1` entries. Entry `j`
//! is the share of the cohort active `j` weeks after joining, which is the
//! period at recency index `c - j`: periods are indexed backwards from the
//! anchor while retention reads forwards from the join week.

use serde::Serialize;

use cohort_core::config::OutOfWindowPolicy;
use cohort_core::constants::FULL_RETENTION;

use crate::activity::ActivityIndex;
use crate::first_seen::Cohort;
use crate::periods::PeriodIndex;

/// Recency index of the period `offset` weeks after the cohort's own period.
///
/// `None` when that period lies beyond the newest observed period.
pub fn later_period_index(cohort_index: usize, offset: usize) -> Option<usize> {
    cohort_index.checked_sub(offset)
}

/// `retained / original` as a whole percentage, rounded half up.
/// Returns 0 for an empty cohort.
pub fn retention_percentage(retained: usize, original: usize) -> u8 {
    if original == 0 {
        return 0;
    }
    let retained = retained.min(original) as u64;
    let original = original as u64;
    ((200 * retained + original) / (2 * original)) as u8
}

/// One computed row before empty cohorts are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub cohort_label: String,
    pub cohort_index: usize,
    pub original_count: usize,
    pub values: Vec<Option<u8>>,
}

/// Builds rows for every cohort against a fixed period list and activity index.
pub struct MatrixBuilder<'a> {
    periods: &'a PeriodIndex,
    activity: &'a ActivityIndex,
    out_of_window: OutOfWindowPolicy,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(
        periods: &'a PeriodIndex,
        activity: &'a ActivityIndex,
        out_of_window: OutOfWindowPolicy,
    ) -> Self {
        Self {
            periods,
            activity,
            out_of_window,
        }
    }

    fn out_of_window_value(&self) -> Option<u8> {
        match self.out_of_window {
            OutOfWindowPolicy::Zero => Some(0),
            OutOfWindowPolicy::Null => None,
        }
    }

    /// Compute one cohort's row. An empty cohort yields a row of nulls.
    pub fn build_row(&self, cohort: &Cohort) -> MatrixRow {
        let cohort_index = cohort.period_index;
        let original_count = cohort.original_count();

        let values = if original_count == 0 {
            vec![None; cohort_index + 1]
        } else {
            (0..=cohort_index)
                .map(|offset| {
                    if offset == 0 {
                        return Some(FULL_RETENTION);
                    }
                    match later_period_index(cohort_index, offset)
                        .and_then(|idx| self.periods.get(idx))
                    {
                        Some(later) => {
                            let retained =
                                self.activity.retained_count(&later.label, &cohort.members);
                            Some(retention_percentage(retained, original_count))
                        }
                        None => self.out_of_window_value(),
                    }
                })
                .collect()
        };

        MatrixRow {
            cohort_label: cohort.label.clone(),
            cohort_index,
            original_count,
            values,
        }
    }

    pub fn build(&self, cohorts: &[Cohort]) -> Vec<MatrixRow> {
        cohorts.iter().map(|c| self.build_row(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use cohort_core::types::collections::FxHashSet;
    use cohort_core::types::{EntityId, RawEvent};

    use crate::first_seen::FirstSeen;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 15, 0, 0).unwrap()
    }

    fn weeks_ago(w: i64) -> DateTime<Utc> {
        now() - Duration::days(7 * w)
    }

    #[test]
    fn later_period_index_maps_offsets_backwards() {
        assert_eq!(later_period_index(3, 0), Some(3));
        assert_eq!(later_period_index(3, 1), Some(2));
        assert_eq!(later_period_index(3, 3), Some(0));
        assert_eq!(later_period_index(3, 4), None);
        assert_eq!(later_period_index(0, 1), None);
    }

    #[test]
    fn percentage_rounds_half_up_and_clamps() {
        assert_eq!(retention_percentage(2, 3), 67);
        assert_eq!(retention_percentage(1, 3), 33);
        assert_eq!(retention_percentage(1, 8), 13); // 12.5
        assert_eq!(retention_percentage(1, 200), 1); // 0.5
        assert_eq!(retention_percentage(0, 5), 0);
        assert_eq!(retention_percentage(5, 5), 100);
        assert_eq!(retention_percentage(9, 5), 100);
        assert_eq!(retention_percentage(3, 0), 0);
    }

    #[test]
    fn scenario_two_of_three_return_next_week() {
        let events = vec![
            RawEvent::new("a", weeks_ago(1), "site"),
            RawEvent::new("b", weeks_ago(1), "site"),
            RawEvent::new("c", weeks_ago(1), "site"),
            RawEvent::new("a", weeks_ago(0), "site"),
            RawEvent::new("b", weeks_ago(0), "site"),
        ];
        let periods = PeriodIndex::build(now(), 8);
        let activity = ActivityIndex::build(&events);
        let (cohorts, _) = FirstSeen::resolve(&events).cohorts(&periods);

        let builder = MatrixBuilder::new(&periods, &activity, OutOfWindowPolicy::Zero);
        let row = builder.build_row(&cohorts[1]);
        assert_eq!(row.values, vec![Some(100), Some(67)]);
        assert_eq!(row.original_count, 3);
    }

    #[test]
    fn row_length_tracks_cohort_age() {
        let events: Vec<RawEvent> = (0..8)
            .map(|w| RawEvent::new(format!("e{w}"), weeks_ago(w), "site"))
            .collect();
        let periods = PeriodIndex::build(now(), 8);
        let activity = ActivityIndex::build(&events);
        let (cohorts, _) = FirstSeen::resolve(&events).cohorts(&periods);

        let rows = MatrixBuilder::new(&periods, &activity, OutOfWindowPolicy::Zero).build(&cohorts);
        for row in &rows {
            assert_eq!(row.values.len(), row.cohort_index + 1);
            assert_eq!(row.values[0], Some(100));
            assert!(row.values[1..].iter().all(|v| *v == Some(0)));
        }
    }

    #[test]
    fn empty_cohort_yields_null_row() {
        let periods = PeriodIndex::build(now(), 4);
        let activity = ActivityIndex::default();
        let cohort = Cohort {
            period_index: 2,
            label: periods.get(2).unwrap().label.clone(),
            members: FxHashSet::default(),
        };
        let row =
            MatrixBuilder::new(&periods, &activity, OutOfWindowPolicy::Zero).build_row(&cohort);
        assert_eq!(row.values, vec![None, None, None]);
        assert_eq!(row.original_count, 0);
    }

    #[test]
    fn missing_later_period_uses_out_of_window_policy() {
        // A cohort index beyond the period list has later periods that cannot
        // be looked up; the policy decides what is reported for them.
        let periods = PeriodIndex::build(now(), 2);
        let activity = ActivityIndex::default();
        let mut members = FxHashSet::default();
        members.insert(EntityId::new("a"));
        let cohort = Cohort {
            period_index: 3,
            label: "2026-W39".to_string(),
            members,
        };

        let zero =
            MatrixBuilder::new(&periods, &activity, OutOfWindowPolicy::Zero).build_row(&cohort);
        assert_eq!(zero.values, vec![Some(100), Some(0), Some(0), Some(0)]);

        let null =
            MatrixBuilder::new(&periods, &activity, OutOfWindowPolicy::Null).build_row(&cohort);
        assert_eq!(null.values, vec![Some(100), None, Some(0), Some(0)]);
    }
}
