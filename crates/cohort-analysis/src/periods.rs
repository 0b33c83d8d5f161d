//! Period Indexer: the trailing window of weekly buckets.
//!
//! Periods are ordered by recency: index 0 contains the anchor instant,
//! index `i` contains `anchor - 7i days`. Each period is labelled with the
//! ISO week-year and week number of its start, and `week_label` is the single
//! bucketing function used both to label periods and to place raw events, so
//! an event lands in exactly one ISO week (Monday 00:00 UTC inclusive).

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;

use cohort_core::constants::PERIOD_LENGTH_DAYS;
use cohort_core::models::PeriodInfo;
use cohort_core::types::collections::FxHashMap;

/// Label of the ISO week containing `instant`, e.g. `2026-W42`.
///
/// The ISO week-year is used, not the calendar year, so the last days of
/// December can belong to week 1 of the next year without colliding with
/// that year's real week 1.
pub fn week_label(instant: DateTime<Utc>) -> String {
    let week = instant.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// Monday 00:00 UTC of the ISO week containing `instant`.
pub fn week_start(instant: DateTime<Utc>) -> DateTime<Utc> {
    let date = instant.date_naive();
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    monday.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// One weekly bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub label: String,
    /// `anchor - 7 * index` days.
    pub start: DateTime<Utc>,
    /// Recency index; 0 is the newest period.
    pub index: usize,
    /// Inclusive lower bound of the ISO week.
    pub week_start: DateTime<Utc>,
    /// Exclusive upper bound of the ISO week.
    pub week_end: DateTime<Utc>,
}

impl Period {
    fn at(anchor: DateTime<Utc>, index: usize) -> Self {
        let start = anchor - Duration::days(PERIOD_LENGTH_DAYS * index as i64);
        let week_start = week_start(start);
        Self {
            label: week_label(start),
            start,
            index,
            week_start,
            week_end: week_start + Duration::days(PERIOD_LENGTH_DAYS),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.week_start <= instant && instant < self.week_end
    }
}

/// The period list for one request plus an O(1) label lookup.
#[derive(Debug, Clone)]
pub struct PeriodIndex {
    periods: Vec<Period>,
    by_label: FxHashMap<String, usize>,
}

impl PeriodIndex {
    /// Build `count` periods anchored at `anchor`, newest first.
    pub fn build(anchor: DateTime<Utc>, count: usize) -> Self {
        let periods: Vec<Period> = (0..count).map(|i| Period::at(anchor, i)).collect();
        let by_label = periods
            .iter()
            .map(|p| (p.label.clone(), p.index))
            .collect();
        Self { periods, by_label }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Period> {
        self.periods.get(index)
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Recency index of the period with this label, if it is in the window.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.by_label.get(label).copied()
    }

    /// Recency index of the period containing `instant`, if any.
    pub fn index_for(&self, instant: DateTime<Utc>) -> Option<usize> {
        self.index_of(&week_label(instant))
    }

    pub fn to_info(&self) -> Vec<PeriodInfo> {
        self.periods
            .iter()
            .map(|p| PeriodInfo {
                label: p.label.clone(),
                index: p.index,
                start: p.start,
            })
            .collect()
    }
}
