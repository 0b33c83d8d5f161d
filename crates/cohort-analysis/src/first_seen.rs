//! First-Seen Resolver: assigns every entity to the week of its earliest event.

use chrono::{DateTime, Utc};

use cohort_core::types::collections::{FxHashMap, FxHashSet};
use cohort_core::types::{EntityId, RawEvent};

use crate::periods::{week_label, PeriodIndex};

/// An entity's earliest occurrence and the week it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstSeenEntry {
    pub at: DateTime<Utc>,
    pub label: String,
}

/// `entity_id → cohort label`, built by a single order-insensitive fold.
#[derive(Debug, Clone, Default)]
pub struct FirstSeen {
    entries: FxHashMap<EntityId, FirstSeenEntry>,
}

/// Entities that share a first-seen period.
#[derive(Debug, Clone)]
pub struct Cohort {
    pub period_index: usize,
    pub label: String,
    pub members: FxHashSet<EntityId>,
}

impl Cohort {
    pub fn original_count(&self) -> usize {
        self.members.len()
    }
}

impl FirstSeen {
    /// Reduce every entity's events to its minimum timestamp, then label it.
    pub fn resolve(events: &[RawEvent]) -> Self {
        let earliest = events.iter().fold(
            FxHashMap::<&EntityId, DateTime<Utc>>::default(),
            |mut acc, event| {
                acc.entry(&event.entity_id)
                    .and_modify(|at| {
                        if event.occurred_at < *at {
                            *at = event.occurred_at;
                        }
                    })
                    .or_insert(event.occurred_at);
                acc
            },
        );

        let entries = earliest
            .into_iter()
            .map(|(id, at)| {
                (
                    id.clone(),
                    FirstSeenEntry {
                        at,
                        label: week_label(at),
                    },
                )
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, entity: &EntityId) -> Option<&FirstSeenEntry> {
        self.entries.get(entity)
    }

    pub fn cohort_label(&self, entity: &EntityId) -> Option<&str> {
        self.entries.get(entity).map(|e| e.label.as_str())
    }

    /// One cohort per period, in recency order, plus the number of entities
    /// whose first-seen week is outside the window. Empty cohorts are kept;
    /// dropping them is the assembler's job.
    pub fn cohorts(&self, periods: &PeriodIndex) -> (Vec<Cohort>, usize) {
        let mut cohorts: Vec<Cohort> = periods
            .periods()
            .iter()
            .map(|p| Cohort {
                period_index: p.index,
                label: p.label.clone(),
                members: FxHashSet::default(),
            })
            .collect();

        let mut outside = 0;
        for (entity, entry) in &self.entries {
            match periods.index_of(&entry.label) {
                Some(idx) => {
                    cohorts[idx].members.insert(entity.clone());
                }
                None => outside += 1,
            }
        }

        (cohorts, outside)
    }
}
