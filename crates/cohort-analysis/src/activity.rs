//! Activity Index: which entities were observed in which week.
//!
//! Every event counts, not only first occurrences. Built once per request,
//! read-only afterwards.

use cohort_core::types::collections::{FxHashMap, FxHashSet};
use cohort_core::types::{EntityId, RawEvent};

use crate::periods::week_label;

#[derive(Debug, Clone, Default)]
pub struct ActivityIndex {
    by_period: FxHashMap<String, FxHashSet<EntityId>>,
}

impl ActivityIndex {
    pub fn build(events: &[RawEvent]) -> Self {
        let by_period = events.iter().fold(
            FxHashMap::<String, FxHashSet<EntityId>>::default(),
            |mut acc, event| {
                acc.entry(week_label(event.occurred_at))
                    .or_default()
                    .insert(event.entity_id.clone());
                acc
            },
        );
        Self { by_period }
    }

    /// O(1) membership test.
    pub fn contains(&self, label: &str, entity: &EntityId) -> bool {
        self.by_period
            .get(label)
            .is_some_and(|set| set.contains(entity))
    }

    pub fn active_in(&self, label: &str) -> Option<&FxHashSet<EntityId>> {
        self.by_period.get(label)
    }

    /// How many of `members` were active in the period `label`.
    pub fn retained_count(&self, label: &str, members: &FxHashSet<EntityId>) -> usize {
        match self.by_period.get(label) {
            Some(active) => {
                // Iterate the smaller side.
                if members.len() <= active.len() {
                    members.iter().filter(|id| active.contains(*id)).count()
                } else {
                    active.iter().filter(|id| members.contains(*id)).count()
                }
            }
            None => 0,
        }
    }

    pub fn period_count(&self) -> usize {
        self.by_period.len()
    }
}
