//! Resolves the anchor and length of the period window for a request.

use chrono::{DateTime, Utc};

use cohort_core::config::DateRangePolicy;
use cohort_core::constants::PERIOD_LENGTH_DAYS;
use cohort_core::models::DateRange;

use crate::periods::week_start;

/// Anchor instant and number of weekly periods to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub anchor: DateTime<Utc>,
    pub count: usize,
}

/// Under `Ignore` the range has no effect: `count` periods ending at `now`.
/// Under `AnchorToRangeEnd` the window ends at `min(range.to, now)` and
/// spans the ISO weeks from `range.from` to that anchor, clamped to
/// `1..=count`.
pub fn resolve_window(
    now: DateTime<Utc>,
    range: Option<&DateRange>,
    policy: DateRangePolicy,
    count: usize,
) -> Window {
    let count = count.max(1);
    match (policy, range) {
        (DateRangePolicy::AnchorToRangeEnd, Some(range)) => {
            let anchor = range.to.min(now);
            let span_weeks =
                (week_start(anchor) - week_start(range.from)).num_days() / PERIOD_LENGTH_DAYS;
            let weeks = usize::try_from(span_weeks + 1).unwrap_or(1);
            Window {
                anchor,
                count: weeks.clamp(1, count),
            }
        }
        _ => Window { anchor: now, count },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 15, 0, 0).unwrap()
    }

    #[test]
    fn ignore_policy_anchors_at_now() {
        let range = DateRange::new(now() - Duration::days(400), now() - Duration::days(300));
        let w = resolve_window(now(), Some(&range), DateRangePolicy::Ignore, 8);
        assert_eq!(w, Window { anchor: now(), count: 8 });
        let w = resolve_window(now(), None, DateRangePolicy::AnchorToRangeEnd, 8);
        assert_eq!(w, Window { anchor: now(), count: 8 });
    }

    #[test]
    fn anchor_policy_covers_range_weeks() {
        let to = now() - Duration::days(14);
        let range = DateRange::new(to - Duration::days(21), to);
        let w = resolve_window(now(), Some(&range), DateRangePolicy::AnchorToRangeEnd, 8);
        assert_eq!(w.anchor, to);
        assert_eq!(w.count, 4);
    }

    #[test]
    fn anchor_policy_clamps() {
        let long = DateRange::new(now() - Duration::days(365), now() + Duration::days(30));
        let w = resolve_window(now(), Some(&long), DateRangePolicy::AnchorToRangeEnd, 8);
        assert_eq!(w.anchor, now());
        assert_eq!(w.count, 8);

        let future = DateRange::new(now() + Duration::days(30), now() + Duration::days(60));
        let w = resolve_window(now(), Some(&future), DateRangePolicy::AnchorToRangeEnd, 8);
        assert_eq!(w.count, 1);
    }
}
