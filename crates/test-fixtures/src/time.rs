//! Fixed clock helpers so scenarios are reproducible.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Wednesday 2026-10-14 15:00 UTC, inside ISO week 2026-W42.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 15, 0, 0)
        .single()
        .expect("valid reference instant")
}

/// `now - 7 * weeks` days.
pub fn weeks_ago(now: DateTime<Utc>, weeks: i64) -> DateTime<Utc> {
    now - Duration::days(7 * weeks)
}
