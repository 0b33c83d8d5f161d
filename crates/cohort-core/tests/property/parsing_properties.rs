use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use proptest::prelude::*;

use cohort_core::types::{parse_timestamp, SegmentScope};

// 1970-01-01 .. 2100-01-01
const MAX_SECS: i64 = 4_102_444_800;

fn instant(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("in range")
}

proptest! {
    #[test]
    fn every_accepted_format_yields_the_same_instant(secs in 0i64..MAX_SECS) {
        let at = instant(secs);

        let forms = [
            at.to_rfc3339_opts(SecondsFormat::Secs, true),
            at.to_rfc3339_opts(SecondsFormat::Millis, false),
            at.format("%Y-%m-%d %H:%M:%S").to_string(),
            at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            secs.to_string(),
        ];
        for raw in &forms {
            prop_assert_eq!(parse_timestamp(raw), Some(at), "{}", raw);
        }
    }

    #[test]
    fn offsets_normalise_to_utc(secs in 0i64..MAX_SECS, offset_hours in -12i32..=14) {
        let at = instant(secs);
        let offset = FixedOffset::east_opt(offset_hours * 3600).expect("valid offset");
        let local = at.with_timezone(&offset).to_rfc3339();
        prop_assert_eq!(parse_timestamp(&local), Some(at));
    }

    #[test]
    fn surrounding_whitespace_is_ignored(secs in 0i64..MAX_SECS, pad in "[ \t]{0,3}") {
        let at = instant(secs);
        let raw = format!("{pad}{}{pad}", at.to_rfc3339());
        prop_assert_eq!(parse_timestamp(&raw), Some(at));
    }

    #[test]
    fn text_without_digits_never_parses(s in "[a-zA-Z :/_-]{0,24}") {
        prop_assert_eq!(parse_timestamp(&s), None);
    }

    #[test]
    fn segment_scope_display_round_trips(id in "[a-z0-9][a-z0-9_-]{0,15}") {
        let scope = SegmentScope::parse(Some(&id));
        if id == "all" {
            prop_assert_eq!(scope, SegmentScope::All);
        } else {
            prop_assert_eq!(scope.segment_id(), Some(id.as_str()));
            prop_assert!(scope.is_filtered());
            prop_assert_eq!(SegmentScope::parse(Some(&scope.to_string())), scope);
        }
    }

    #[test]
    fn blank_or_all_is_unfiltered(pad in "[ \t]{0,3}", upper in any::<bool>()) {
        let all = if upper { "ALL" } else { "all" };
        let padded = format!("{pad}{all}{pad}");
        prop_assert_eq!(SegmentScope::parse(Some(&padded)), SegmentScope::All);
        prop_assert_eq!(SegmentScope::parse(Some(&pad)), SegmentScope::All);
        prop_assert_eq!(SegmentScope::parse(None), SegmentScope::All);
    }
}
