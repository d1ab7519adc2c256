//! Tests for local-day bounds and DST-aware wall-clock resolution.

use agenda_engine::day::{local_date, local_day_bounds, local_instant};
use chrono::{NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

#[test]
fn day_bounds_follow_local_midnight() {
    let tz: Tz = "America/New_York".parse().unwrap();
    // 02:00 UTC on March 11 is still March 10 in New York.
    let now = Utc.with_ymd_and_hms(2026, 3, 11, 2, 0, 0).unwrap();

    assert_eq!(local_date(now, tz), NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());

    let (start, end) = local_day_bounds(now, tz);
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 10, 4, 0, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2026, 3, 11, 4, 0, 0).unwrap());
}

#[test]
fn spring_forward_gap_shifts_to_first_valid_minute() {
    let tz: Tz = "America/New_York".parse().unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();

    // 02:30 does not exist on this date; the clock jumps to 03:00 EDT.
    let resolved = local_instant(tz, date, 150).with_timezone(&tz);

    assert_eq!(resolved.hour(), 3);
    assert_eq!(resolved.minute(), 0);
}

#[test]
fn fall_back_ambiguity_picks_earliest() {
    let tz: Tz = "America/New_York".parse().unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();

    // 01:30 happens twice; the EDT instance is 05:30 UTC.
    let resolved = local_instant(tz, date, 90);

    assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap());
}

#[test]
fn short_dst_day_is_23_hours() {
    let tz: Tz = "Europe/London".parse().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 29, 12, 0, 0).unwrap();

    let (start, end) = local_day_bounds(now, tz);

    assert_eq!((end - start).num_hours(), 23);
}

#[test]
fn minute_1440_is_next_midnight() {
    let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();

    assert_eq!(
        local_instant(Tz::UTC, date, 24 * 60),
        Utc.with_ymd_and_hms(2026, 3, 17, 0, 0, 0).unwrap()
    );
}
