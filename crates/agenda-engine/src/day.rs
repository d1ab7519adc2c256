//! Local-day arithmetic over IANA time zones.
//!
//! Local wall-clock times are resolved the way the scheduler expects around
//! DST transitions: an ambiguous time (fall back) maps to its earliest instant,
//! and a time inside a spring-forward gap moves to the first valid instant
//! after the gap.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Longest DST gap we search across when resolving a nonexistent local time.
const MAX_GAP_MINUTES: i64 = 120;

/// The local calendar date of `now` in `tz`.
pub fn local_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Resolve `minute_of_day` minutes after local midnight on `date`.
///
/// `minute_of_day` may be 1440, meaning midnight at the start of the next day.
pub fn local_instant(tz: Tz, date: NaiveDate, minute_of_day: i64) -> DateTime<Utc> {
    let naive = NaiveDateTime::new(date, NaiveTime::MIN) + Duration::minutes(minute_of_day);
    resolve_local(tz, naive)
}

/// `[local midnight, next local midnight)` for the day containing `now`, as UTC instants.
pub fn local_day_bounds(now: DateTime<Utc>, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = local_date(now, tz);
    (local_instant(tz, date, 0), local_instant(tz, date, 24 * 60))
}

fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt.with_timezone(&Utc);
    }

    // Inside a gap: walk forward minute by minute until the wall clock exists again.
    for offset in 1..=MAX_GAP_MINUTES {
        let shifted = naive + Duration::minutes(offset);
        if let Some(dt) = tz.from_local_datetime(&shifted).earliest() {
            return dt.with_timezone(&Utc);
        }
    }

    // No real zone has a gap this long; treat the wall clock as UTC.
    naive.and_utc()
}
