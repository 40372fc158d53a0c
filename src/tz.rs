use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Parses an IANA timezone identifier, falling back when the name is
/// unknown. Event times must keep rendering even for a bogus viewer zone.
pub fn resolve_zone(name: &str, fallback: Tz) -> Tz {
    name.parse().unwrap_or(fallback)
}

/// Interprets `wall` as local time in `zone` and returns the absolute
/// instant. The host timezone never enters the calculation.
pub fn to_instant(wall: NaiveDateTime, zone: Tz) -> DateTime<Utc> {
    match zone.from_local_datetime(&wall) {
        LocalResult::Single(local) => local.with_timezone(&Utc),
        // A backward offset transition repeats the wall clock; take the
        // earlier reading.
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        // A forward transition skipped this wall clock entirely; resolve
        // with the offset in force around the gap.
        LocalResult::None => {
            let offset = zone.offset_from_utc_datetime(&wall).fix();
            Utc.from_utc_datetime(&(wall - offset))
        }
    }
}

/// Inverse of [`to_instant`]: the wall clock a viewer in `zone` sees at
/// `instant`.
pub fn from_instant(instant: DateTime<Utc>, zone: Tz) -> NaiveDateTime {
    instant.with_timezone(&zone).naive_local()
}
