use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// A start/end pair in wall-clock terms, before any timezone interpretation.
///
/// `end` is always strictly after `start`; ranges that read as ending before
/// they begin are taken to cross midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClockRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

const DEFAULT_DURATION_HOURS: i64 = 2;

type Matcher = fn(&str) -> Option<NaiveTime>;

// Tried in order; 12-hour comes first so "6:00 PM" is not swallowed by the
// 24-hour matcher as plain 6:00.
const MATCHERS: &[Matcher] = &[twelve_hour, twenty_four_hour];

/// Parses a single clock component such as `"18:00"` or `"6:00 PM"`.
pub fn parse_clock(component: &str) -> Option<NaiveTime> {
    let component = component.trim();
    if component.is_empty() {
        return None;
    }

    MATCHERS.iter().find_map(|matcher| matcher(component))
}

/// Turns a free-form time string plus a calendar date into a wall-clock
/// range. Never fails: an unparseable start yields the 12:00-14:00 window,
/// a missing end defaults to two hours after the start.
pub fn parse_range(time: &str, date: NaiveDate) -> WallClockRange {
    let mut parts = time.splitn(2, ['-', '\u{2013}']);
    let start_part = parts.next().unwrap_or_default();
    let end_part = parts.next().unwrap_or_default();

    let Some(start_clock) = parse_clock(start_part) else {
        return WallClockRange {
            start: date.and_hms_opt(12, 0, 0).unwrap(),
            end: date.and_hms_opt(14, 0, 0).unwrap(),
        };
    };

    let start = date.and_time(start_clock);
    let end = match parse_clock(end_part) {
        Some(end_clock) => {
            let end = date.and_time(end_clock);
            if end <= start {
                // "11:00 PM - 1:00 AM" style ranges cross midnight.
                end + Duration::days(1)
            } else {
                end
            }
        }
        None => start + Duration::hours(DEFAULT_DURATION_HOURS),
    };

    WallClockRange { start, end }
}

fn twelve_hour(s: &str) -> Option<NaiveTime> {
    let upper = s.to_ascii_uppercase();
    let (idx, is_pm) = match (upper.find("AM"), upper.find("PM")) {
        (Some(am), Some(pm)) if am < pm => (am, false),
        (_, Some(pm)) => (pm, true),
        (Some(am), None) => (am, false),
        (None, None) => return None,
    };

    let (mut hour, minute) = split_clock(upper[..idx].split_whitespace().last()?)?;
    if hour == 0 || hour > 12 {
        return None;
    }
    if is_pm && hour != 12 {
        hour += 12;
    }
    if !is_pm && hour == 12 {
        hour = 0;
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn twenty_four_hour(s: &str) -> Option<NaiveTime> {
    s.split_whitespace().find_map(|token| {
        let (hour, minute) = split_clock(token)?;
        NaiveTime::from_hms_opt(hour, minute, 0)
    })
}

fn split_clock(token: &str) -> Option<(u32, u32)> {
    let (hour, minute) = token.split_once(':')?;
    // Minutes are always written with two digits; "7:5" is not a time.
    if minute.len() != 2 {
        return None;
    }
    Some((hour.parse().ok()?, minute.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 26).unwrap()
    }

    #[test]
    fn twenty_four_hour_single_time() {
        let range = parse_range("18:00", date());
        assert_eq!(range.start, date().and_hms_opt(18, 0, 0).unwrap());
        assert_eq!(range.end, date().and_hms_opt(20, 0, 0).unwrap());
    }

    #[test]
    fn twelve_hour_range() {
        let range = parse_range("6:00 PM - 8:00 PM", date());
        assert_eq!(range.start, date().and_hms_opt(18, 0, 0).unwrap());
        assert_eq!(range.end, date().and_hms_opt(20, 0, 0).unwrap());
    }

    #[test]
    fn missing_end_defaults_to_two_hours() {
        let range = parse_range("6:00 PM", date());
        assert_eq!(range.end - range.start, Duration::hours(2));
    }

    #[test]
    fn end_before_start_crosses_midnight() {
        let range = parse_range("11:00 PM - 1:00 AM", date());
        assert!(range.end > range.start);
        assert_eq!(range.end.date(), date().succ_opt().unwrap());
        assert_eq!(range.end.time(), NaiveTime::from_hms_opt(1, 0, 0).unwrap());
    }

    #[test]
    fn unparseable_start_falls_back_to_default_window() {
        let range = parse_range("after sunset", date());
        assert_eq!(range.start, date().and_hms_opt(12, 0, 0).unwrap());
        assert_eq!(range.end, date().and_hms_opt(14, 0, 0).unwrap());
    }

    #[test]
    fn empty_string_falls_back_to_default_window() {
        let range = parse_range("", date());
        assert_eq!(range.start, date().and_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn meridiem_edge_cases() {
        assert_eq!(
            parse_clock("12:00 AM"),
            NaiveTime::from_hms_opt(0, 0, 0)
        );
        assert_eq!(
            parse_clock("12:30 PM"),
            NaiveTime::from_hms_opt(12, 30, 0)
        );
        assert_eq!(parse_clock("9:15 am"), NaiveTime::from_hms_opt(9, 15, 0));
    }

    #[test]
    fn trailing_words_are_ignored() {
        let range = parse_range("6:00 PM onwards", date());
        assert_eq!(range.start.time(), NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn invalid_clock_values_are_rejected() {
        assert_eq!(parse_clock("25:00"), None);
        assert_eq!(parse_clock("18:75"), None);
        assert_eq!(parse_clock("7:5"), None);
    }

    #[test]
    fn single_digit_minutes_fall_back_to_default_window() {
        let range = parse_range("7:5", date());
        assert_eq!(range.start, date().and_hms_opt(12, 0, 0).unwrap());
        assert_eq!(range.end, date().and_hms_opt(14, 0, 0).unwrap());
    }
}
