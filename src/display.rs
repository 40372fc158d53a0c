use chrono::{DateTime, Datelike, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::event::parse_iso_date;
use crate::parse;
use crate::tz;

// chrono-tz renders some zones as a bare numeric offset; these are the
// common ones guests are expected to pick.
const ZONE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Asia/Kolkata", "IST"),
    ("Asia/Calcutta", "IST"),
    ("Asia/Dubai", "GST"),
    ("Asia/Singapore", "SGT"),
    ("Asia/Riyadh", "AST"),
    ("Australia/Sydney", "AEDT"),
];

/// Short name for a zone at a given instant: the zone's own abbreviation
/// when it has one, then the static table, then the trailing segment of the
/// identifier.
pub fn zone_abbreviation(zone: Tz, instant: DateTime<Utc>) -> String {
    let rendered = instant.with_timezone(&zone).format("%Z").to_string();
    if !rendered.is_empty() && rendered.chars().all(|c| c.is_ascii_alphabetic()) {
        return rendered;
    }

    if let Some((_, abbreviation)) = ZONE_ABBREVIATIONS
        .iter()
        .find(|(name, _)| *name == zone.name())
    {
        return (*abbreviation).to_string();
    }

    zone.name()
        .rsplit('/')
        .next()
        .unwrap_or(zone.name())
        .to_string()
}

/// Renders an event time for a viewer: just the source-zone reading when
/// both zones agree, source and viewer readings otherwise. Unparseable
/// input comes back unchanged.
pub fn format_dual(date: &str, time: &str, source: Tz, viewer: Tz) -> String {
    let Some((wall, clock)) = start_wall_clock(date, time) else {
        return time.to_string();
    };

    let instant = tz::to_instant(wall, source);
    let source_reading = format!("{} {}", format_clock(clock), zone_abbreviation(source, instant));

    if same_zone(source, viewer, instant) {
        return source_reading;
    }

    let viewer_clock = tz::from_instant(instant, viewer).time();
    format!(
        "{} / {} {}",
        source_reading,
        format_clock(viewer_clock),
        zone_abbreviation(viewer, instant)
    )
}

/// `"2025-11-26"` -> `"Wednesday, 26th Nov"`. Empty string for input that
/// does not parse.
pub fn date_label(date: &str) -> String {
    let Some(parsed) = parse_iso_date(date) else {
        return String::new();
    };

    format!(
        "{}, {}{} {}",
        parsed.format("%A"),
        parsed.day(),
        ordinal_suffix(parsed.day()),
        parsed.format("%b")
    )
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn format_clock(clock: NaiveTime) -> String {
    clock.format("%-I:%M %p").to_string()
}

fn same_zone(source: Tz, viewer: Tz, instant: DateTime<Utc>) -> bool {
    source == viewer || zone_abbreviation(source, instant) == zone_abbreviation(viewer, instant)
}

fn start_wall_clock(date: &str, time: &str) -> Option<(NaiveDateTime, NaiveTime)> {
    let date = parse_iso_date(date)?;
    let start = time.split(['-', '\u{2013}']).next().unwrap_or(time);
    let clock = parse::parse_clock(start)?;
    Some((date.and_time(clock), clock))
}

#[cfg(test)]
mod tests {
    use chrono_tz::America::New_York;
    use chrono_tz::Asia::{Calcutta, Dubai, Kathmandu, Kolkata};

    use super::*;

    #[test]
    fn same_zone_renders_a_single_reading() {
        let rendered = format_dual("2025-11-26", "6:00 PM - 8:00 PM", Kolkata, Kolkata);
        assert_eq!(rendered, "6:00 PM IST");
    }

    #[test]
    fn matching_abbreviation_counts_as_the_same_zone() {
        let rendered = format_dual("2025-11-26", "18:00", Kolkata, Calcutta);
        assert_eq!(rendered, "6:00 PM IST");
    }

    #[test]
    fn different_zone_renders_both_readings() {
        let rendered = format_dual("2025-11-26", "6:00 PM", Kolkata, New_York);
        assert_eq!(rendered, "6:00 PM IST / 7:30 AM EST");
    }

    #[test]
    fn unparseable_time_is_returned_unchanged() {
        assert_eq!(
            format_dual("2025-11-26", "after sunset", Kolkata, New_York),
            "after sunset"
        );
        assert_eq!(format_dual("garbage", "18:00", Kolkata, New_York), "18:00");
    }

    #[test]
    fn abbreviation_fallback_chain() {
        let instant = Utc::now();
        assert_eq!(zone_abbreviation(Kolkata, instant), "IST");
        // Rendered as "+04" by the zone data, resolved by the static table.
        assert_eq!(zone_abbreviation(Dubai, instant), "GST");
        // Not in the table either; trailing segment of the identifier.
        assert_eq!(zone_abbreviation(Kathmandu, instant), "Kathmandu");
    }

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (30, "th"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {day}");
        }
    }

    #[test]
    fn date_labels() {
        assert_eq!(date_label("2025-11-26"), "Wednesday, 26th Nov");
        assert_eq!(date_label("2025-11-01"), "Saturday, 1st Nov");
        assert_eq!(date_label("nope"), "");
    }
}
