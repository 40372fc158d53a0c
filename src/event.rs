use chrono::NaiveDate;
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::ics::{Feed, ParsedEvent};
use crate::parse;
use crate::tz;

/// One event record as authored in the site configuration. Everything past
/// the name is free text filled in by the editor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub live_stream_url: Option<String>,
}

/// Name-substring lookup assigning default dates to events authored without
/// an explicit one. Kept injectable so a program can carry its own mapping.
#[derive(Debug, Clone)]
pub struct DateTable {
    entries: Vec<(String, NaiveDate)>,
    fallback: NaiveDate,
}

impl DateTable {
    pub fn new(entries: Vec<(String, NaiveDate)>, fallback: NaiveDate) -> Self {
        Self { entries, fallback }
    }

    /// Best-effort date for an event name; the fallback date rather than an
    /// error when nothing matches.
    pub fn lookup(&self, name: &str) -> NaiveDate {
        let name = name.to_lowercase();
        self.entries
            .iter()
            .find(|(keyword, _)| name.contains(keyword.as_str()))
            .map_or(self.fallback, |(_, date)| *date)
    }
}

static DEFAULT_DATES: Lazy<DateTable> = Lazy::new(|| {
    let date = |day| NaiveDate::from_ymd_opt(2025, 11, day).unwrap();
    let entries = [
        ("pellikuthuru", 24),
        ("mehendi", 24),
        ("sangeet", 25),
        ("music", 25),
        ("haldi", 25),
        ("turmeric", 25),
        ("muhurtham", 26),
        ("wedding", 26),
        ("reception", 30),
    ];
    DateTable::new(
        entries
            .into_iter()
            .map(|(keyword, day)| (keyword.to_string(), date(day)))
            .collect(),
        date(24),
    )
});

/// Identity shared by every event of one published program: the summary
/// prefix, the calendar name, the series UID and the authoring timezone.
#[derive(Debug, Clone)]
pub struct Program {
    pub label: String,
    pub calendar_name: String,
    pub uid: String,
    pub source_zone: Tz,
    pub dates: DateTable,
}

impl Program {
    pub fn wedding(source_zone: Tz) -> Self {
        Self {
            label: "Chandu & Mouni".to_string(),
            calendar_name: "Chandu & Mouni Wedding".to_string(),
            uid: "chandu-mouni-wedding-2025@wedding.chandu.dev".to_string(),
            source_zone,
            dates: DEFAULT_DATES.clone(),
        }
    }

    /// The explicit date when the editor supplied one, the heuristic table
    /// otherwise.
    pub fn event_date(&self, raw: &RawEvent) -> NaiveDate {
        raw.date
            .as_deref()
            .and_then(parse_iso_date)
            .unwrap_or_else(|| self.dates.lookup(&raw.name))
    }

    pub fn parse_event(&self, raw: &RawEvent) -> ParsedEvent {
        let range = parse::parse_range(&raw.time, self.event_date(raw));

        let mut description = raw.description.clone().unwrap_or_default();
        if let Some(url) = &raw.live_stream_url {
            if !description.is_empty() {
                description.push_str("\n\n");
            }
            description.push_str("Watch Live: ");
            description.push_str(url);
        }

        ParsedEvent {
            summary: format!("{} - {}", self.label, raw.name),
            start: tz::to_instant(range.start, self.source_zone),
            end: tz::to_instant(range.end, self.source_zone),
            location: raw.place.clone().unwrap_or_default(),
            description,
        }
    }

    pub fn feed(&self, raws: &[RawEvent]) -> Feed {
        Feed {
            name: self.calendar_name.clone(),
            uid: self.uid.clone(),
            events: raws.iter().map(|raw| self.parse_event(raw)).collect(),
        }
    }
}

/// Accepts `"2025-11-26"` or a full ISO datetime; only the date part is
/// used.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d").ok()
}
