use chrono::{DateTime, Utc};
use ics::components::Property;
use ics::properties::{
    CalScale, Categories, Description, DtEnd, DtStart, LastModified, Location, Method,
    RecurrenceID, Sequence, Status, Summary,
};
use ics::{escape_text, ICalendar};

/// An event ready for encoding: absolute instants plus untouched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: String,
    pub description: String,
}

/// A whole program published as one calendar, every VEVENT sharing the
/// series UID.
#[derive(Debug, Clone)]
pub struct Feed {
    pub name: String,
    pub uid: String,
    pub events: Vec<ParsedEvent>,
}

const PRODID_FEED: &str = "-//Wedding Invitation//Calendar Feed//EN";
const PRODID_SINGLE: &str = "-//Wedding Invitation//Calendar//EN";
const CALDESC: &str = "Wedding ceremonies and reception events. Delete any event to remove all.";
const PUBLISHED_TTL: &str = "PT1H";

fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

impl Feed {
    /// The subscribable feed document. DTSTAMP and SEQUENCE are taken from
    /// the current instant, so every call produces a fresher revision of
    /// the same (UID, RECURRENCE-ID) pairs.
    pub fn to_ics(&self) -> ICalendar<'_> {
        self.build(Utc::now())
    }

    /// A one-event document for a direct download: the plain envelope,
    /// without the subscription hints the feed carries. `None` when
    /// `index` is out of range.
    pub fn single_ics(&self, index: usize) -> Option<ICalendar<'_>> {
        let event = self.events.get(index)?;
        let mut calendar = self.envelope(PRODID_SINGLE);
        calendar.add_event(self.vevent(event, Utc::now()));
        Some(calendar)
    }

    fn build(&self, now: DateTime<Utc>) -> ICalendar<'_> {
        let mut calendar = self.envelope(PRODID_FEED);
        calendar.push(Property::new("X-WR-CALDESC", CALDESC));
        calendar.push(Property::new("X-PUBLISHED-TTL", PUBLISHED_TTL));
        for event in &self.events {
            calendar.add_event(self.vevent(event, now));
        }
        calendar
    }

    fn envelope(&self, prodid: &'static str) -> ICalendar<'_> {
        let mut calendar = ICalendar::new("2.0", prodid);
        calendar.push(CalScale::new("GREGORIAN"));
        calendar.push(Method::new("PUBLISH"));
        calendar.push(Property::new("X-WR-CALNAME", escape_text(self.name.as_str())));
        calendar
    }

    fn vevent<'a>(&'a self, event: &'a ParsedEvent, now: DateTime<Utc>) -> ics::Event<'a> {
        let dtstamp = format_utc(now);
        let dtstart = format_utc(event.start);

        // The shared UID plus a per-instance RECURRENCE-ID is what makes
        // clients treat the whole program as one updatable series.
        let mut vevent = ics::Event::new(self.uid.as_str(), dtstamp.clone());
        vevent.push(RecurrenceID::new(dtstart.clone()));
        vevent.push(DtStart::new(dtstart));
        vevent.push(DtEnd::new(format_utc(event.end)));
        vevent.push(Summary::new(escape_text(event.summary.as_str())));
        vevent.push(Location::new(escape_text(event.location.as_str())));
        vevent.push(Description::new(escape_text(event.description.as_str())));
        vevent.push(Categories::new(escape_text(self.name.as_str())));
        vevent.push(Status::confirmed());
        // Wall-clock seconds as the revision counter: a later publish
        // always carries a sequence at least as high as an earlier one.
        vevent.push(Sequence::new(now.timestamp().to_string()));
        vevent.push(LastModified::new(dtstamp));
        vevent
    }
}
