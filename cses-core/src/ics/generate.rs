//! ICS file generation.

use chrono::NaiveDate;
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::emit::CalendarEvent;
use crate::term::TermWindow;

pub const PRODID: &str = "-//CSES//cses-ics//EN";

/// Calendar-level properties written ahead of the events.
#[derive(Debug, Clone)]
pub struct CalendarMetadata {
    pub summary: String,
    pub term: TermWindow,
}

impl CalendarMetadata {
    /// Metadata for a schedule profile, e.g. `CSES iCalendar grade-7`.
    pub fn for_profile(profile_name: &str, term: TermWindow) -> Self {
        Self {
            summary: format!("CSES iCalendar {profile_name}"),
            term,
        }
    }
}

/// Generate .ics content for all class chains.
pub fn generate_calendar(metadata: &CalendarMetadata, events: &[CalendarEvent]) -> String {
    let mut cal = Calendar::new();
    cal.name(&metadata.summary);
    cal.append_property(Property::new("SUMMARY", &metadata.summary));
    cal.append_property(date_property("DTSTART", metadata.term.start));
    cal.append_property(date_property("DTEND", metadata.term.end));

    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@cses-ics", uuid::Uuid::new_v4()));
        ics_event.add_property("DTSTAMP", &dtstamp);
        ics_event.summary(&event.subject);

        // Floating datetimes (no Z, no TZID)
        ics_event.add_property("DTSTART", event.start.format("%Y%m%dT%H%M%S").to_string());
        ics_event.add_property("DTEND", event.end.format("%Y%m%dT%H%M%S").to_string());

        if let Some(ref loc) = event.location {
            ics_event.location(loc);
        }
        if let Some(ref desc) = event.description {
            ics_event.description(desc);
        }

        ics_event.add_property("RRULE", event.recurrence.to_rrule());

        cal.push(ics_event.done());
    }

    strip_ics_bloat(&cal.done().to_string())
}

fn date_property(name: &str, date: NaiveDate) -> Property {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    prop
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::WeeklyRecurrence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn metadata() -> CalendarMetadata {
        CalendarMetadata::for_profile(
            "grade7",
            TermWindow {
                start: date(2026, 9, 7),
                end: date(2027, 1, 31),
            },
        )
    }

    fn make_test_event() -> CalendarEvent {
        CalendarEvent {
            subject: "Math".to_string(),
            start: date(2026, 9, 7).and_hms_opt(8, 0, 0).unwrap(),
            end: date(2026, 9, 7).and_hms_opt(8, 45, 0).unwrap(),
            location: Some("Mx".to_string()),
            description: None,
            recurrence: WeeklyRecurrence {
                interval: 1,
                until: date(2027, 1, 31),
            },
        }
    }

    #[test]
    fn test_generate_calendar_metadata() {
        let ics = generate_calendar(&metadata(), &[]);

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"), "ICS:\n{}", ics);
        assert!(ics.contains("VERSION:2.0"), "ICS:\n{}", ics);
        assert!(ics.contains("PRODID:-//CSES//cses-ics//EN"), "ICS:\n{}", ics);
        assert!(ics.contains("SUMMARY:CSES iCalendar grade7"), "ICS:\n{}", ics);
        assert!(ics.contains("DTSTART;VALUE=DATE:20260907"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND;VALUE=DATE:20270131"), "ICS:\n{}", ics);
        assert!(!ics.contains("CALSCALE"), "CALSCALE should be stripped. ICS:\n{}", ics);
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn test_generate_calendar_event_properties() {
        let ics = generate_calendar(&metadata(), &[make_test_event()]);

        let vevent: String = ics
            .split("BEGIN:VEVENT")
            .nth(1)
            .unwrap()
            .split("END:VEVENT")
            .next()
            .unwrap()
            .to_string();

        assert!(vevent.contains("SUMMARY:Math"), "VEVENT:\n{}", vevent);
        assert!(vevent.contains("DTSTART:20260907T080000"), "VEVENT:\n{}", vevent);
        assert!(vevent.contains("DTEND:20260907T084500"), "VEVENT:\n{}", vevent);
        assert!(vevent.contains("LOCATION:Mx"), "VEVENT:\n{}", vevent);
        assert!(
            vevent.contains("RRULE:FREQ=WEEKLY;INTERVAL=1;UNTIL=20270131T235959"),
            "VEVENT:\n{}",
            vevent
        );
        assert!(vevent.contains("UID:"), "VEVENT:\n{}", vevent);
        assert!(!vevent.contains("DESCRIPTION"), "VEVENT:\n{}", vevent);
    }

    #[test]
    fn test_generate_calendar_one_vevent_per_event() {
        let mut second = make_test_event();
        second.recurrence.interval = 2;
        let ics = generate_calendar(&metadata(), &[make_test_event(), second]);

        let count = ics.lines().filter(|l| *l == "BEGIN:VEVENT").count();
        assert_eq!(count, 2, "ICS:\n{}", ics);
        assert!(ics.contains("INTERVAL=2"));
    }

    #[test]
    fn test_generate_calendar_uses_crlf() {
        let ics = generate_calendar(&metadata(), &[make_test_event()]);
        assert!(ics.lines().count() > 0);
        assert!(!ics.replace("\r\n", "").contains('\n'), "bare LF in output");
    }
}
