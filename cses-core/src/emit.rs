//! Recurring event emission.
//!
//! Walks a resolved [`Rotation`] and produces one weekly recurring event per
//! class. Deduplicated weekdays repeat every week from week A; all other
//! slots repeat every second week from their own anchor date.

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CsesError, CsesResult};
use crate::model::{ScheduleEntry, Subject, SubjectIndex};
use crate::rotation::{DAYS_PER_WEEK, ROTATION_DAYS, Rotation};
use crate::term::TermWindow;
use crate::time::normalize;

/// Which subject field becomes the event location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    #[default]
    Teacher,
    Room,
}

/// Weekly recurrence bounded by the last day of term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyRecurrence {
    /// Weeks between occurrences (1 or 2)
    pub interval: u32,
    /// Last date an occurrence may fall on
    pub until: NaiveDate,
}

impl WeeklyRecurrence {
    /// RRULE value with a floating UNTIL at the end of the last day.
    pub fn to_rrule(&self) -> String {
        format!(
            "FREQ=WEEKLY;INTERVAL={};UNTIL={}T235959",
            self.interval,
            self.until.format("%Y%m%d")
        )
    }
}

/// A recurring class event, in naive local time.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub subject: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: Option<String>,
    pub description: Option<String>,
    pub recurrence: WeeklyRecurrence,
}

/// Emit recurring events for every class in the rotation.
pub fn emit(
    rotation: &Rotation<'_>,
    term: &TermWindow,
    subjects: &SubjectIndex<'_>,
    location: LocationSource,
) -> CsesResult<Vec<CalendarEvent>> {
    let mut events = Vec::new();

    for slot in 0..ROTATION_DAYS {
        let weekday = slot % DAYS_PER_WEEK;
        let in_week_b = slot >= DAYS_PER_WEEK;

        // Week B of a deduplicated day is already covered by the weekly chain.
        if in_week_b && rotation.dedup[weekday] {
            continue;
        }

        let Some(entry) = rotation.slots[slot] else {
            continue;
        };

        let anchor = term.start + Days::new(slot as u64);
        if anchor > term.end {
            debug!("Skipping '{}': first class on {} is after term end {}", entry.name, anchor, term.end);
            continue;
        }

        let interval = if rotation.dedup[weekday] { 1 } else { 2 };
        let recurrence = WeeklyRecurrence {
            interval,
            until: term.end,
        };

        emit_entry(entry, slot as u64, term.start, recurrence, subjects, location, &mut events)?;
    }

    debug!("Emitted {} recurring events", events.len());

    Ok(events)
}

fn emit_entry(
    entry: &ScheduleEntry,
    offset: u64,
    anchor: NaiveDate,
    recurrence: WeeklyRecurrence,
    subjects: &SubjectIndex<'_>,
    location: LocationSource,
    events: &mut Vec<CalendarEvent>,
) -> CsesResult<()> {
    for class in &entry.classes {
        let subject = subjects
            .get(&class.subject)
            .ok_or_else(|| CsesError::UnknownSubject {
                subject: class.subject.clone(),
                entry: entry.name.clone(),
            })?;

        events.push(CalendarEvent {
            subject: subject.name.clone(),
            start: normalize(&class.start_time, anchor, offset)?,
            end: normalize(&class.end_time, anchor, offset)?,
            location: location_of(subject, location),
            description: description_of(subject, location),
            recurrence,
        });
    }
    Ok(())
}

fn location_of(subject: &Subject, source: LocationSource) -> Option<String> {
    match source {
        LocationSource::Teacher => subject.teacher.clone(),
        LocationSource::Room => subject.room.clone(),
    }
}

/// Short name plus whichever of teacher/room is not the location.
fn description_of(subject: &Subject, source: LocationSource) -> Option<String> {
    let mut lines = Vec::new();

    if let Some(short) = subject.simplified_name.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Short name: {short}"));
    }
    match source {
        LocationSource::Teacher => {
            if let Some(room) = subject.room.as_deref().filter(|s| !s.is_empty()) {
                lines.push(format!("Room: {room}"));
            }
        }
        LocationSource::Room => {
            if let Some(teacher) = subject.teacher.as_deref().filter(|s| !s.is_empty()) {
                lines.push(format!("Teacher: {teacher}"));
            }
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" / "))
    }
}
