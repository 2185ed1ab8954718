//! Core library for converting CSES class schedules to iCalendar.
//!
//! - `source` reads and checks schedule exports
//! - `term` derives the term window
//! - `rotation` resolves odd/even/all entries into a two-week template
//! - `emit` turns the template into recurring events
//! - `ics` writes the calendar file

pub mod emit;
pub mod error;
pub mod ics;
pub mod model;
pub mod recurrence;
pub mod rotation;
pub mod source;
pub mod term;
pub mod time;

pub use emit::{CalendarEvent, LocationSource, WeeklyRecurrence};
pub use error::{CsesError, CsesResult};
pub use model::{ClassOccurrence, ClockTime, Schedule, ScheduleEntry, Subject, SubjectIndex, Weeks};
pub use rotation::{DuplicateEntry, DuplicatePolicy, Rotation};
pub use term::{DefaultWindowPolicy, TermWindow, TwoTermAcademicYear};

/// Knobs for a single conversion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    pub location: LocationSource,
    pub duplicates: DuplicatePolicy,
}

/// Result of resolving and emitting one schedule.
#[derive(Debug)]
pub struct Conversion {
    pub events: Vec<CalendarEvent>,
    pub duplicates: Vec<DuplicateEntry>,
}

/// Resolve the rotation and emit its recurring events.
pub fn convert(schedule: &Schedule, term: &TermWindow, options: ConvertOptions) -> CsesResult<Conversion> {
    let rotation = rotation::resolve(&schedule.schedules, options.duplicates)?;
    let events = emit::emit(&rotation, term, &schedule.subject_index(), options.location)?;

    Ok(Conversion {
        events,
        duplicates: rotation.duplicates,
    })
}
