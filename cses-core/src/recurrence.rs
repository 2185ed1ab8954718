//! RRULE expansion for emitted class chains.
//!
//! Floating times are expanded as if they were UTC; only the wall-clock
//! values of the result are used.

use chrono::NaiveDateTime;
use rrule::RRuleSet;
use tracing::warn;

use crate::emit::CalendarEvent;
use crate::error::{CsesError, CsesResult};

/// Upper bound on expanded occurrences per chain (ten years of weekly classes).
const MAX_OCCURRENCES: u16 = 520;

/// Build an iCalendar-format rule set string for the rrule crate parser.
fn build_rrule_string(event: &CalendarEvent) -> String {
    format!(
        "DTSTART:{}Z\nRRULE:FREQ=WEEKLY;INTERVAL={};UNTIL={}T235959Z",
        event.start.format("%Y%m%dT%H%M%S"),
        event.recurrence.interval,
        event.recurrence.until.format("%Y%m%d"),
    )
}

impl CalendarEvent {
    /// Start times of every occurrence of this chain within the term.
    ///
    /// Expansion stops after `MAX_OCCURRENCES`; a warning is logged when a
    /// chain is cut short.
    pub fn occurrences(&self) -> CsesResult<Vec<NaiveDateTime>> {
        if self.start.date() > self.recurrence.until {
            return Ok(Vec::new());
        }

        let rrule_set: RRuleSet = build_rrule_string(self).parse().map_err(|e| {
            CsesError::Recurrence(format!("Failed to parse RRULE for '{}': {}", self.subject, e))
        })?;

        let result = rrule_set.all(MAX_OCCURRENCES);
        if result.limited {
            warn!(
                "'{}' has more than {} occurrences; only the first {} are counted",
                self.subject, MAX_OCCURRENCES, MAX_OCCURRENCES
            );
        }

        Ok(result.dates.iter().map(|dt| dt.naive_utc()).collect())
    }
}

/// Total number of class sessions across all chains.
///
/// Each chain contributes at most `MAX_OCCURRENCES` sessions.
pub fn count_sessions(events: &[CalendarEvent]) -> CsesResult<usize> {
    let mut total = 0;
    for event in events {
        total += event.occurrences()?.len();
    }
    Ok(total)
}
