//! Term window calculation.
//!
//! A term window bounds every generated recurrence. When the user does not
//! supply explicit dates, a [`DefaultWindowPolicy`] derives them from today.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{CsesError, CsesResult};

/// Start and end of the academic term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Supplies the term window used when no explicit dates are given.
pub trait DefaultWindowPolicy {
    fn window_for(&self, today: NaiveDate) -> TermWindow;
}

/// Two terms per academic year: September 1 to January 31, then February 1
/// to July 31.
///
/// September through February belong to the first term, March through
/// August to the second.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoTermAcademicYear;

impl DefaultWindowPolicy for TwoTermAcademicYear {
    fn window_for(&self, today: NaiveDate) -> TermWindow {
        let year = today.year();
        let (start, end) = match today.month() {
            9..=12 => (ymd(year, 9, 1), ymd(year + 1, 1, 31)),
            1 | 2 => (ymd(year - 1, 9, 1), ymd(year, 1, 31)),
            _ => (ymd(year, 2, 1), ymd(year, 7, 31)),
        };
        TermWindow { start, end }
    }
}

// Only called with fixed, valid month/day pairs.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

impl TermWindow {
    /// Build the term window from optional `YYYY-MM-DD` overrides.
    ///
    /// Each missing bound falls back to the policy. The start date is then
    /// moved forward to the first Monday on or after it; the end date is kept
    /// as given. End-before-start is not checked.
    pub fn resolve(
        start_override: Option<&str>,
        end_override: Option<&str>,
        policy: &dyn DefaultWindowPolicy,
        today: NaiveDate,
    ) -> CsesResult<Self> {
        let default = policy.window_for(today);

        let start = match start_override {
            Some(s) => parse_date(s)?,
            None => default.start,
        };
        let end = match end_override {
            Some(s) => parse_date(s)?,
            None => default.end,
        };

        Ok(TermWindow {
            start: next_monday(start),
            end,
        })
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> CsesResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CsesError::InvalidDate(s.to_string()))
}

/// First Monday on or after `date`.
pub fn next_monday(date: NaiveDate) -> NaiveDate {
    let ahead = (7 - date.weekday().num_days_from_monday()) % 7;
    date.checked_add_days(Days::new(u64::from(ahead))).unwrap_or(date)
}
