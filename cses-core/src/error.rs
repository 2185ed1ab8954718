//! Error types for schedule conversion.

use thiserror::Error;

use crate::model::Weeks;

/// Errors that can occur while reading, resolving or emitting a schedule.
#[derive(Error, Debug)]
pub enum CsesError {
    #[error("Not a valid CSES file: {0}")]
    InvalidFormat(String),

    #[error("Could not decode schedule: {0}")]
    Decode(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}'. Expected HH:MM:SS or seconds since midnight")]
    InvalidTime(String),

    #[error("Schedule '{entry}' has enable_day {day}, expected 1..=7")]
    InvalidDay { entry: String, day: u8 },

    #[error("Subject '{subject}' used by schedule '{entry}' is not defined")]
    UnknownSubject { subject: String, entry: String },

    #[error("More than one '{weeks}' schedule for day {day}: '{first}' and '{second}'")]
    DuplicateEntry {
        day: u8,
        weeks: Weeks,
        first: String,
        second: String,
    },

    #[error("Recurrence error: {0}")]
    Recurrence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for schedule operations.
pub type CsesResult<T> = Result<T, CsesError>;
