//! ICS output.
//!
//! Writes emitted class chains into a single VCALENDAR per RFC 5545.

mod generate;

pub use generate::{CalendarMetadata, PRODID, generate_calendar};
