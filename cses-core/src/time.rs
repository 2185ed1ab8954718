//! Class time normalization.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CsesError, CsesResult};
use crate::model::ClockTime;

const SECONDS_PER_DAY: u32 = 24 * 3600;

impl ClockTime {
    /// Resolve to a time of day.
    pub fn to_time(&self) -> CsesResult<NaiveTime> {
        match self {
            ClockTime::Seconds(n) => {
                if *n >= SECONDS_PER_DAY {
                    return Err(CsesError::InvalidTime(n.to_string()));
                }
                NaiveTime::from_hms_opt(n / 3600, (n % 3600) / 60, n % 60)
                    .ok_or_else(|| CsesError::InvalidTime(n.to_string()))
            }
            ClockTime::Text(s) => {
                let s = s.trim();
                NaiveTime::parse_from_str(s, "%H:%M:%S")
                    .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
                    .map_err(|_| CsesError::InvalidTime(s.to_string()))
            }
        }
    }
}

/// Place a class time on `anchor + offset_days`. The result is naive local time.
pub fn normalize(value: &ClockTime, anchor: NaiveDate, offset_days: u64) -> CsesResult<NaiveDateTime> {
    let time = value.to_time()?;
    let date = anchor
        .checked_add_days(Days::new(offset_days))
        .ok_or_else(|| CsesError::InvalidDate(format!("{anchor} + {offset_days} days")))?;
    Ok(date.and_time(time))
}
