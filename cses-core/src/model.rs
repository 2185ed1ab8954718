//! Schedule data model.
//!
//! These types mirror the CSES document: reference data (`Subject`) and the
//! weekday-keyed class lists (`ScheduleEntry`) tagged to a rotation week.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::error::{CsesError, CsesResult};

/// A parsed CSES document.
#[derive(Debug, Clone, Deserialize)]
pub struct Schedule {
    pub version: u32,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub schedules: Vec<ScheduleEntry>,
}

/// Reference data for a class, looked up by `name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subject {
    pub name: String,
    #[serde(default)]
    pub simplified_name: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}

/// Class list for one weekday in one rotation variant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleEntry {
    pub name: String,
    /// 1 = Monday .. 7 = Sunday
    pub enable_day: u8,
    pub weeks: Weeks,
    #[serde(default)]
    pub classes: Vec<ClassOccurrence>,
}

/// A single timed block within a schedule entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassOccurrence {
    pub subject: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

/// Which weeks of the two-week rotation an entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weeks {
    All,
    Odd,
    Even,
}

impl fmt::Display for Weeks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Weeks::All => "all",
            Weeks::Odd => "odd",
            Weeks::Even => "even",
        };
        f.write_str(s)
    }
}

/// A class start or end time as written in the export.
///
/// Exports passed through a YAML 1.1 reader (e.g. PyYAML) turn an unquoted
/// `08:00:00` into the sexagesimal integer 28800, so a time can arrive either
/// as text or as seconds since midnight.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClockTime {
    Seconds(u32),
    Text(String),
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockTime::Seconds(n) => write!(f, "{n}"),
            ClockTime::Text(s) => f.write_str(s),
        }
    }
}

impl Schedule {
    /// Check the structural constraints serde cannot express.
    pub fn validate(&self) -> CsesResult<()> {
        for entry in &self.schedules {
            if !(1..=7).contains(&entry.enable_day) {
                return Err(CsesError::InvalidDay {
                    entry: entry.name.clone(),
                    day: entry.enable_day,
                });
            }
            for class in &entry.classes {
                class.start_time.to_time()?;
                class.end_time.to_time()?;
            }
        }
        Ok(())
    }

    pub fn subject_index(&self) -> SubjectIndex<'_> {
        SubjectIndex::new(&self.subjects)
    }
}

/// Name-keyed view over the subject list.
pub struct SubjectIndex<'a> {
    by_name: HashMap<&'a str, &'a Subject>,
}

impl<'a> SubjectIndex<'a> {
    pub fn new(subjects: &'a [Subject]) -> Self {
        let by_name = subjects.iter().map(|s| (s.name.as_str(), s)).collect();
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a Subject> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_accepts_integer_and_text() {
        let yaml = "subject: Math\nstart_time: 28800\nend_time: \"08:45:00\"\n";
        let class: ClassOccurrence = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(class.start_time, ClockTime::Seconds(28800));
        assert_eq!(class.end_time, ClockTime::Text("08:45:00".to_string()));
    }

    #[test]
    fn unknown_weeks_value_is_rejected() {
        let yaml = "name: Mon\nenable_day: 1\nweeks: third\nclasses: []\n";
        let result: Result<ScheduleEntry, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err(), "weeks: third should not decode");
    }

    #[test]
    fn validate_rejects_out_of_range_day() {
        let schedule = Schedule {
            version: 1,
            subjects: vec![],
            schedules: vec![ScheduleEntry {
                name: "Someday".to_string(),
                enable_day: 8,
                weeks: Weeks::All,
                classes: vec![],
            }],
        };
        let err = schedule.validate().unwrap_err();
        assert!(matches!(err, CsesError::InvalidDay { day: 8, .. }), "got {err:?}");
    }

    #[test]
    fn subject_index_looks_up_by_name() {
        let subjects = vec![Subject {
            name: "Math".to_string(),
            simplified_name: Some("M".to_string()),
            teacher: Some("Mx".to_string()),
            room: Some("101".to_string()),
        }];
        let index = SubjectIndex::new(&subjects);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("Math").and_then(|s| s.room.as_deref()), Some("101"));
        assert!(index.get("Physics").is_none());
    }
}
