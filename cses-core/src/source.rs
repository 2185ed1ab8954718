//! Reading CSES schedule exports from disk.
//!
//! CSES documents are YAML; a `.json` extension switches the decoder to JSON.

use std::path::Path;

use tracing::debug;

use crate::error::{CsesError, CsesResult};
use crate::model::Schedule;

/// Encoding of a schedule export, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Format-recognition check run before any parsing.
///
/// The file must decode as a mapping with a `version` key and with `subjects`
/// and `schedules` sequences.
pub fn is_cses_file(path: &Path) -> bool {
    match check_format(path) {
        Ok(()) => true,
        Err(e) => {
            debug!("{} rejected: {}", path.display(), e);
            false
        }
    }
}

/// Like [`is_cses_file`], but reports why a file was rejected.
pub fn check_format(path: &Path) -> CsesResult<()> {
    let contents = std::fs::read_to_string(path)?;

    let value: serde_json::Value = match Format::from_path(path) {
        Format::Json => serde_json::from_str(&contents)
            .map_err(|e| CsesError::InvalidFormat(e.to_string()))?,
        Format::Yaml => serde_yaml::from_str(&contents)
            .map_err(|e| CsesError::InvalidFormat(e.to_string()))?,
    };

    let map = value
        .as_object()
        .ok_or_else(|| CsesError::InvalidFormat("top level is not a mapping".into()))?;

    if !map.contains_key("version") {
        return Err(CsesError::InvalidFormat("missing 'version'".into()));
    }
    for key in ["subjects", "schedules"] {
        if !map.get(key).is_some_and(|v| v.is_array()) {
            return Err(CsesError::InvalidFormat(format!("'{key}' is not a list")));
        }
    }

    Ok(())
}

/// Load and validate a schedule export.
pub fn load(path: &Path) -> CsesResult<Schedule> {
    let contents = std::fs::read_to_string(path)?;
    let schedule = parse(&contents, Format::from_path(path))?;

    debug!(
        "Loaded {} subjects and {} schedules from {}",
        schedule.subjects.len(),
        schedule.schedules.len(),
        path.display()
    );

    Ok(schedule)
}

/// Decode and validate schedule text.
pub fn parse(contents: &str, format: Format) -> CsesResult<Schedule> {
    let schedule: Schedule = match format {
        Format::Json => {
            serde_json::from_str(contents).map_err(|e| CsesError::Decode(e.to_string()))?
        }
        Format::Yaml => {
            serde_yaml::from_str(contents).map_err(|e| CsesError::Decode(e.to_string()))?
        }
    };

    schedule.validate()?;

    Ok(schedule)
}

/// Write the loaded subjects and entries to the debug log.
pub fn log_contents(schedule: &Schedule) {
    for subject in &schedule.subjects {
        debug!(
            name = %subject.name,
            simplified_name = subject.simplified_name.as_deref().unwrap_or(""),
            teacher = subject.teacher.as_deref().unwrap_or(""),
            room = subject.room.as_deref().unwrap_or(""),
            "subject"
        );
    }

    for entry in &schedule.schedules {
        debug!(
            name = %entry.name,
            enable_day = entry.enable_day,
            weeks = %entry.weeks,
            classes = entry.classes.len(),
            "schedule"
        );
        for class in &entry.classes {
            debug!(
                subject = %class.subject,
                start_time = %class.start_time,
                end_time = %class.end_time,
                "  class"
            );
        }
    }
}
