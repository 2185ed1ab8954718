use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cses_core::{DuplicatePolicy, LocationSource};
use serde::Deserialize;

pub const DEFAULT_OUTPUT_FILENAME: &str = "schedule.ics";

/// Optional defaults from ~/.config/cses-ics/config.toml
///
/// Every key can be overridden on the command line.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// "teacher" or "room"
    pub location: Option<LocationSource>,

    pub output_filename: Option<PathBuf>,

    /// "keep-last" or "reject"
    pub duplicates: Option<DuplicatePolicy>,
}

/// Get the config file path (~/.config/cses-ics/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("cses-ics");
    Ok(config_dir.join("config.toml"))
}

/// Load config, falling back to defaults when the file does not exist.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let config = load_config_from(Path::new("/nonexistent/cses-ics/config.toml")).unwrap();
        assert!(config.location.is_none());
        assert!(config.output_filename.is_none());
        assert!(config.duplicates.is_none());
    }

    #[test]
    fn reads_all_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "location = \"room\"\noutput_filename = \"term.ics\"\nduplicates = \"reject\""
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.location, Some(LocationSource::Room));
        assert_eq!(config.output_filename, Some(PathBuf::from("term.ics")));
        assert_eq!(config.duplicates, Some(DuplicatePolicy::Reject));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "colour = \"blue\"").unwrap();

        let err = load_config_from(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"), "got {err:#}");
    }
}
