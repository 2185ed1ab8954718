mod config;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use cses_core::ics::{CalendarMetadata, generate_calendar};
use cses_core::{ConvertOptions, DuplicatePolicy, LocationSource, TermWindow, TwoTermAcademicYear};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "cses-ics")]
#[command(about = "Convert a CSES class schedule into an iCalendar file")]
struct Cli {
    /// CSES schedule file (YAML, or JSON with a .json extension)
    profile: Option<PathBuf>,

    /// Calendar start date (YYYY-MM-DD), moved forward to the next Monday
    #[arg(long)]
    calendar_start_date: Option<String>,

    /// Calendar end date (YYYY-MM-DD)
    #[arg(long)]
    calendar_end_date: Option<String>,

    /// Use the subject's room instead of its teacher as event location
    #[arg(long)]
    location_room: bool,

    /// Output filename [default: schedule.ics]
    #[arg(long)]
    output_filename: Option<PathBuf>,

    /// Fail when a weekday has more than one schedule for the same weeks
    #[arg(long)]
    reject_duplicates: bool,

    /// Log loaded subjects and schedules
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let profile = cli.profile.as_deref().context("No CSES file provided")?;

    cses_core::source::check_format(profile)
        .with_context(|| format!("{} is not a valid CSES file", profile.display()))?;

    let schedule = cses_core::source::load(profile)
        .with_context(|| format!("Failed to load {}", profile.display()))?;
    cses_core::source::log_contents(&schedule);

    let term = TermWindow::resolve(
        cli.calendar_start_date.as_deref(),
        cli.calendar_end_date.as_deref(),
        &TwoTermAcademicYear,
        Local::now().date_naive(),
    )?;
    info!("Term runs from {} to {}", term.start, term.end);

    let cfg = config::load_config()?;

    let location = if cli.location_room {
        LocationSource::Room
    } else {
        cfg.location.unwrap_or_default()
    };
    let duplicates = if cli.reject_duplicates {
        DuplicatePolicy::Reject
    } else {
        cfg.duplicates.unwrap_or_default()
    };
    let output = cli
        .output_filename
        .or(cfg.output_filename)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_OUTPUT_FILENAME));

    let conversion = cses_core::convert(&schedule, &term, ConvertOptions { location, duplicates })?;
    if !conversion.duplicates.is_empty() {
        info!(
            "{} duplicate schedule(s) were replaced by later ones",
            conversion.duplicates.len()
        );
    }

    let sessions = cses_core::recurrence::count_sessions(&conversion.events)?;

    let metadata = CalendarMetadata::for_profile(&profile_name(profile), term);
    let ics = generate_calendar(&metadata, &conversion.events);

    std::fs::write(&output, ics)
        .with_context(|| format!("Failed to write calendar to {}", output.display()))?;

    info!(
        "Wrote {} recurring events ({} class sessions) to {}",
        conversion.events.len(),
        sessions,
        output.display()
    );

    Ok(())
}

/// File stem of the schedule, used in the calendar summary.
fn profile_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "schedule".to_string())
}
