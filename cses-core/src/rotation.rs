//! Two-week rotation resolution.
//!
//! Entries tagged `all`, `odd` and `even` are reduced to a 14-slot template:
//! slots 0..7 are week A (odd weeks, Monday first) and slots 7..14 are week B.
//! A per-weekday dedup flag marks days where both weeks are the same `all`
//! entry, so a single weekly chain covers them.

use serde::Deserialize;
use tracing::warn;

use crate::error::{CsesError, CsesResult};
use crate::model::{ScheduleEntry, Weeks};

pub const DAYS_PER_WEEK: usize = 7;
pub const ROTATION_DAYS: usize = 2 * DAYS_PER_WEEK;

/// What to do when several entries share a weekday and week variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the entry that appears last in the export and warn about the rest.
    #[default]
    KeepLast,
    /// Fail resolution.
    Reject,
}

/// An entry that lost to a later one for the same day and week variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEntry {
    pub day: u8,
    pub weeks: Weeks,
    pub discarded: String,
    pub kept: String,
}

/// The resolved two-week template.
#[derive(Debug)]
pub struct Rotation<'a> {
    pub slots: [Option<&'a ScheduleEntry>; ROTATION_DAYS],
    /// `dedup[d]` is true when weekday `d` (0 = Monday) has no `odd` or `even` entry.
    pub dedup: [bool; DAYS_PER_WEEK],
    pub duplicates: Vec<DuplicateEntry>,
}

impl<'a> Rotation<'a> {
    pub fn week_a(&self, weekday: usize) -> Option<&'a ScheduleEntry> {
        self.slots[weekday]
    }

    pub fn week_b(&self, weekday: usize) -> Option<&'a ScheduleEntry> {
        self.slots[weekday + DAYS_PER_WEEK]
    }
}

/// Resolve schedule entries into the two-week template.
pub fn resolve<'a>(entries: &'a [ScheduleEntry], policy: DuplicatePolicy) -> CsesResult<Rotation<'a>> {
    let mut slots = [None; ROTATION_DAYS];
    let mut dedup = [false; DAYS_PER_WEEK];
    let mut duplicates = Vec::new();

    for weekday in 0..DAYS_PER_WEEK {
        let day = (weekday + 1) as u8;

        let all = pick(entries, day, Weeks::All, policy, &mut duplicates)?;
        let odd = pick(entries, day, Weeks::Odd, policy, &mut duplicates)?;
        let even = pick(entries, day, Weeks::Even, policy, &mut duplicates)?;

        match (odd, even) {
            (None, None) => {
                // Only `all` entries (or nothing): both weeks are identical.
                slots[weekday] = all;
                slots[weekday + DAYS_PER_WEEK] = all;
                dedup[weekday] = true;
            }
            (odd, even) => {
                slots[weekday] = odd.or(all);
                slots[weekday + DAYS_PER_WEEK] = even.or(all);
            }
        }
    }

    Ok(Rotation {
        slots,
        dedup,
        duplicates,
    })
}

/// Select the authoritative entry for one `(day, weeks)` bucket.
fn pick<'a>(
    entries: &'a [ScheduleEntry],
    day: u8,
    weeks: Weeks,
    policy: DuplicatePolicy,
    duplicates: &mut Vec<DuplicateEntry>,
) -> CsesResult<Option<&'a ScheduleEntry>> {
    let mut chosen: Option<&ScheduleEntry> = None;

    for entry in entries.iter().filter(|e| e.enable_day == day && e.weeks == weeks) {
        if let Some(previous) = chosen {
            if policy == DuplicatePolicy::Reject {
                return Err(CsesError::DuplicateEntry {
                    day,
                    weeks,
                    first: previous.name.clone(),
                    second: entry.name.clone(),
                });
            }
            warn!(
                "Day {} has more than one '{}' schedule; '{}' replaces '{}'",
                day, weeks, entry.name, previous.name
            );
            duplicates.push(DuplicateEntry {
                day,
                weeks,
                discarded: previous.name.clone(),
                kept: entry.name.clone(),
            });
        }
        chosen = Some(entry);
    }

    Ok(chosen)
}
