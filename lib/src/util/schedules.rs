//! Loading and checking [`ScheduleSet`]s.
//!
//! A schedules file is YAML:
//!
//! ```yaml
//! schedules:
//!   - name: upgrade
//!     label: weapon and armor upgrade
//!     active-label: weapon and armor
//!     window-minutes: 30
//!     offsets:
//!       - { hours: 0, minutes: 30 }
//!       - { hours: 24, minutes: 30 }
//! ```

use std::collections::HashSet;
use std::path::Path;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use crate::config::{self, Config};
use crate::configrefs;
use crate::error::{Result, ScheduleError};
use crate::types::{Schedule, ScheduleSet};
use super::resolve::next_occurrence_minutes;

/// Offsets may reach into the following day, but no further.
pub const MAX_OFFSET_HOURS: u32 = 48;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ScheduleEntry {
    name: String,
    label: String,
    active_label: Option<String>,
    window_minutes: Option<u32>,
    offsets: Vec<crate::types::DailyOffset>,
}

#[derive(Debug, Deserialize)]
struct ScheduleFile {
    schedules: Vec<ScheduleEntry>,
}

impl ScheduleEntry {
    fn into_schedule(self) -> Schedule {
        let mut schedule = Schedule::new(
            &self.name,
            &self.label,
            self.active_label.as_deref().unwrap_or(&self.label),
            &self.offsets);
        if let Some(window) = self.window_minutes {
            schedule.window_minutes = window;
        }
        schedule
    }
}

/// Parse and validate schedules from YAML text.
pub fn from_yaml_str(text: &str) -> Result<ScheduleSet> {
    let file: ScheduleFile = serde_yaml::from_str(text)
        .map_err(|e| ScheduleError::Load(e.to_string()))?;

    let mut names = HashSet::new();
    for entry in &file.schedules {
        if !names.insert(entry.name.clone()) {
            return Err(ScheduleError::Invalid {
                schedule: entry.name.clone(),
                reason: "defined more than once".to_owned(),
            })
        }
    }

    let set = ScheduleSet::from_schedules(
        file.schedules.into_iter().map(ScheduleEntry::into_schedule).collect());
    validate(&set)?;
    Ok(set)
}

/// Parse and validate schedules from a YAML file.
pub fn load_file<P>(path: P) -> Result<ScheduleSet>
where
    P: AsRef<Path> + core::fmt::Debug
{
    let text = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ScheduleError::Load(format!("{path:?}: {e}")))?;
    from_yaml_str(&text)
}

/// Load the schedules file named by configuration, or use the
/// [builtin](ScheduleSet::builtin) schedules.
pub fn from_config<C>(cfg: &C) -> std::result::Result<ScheduleSet, String>
where
    C: Config + ?Sized,
{
    match config::get_ref(cfg, &configrefs::SCHEDULES_PATH)? {
        Some(path) => {
            log::info!("loading schedules from {path:?}");
            load_file(&path).map_err(|e| e.to_string())
        },
        None => Ok(ScheduleSet::builtin()),
    }
}

/// Check that a schedule is well-formed, and that there is always a next
/// occurrence, whether or not active occurrences are included.
pub fn validate_schedule(schedule: &Schedule) -> Result<()> {
    let invalid = |reason: String| ScheduleError::Invalid {
        schedule: schedule.name.clone(),
        reason,
    };

    if schedule.offsets.is_empty() {
        return Err(invalid("no offsets".to_owned()))
    }
    if schedule.window_minutes == 0 {
        return Err(invalid("window must be at least one minute".to_owned()))
    }
    if let Some(offset) = schedule.offsets.iter()
        .find(|o| o.hours >= MAX_OFFSET_HOURS)
    {
        return Err(invalid(format!(
            "offset {}:{} is more than a day past midnight",
            offset.hours, offset.minutes)))
    }
    if let Some(offset) = schedule.offsets.iter().find(|o| o.minutes >= 60) {
        return Err(invalid(format!(
            "offset {}:{} has more than 59 minutes",
            offset.hours, offset.minutes)))
    }

    // occurrences only depend on the time of day, so any midnight will do
    let midnight = DateTime::<Utc>::default();
    for minute in 0..24 * 60 {
        let now = midnight + Duration::minutes(minute);
        for include_active in [true, false] {
            next_occurrence_minutes(schedule, include_active, now)?;
        }
    }
    Ok(())
}

pub fn validate(set: &ScheduleSet) -> Result<()> {
    set.iter().try_for_each(validate_schedule)
}
