//! Sentences about a [`Schedule`] at a given instant.

use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::error::Result;
use crate::types::Schedule;
use super::humanize::humanize;
use super::resolve::next_occurrence_minutes;

/// Reminders fire this many minutes before the occurrence starts.
pub const REMINDER_LEAD_MINUTES: f64 = 1.0;

/// Format of [`ReminderPlan::trigger_time`]: local time without an offset, to
/// be read in [`REMINDER_TIME_ZONE`].
pub const TRIGGER_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const REMINDER_TIME_ZONE: &str = "Etc/UTC";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScheduleStatus {
    pub name: String,
    /// Positive: minutes until the next occurrence.  Zero or negative: minutes
    /// since the active occurrence started.
    pub minutes: f64,
    pub active: bool,
    pub sentence: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReminderPlan {
    /// Minutes from now until the reminder fires.
    pub minutes: f64,
    pub at: DateTime<Utc>,
    pub trigger_time: String,
    /// Spoken when the reminder fires.
    pub alert_text: String,
    /// Spoken when confirming the reminder.
    pub sentence: String,
}

pub fn status(schedule: &Schedule, now: DateTime<Utc>) -> Result<ScheduleStatus> {
    let minutes = next_occurrence_minutes(schedule, true, now)?;
    let active = minutes <= 0.0;
    let sentence = if active {
        // reports time since the occurrence started, not until its window
        // closes
        format!("There's a {} event happening right now. It ends in {}.",
                schedule.active_label, humanize(minutes.abs()))
    } else {
        format!("The next {} event is in {}.",
                schedule.label, humanize(minutes))
    };
    Ok(ScheduleStatus { name: schedule.name.clone(), minutes, active, sentence })
}

pub fn describe_schedule(schedule: &Schedule, now: DateTime<Utc>)
-> Result<String> {
    status(schedule, now).map(|s| s.sentence)
}

/// Plan a reminder shortly before the next occurrence that has not started
/// yet.
///
/// When the occurrence is less than the lead time away the reminder is due
/// immediately.
pub fn plan_reminder(schedule: &Schedule, now: DateTime<Utc>)
-> Result<ReminderPlan> {
    let next = next_occurrence_minutes(schedule, false, now)?;
    let minutes = (next - REMINDER_LEAD_MINUTES).max(0.0);
    let at = now + chrono::Duration::microseconds(
        (minutes * 60_000_000.0).round() as i64);
    log::debug!("reminder for {} in {minutes:.2} minutes (at {at})",
                schedule.name);
    Ok(ReminderPlan {
        minutes,
        at,
        trigger_time: at.format(TRIGGER_TIME_FORMAT).to_string(),
        alert_text: format!("The next {} event is about to begin!",
                            schedule.label),
        sentence: format!("Okay. I'll remind you in {}.", humanize(minutes)),
    })
}

/// Start of the occurrence [`status`] refers to.
pub fn occurrence_start(status: &ScheduleStatus, now: DateTime<Utc>)
-> DateTime<Utc> {
    let offset = chrono::Duration::microseconds(
        (status.minutes * 60_000_000.0).round() as i64);
    now + offset
}
