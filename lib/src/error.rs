//! Error types for schedule resolution and loading.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// No offset of the schedule qualifies, which means the schedule is
    /// misconfigured.
    #[error("no occurrence found for schedule {schedule} \
             (include_active: {include_active})")]
    NoOccurrence { schedule: String, include_active: bool },

    #[error("invalid schedule {schedule}: {reason}")]
    Invalid { schedule: String, reason: String },

    #[error("unknown schedule: {0}")]
    Unknown(String),

    #[error("error loading schedules: {0}")]
    Load(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
