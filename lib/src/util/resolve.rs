//! Find the next occurrence of a [`Schedule`].

use chrono::{DateTime, NaiveTime, Utc};
use crate::error::{Result, ScheduleError};
use crate::types::Schedule;

const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Fractional minutes from `from` to `to`, at microsecond resolution.
pub fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_microseconds().unwrap_or_default() as f64 / MICROS_PER_MINUTE
}

/// Midnight UTC at the start of the day `now` falls in.
pub fn day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Minutes until the next occurrence of `schedule` after `now`.
///
/// Offsets are only evaluated against the current UTC day; schedules carry an
/// offset past 24h to cover the wrap into the next day.
///
/// With `include_active`, an occurrence that started less than the schedule's
/// window ago still counts, and the result is negative: the minutes since it
/// started.  Occurrences exactly at the lower bound (`0`, or minus the window)
/// are excluded.
pub fn next_occurrence_minutes(
    schedule: &Schedule,
    include_active: bool,
    now: DateTime<Utc>,
) -> Result<f64> {
    let min_time = if include_active {
        -f64::from(schedule.window_minutes)
    } else {
        0.0
    };
    let midnight = day_start(now);

    schedule.offsets.iter()
        .filter_map(|offset| midnight.checked_add_signed(offset.as_duration()))
        .map(|start| minutes_between(now, start))
        .filter(|minutes| min_time < *minutes)
        .min_by(f64::total_cmp)
        .ok_or_else(|| ScheduleError::NoOccurrence {
            schedule: schedule.name.clone(),
            include_active,
        })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use super::*;
    use crate::types::{DailyOffset, ScheduleSet, CONQUEST, UPGRADE};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap()
    }

    fn upgrade() -> Schedule {
        ScheduleSet::builtin().get(UPGRADE).unwrap().clone()
    }

    fn conquest() -> Schedule {
        ScheduleSet::builtin().get(CONQUEST).unwrap().clone()
    }

    #[test]
    fn nearest_future_offset() {
        assert_eq!(next_occurrence_minutes(&upgrade(), true, at(0, 15, 0)),
                   Ok(15.0));
        assert_eq!(next_occurrence_minutes(&conquest(), true, at(4, 0, 0)),
                   Ok(480.0));
    }

    #[test]
    fn active_occurrence_is_negative() {
        assert_eq!(next_occurrence_minutes(&upgrade(), true, at(0, 40, 0)),
                   Ok(-10.0));
    }

    #[test]
    fn active_occurrence_skipped_without_include_active() {
        // 00:30 started ten minutes ago, 02:30 is next
        assert_eq!(next_occurrence_minutes(&upgrade(), false, at(0, 40, 0)),
                   Ok(110.0));
    }

    #[test]
    fn start_instant_counts_as_active() {
        assert_eq!(next_occurrence_minutes(&upgrade(), true, at(0, 30, 0)),
                   Ok(0.0));
        assert_eq!(next_occurrence_minutes(&upgrade(), false, at(0, 30, 0)),
                   Ok(120.0));
    }

    #[test]
    fn window_end_is_exclusive() {
        // exactly 30 minutes after 00:30 is no longer active
        assert_eq!(next_occurrence_minutes(&upgrade(), true, at(1, 0, 0)),
                   Ok(90.0));
        assert_eq!(next_occurrence_minutes(&upgrade(), true, at(0, 59, 30)),
                   Ok(-29.5));
    }

    #[test]
    fn wraps_to_next_day_offset() {
        assert_eq!(next_occurrence_minutes(&upgrade(), true, at(23, 45, 0)),
                   Ok(45.0));
        assert_eq!(next_occurrence_minutes(&conquest(), false, at(23, 45, 0)),
                   Ok(105.0));
    }

    #[test]
    fn fractional_minutes_are_kept() {
        assert_eq!(next_occurrence_minutes(&upgrade(), true, at(0, 14, 30)),
                   Ok(15.5));
    }

    #[test]
    fn no_qualifying_offset_is_an_error() {
        let schedule = Schedule::new("morning", "morning", "morning",
                                     &[DailyOffset::new(6, 0)]);
        assert_eq!(
            next_occurrence_minutes(&schedule, false, at(7, 0, 0)),
            Err(ScheduleError::NoOccurrence {
                schedule: "morning".to_owned(),
                include_active: false,
            }));
    }

    #[test]
    fn out_of_range_offset_is_skipped() {
        let schedule = Schedule::new("far", "far", "far", &[
            DailyOffset::new(4_000_000_000, 0),
            DailyOffset::new(1, 0),
            DailyOffset::new(25, 0),
        ]);
        assert_eq!(next_occurrence_minutes(&schedule, false, at(0, 30, 0)),
                   Ok(30.0));
    }

    #[test]
    fn empty_schedule_is_an_error() {
        let schedule = Schedule::new("empty", "empty", "empty", &[]);
        assert!(next_occurrence_minutes(&schedule, true, at(7, 0, 0)).is_err());
    }
}
