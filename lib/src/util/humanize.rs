//! English phrases for durations.
//!
//! Phrases stay coarse on purpose: whole days and hours once a duration
//! reaches a day, otherwise hours and minutes.  Seconds are never spoken.

const MICROS_PER_SECOND: i64 = 1_000_000;
const SECONDS_PER_DAY: i64 = 86_400;

fn unit(count: i64, singular: &str) -> String {
    if count == 1 {
        singular.to_owned()
    } else {
        format!("{singular}s")
    }
}

/// Render a non-negative number of minutes.
///
/// ```
/// use sinoclock::util::humanize::humanize;
///
/// assert_eq!(humanize(90.0), "1 hour and 30 minutes");
/// assert_eq!(humanize(45.0), "45 minutes");
/// ```
///
/// # Panics
///
/// If `minutes` is negative or not finite.
pub fn humanize(minutes: f64) -> String {
    assert!(minutes.is_finite() && minutes >= 0.0,
            "cannot humanize a duration of {minutes} minutes");

    let micros = (minutes * 60.0 * MICROS_PER_SECOND as f64).round() as i64;
    let total_seconds = micros / MICROS_PER_SECOND;
    let days = total_seconds / SECONDS_PER_DAY;
    let seconds = total_seconds % SECONDS_PER_DAY;
    let hours = seconds / 3600;

    if days > 0 {
        // minutes are dropped, and there is no space before the hour unit
        format!("{days} {} and {hours}{}", unit(days, "day"), unit(hours, "hour"))
    } else {
        let minutes = seconds / 60 - hours * 60;
        let hours_part = if hours > 0 {
            format!("{hours} {} and ", unit(hours, "hour"))
        } else {
            String::new()
        };
        format!("{hours_part}{minutes} {}", unit(minutes, "minute"))
    }
}
