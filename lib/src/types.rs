use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Minutes an occurrence stays active after it starts, unless a schedule says
/// otherwise.
pub const DEFAULT_WINDOW_MINUTES: u32 = 30;

/// Time after midnight UTC at which a recurring daily event starts.
///
/// `hours` may be 24 to 47 for a trigger that falls on the following day.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd,
         Deserialize, Serialize)]
pub struct DailyOffset {
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
}

impl DailyOffset {
    pub const fn new(hours: u32, minutes: u32) -> DailyOffset {
        DailyOffset { hours, minutes }
    }

    pub fn as_duration(&self) -> chrono::Duration {
        chrono::Duration::hours(self.hours.into()) +
            chrono::Duration::minutes(self.minutes.into())
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct Schedule {
    /// Key used to select the schedule.
    pub name: String,
    /// Spoken name of the event when announcing the next occurrence.
    pub label: String,
    /// Spoken name of the event while an occurrence is active.
    pub active_label: String,
    pub offsets: Vec<DailyOffset>,
    /// How long an occurrence counts as active once started.
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u32,
}

fn default_window_minutes() -> u32 {
    DEFAULT_WINDOW_MINUTES
}

impl Schedule {
    pub fn new(name: &str, label: &str, active_label: &str,
               offsets: &[DailyOffset]) -> Schedule {
        Schedule {
            name: name.to_owned(),
            label: label.to_owned(),
            active_label: active_label.to_owned(),
            offsets: offsets.to_vec(),
            window_minutes: DEFAULT_WINDOW_MINUTES,
        }
    }

    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.window_minutes.into())
    }
}

/// Name of the weapon and armor upgrade schedule.
pub const UPGRADE: &str = "upgrade";
/// Name of the conquest schedule.
pub const CONQUEST: &str = "conquest";

const UPGRADE_OFFSETS: [DailyOffset; 7] = [
    DailyOffset::new(0, 30),
    DailyOffset::new(2, 30),
    DailyOffset::new(11, 30),
    DailyOffset::new(18, 30),
    DailyOffset::new(20, 30),
    DailyOffset::new(22, 30),
    DailyOffset::new(24, 30),
];

const CONQUEST_OFFSETS: [DailyOffset; 7] = [
    DailyOffset::new(1, 30),
    DailyOffset::new(3, 30),
    DailyOffset::new(12, 0),
    DailyOffset::new(19, 30),
    DailyOffset::new(21, 30),
    DailyOffset::new(23, 30),
    DailyOffset::new(25, 30),
];

/// Named schedules, read-only once built.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScheduleSet {
    schedules: BTreeMap<String, Schedule>,
}

impl ScheduleSet {
    /// The upgrade and conquest schedules.
    pub fn builtin() -> ScheduleSet {
        ScheduleSet::from_schedules(vec![
            Schedule::new(UPGRADE, "weapon and armor upgrade",
                          "weapon and armor", &UPGRADE_OFFSETS),
            Schedule::new(CONQUEST, "conquest", "conquest", &CONQUEST_OFFSETS),
        ])
    }

    /// Later schedules replace earlier ones with the same name.
    pub fn from_schedules(schedules: Vec<Schedule>) -> ScheduleSet {
        ScheduleSet {
            schedules: schedules.into_iter()
                .map(|s| (s.name.clone(), s))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Schedule> {
        self.schedules.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Schedule> {
        self.schedules.values()
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
