use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use sinoclock::clock::FixedClock;
use sinoclock::skill::{Router, SkillRequest};
use sinoclock::types::{ScheduleSet, CONQUEST, UPGRADE};
use sinoclock::util::humanize::humanize;
use sinoclock::util::query;
use sinoclock::util::resolve::next_occurrence_minutes;

fn instant(offset_micros: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() +
        Duration::microseconds(offset_micros)
}

/// Any instant within a few years of 2024.
fn any_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..3 * 365 * 86_400_000_000).prop_map(instant)
}

fn any_schedule_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(UPGRADE), Just(CONQUEST)]
}

proptest! {
    #[test]
    fn always_finds_an_occurrence(name in any_schedule_name(), now in any_instant()) {
        let set = ScheduleSet::builtin();
        let schedule = set.get(name).unwrap();
        for include_active in [true, false] {
            let minutes = next_occurrence_minutes(schedule, include_active, now);
            prop_assert!(minutes.is_ok());
            // bounded by the span of the offsets
            prop_assert!(minutes.unwrap().abs() <= 26.0 * 60.0);
        }
    }

    #[test]
    fn future_search_is_strictly_positive(name in any_schedule_name(), now in any_instant()) {
        let set = ScheduleSet::builtin();
        let minutes = next_occurrence_minutes(set.get(name).unwrap(), false, now).unwrap();
        prop_assert!(minutes > 0.0);
    }

    #[test]
    fn active_result_within_window(name in any_schedule_name(), now in any_instant()) {
        let set = ScheduleSet::builtin();
        let minutes = next_occurrence_minutes(set.get(name).unwrap(), true, now).unwrap();
        prop_assert!(minutes > -30.0);
    }

    #[test]
    fn phrases_never_show_negative_numbers(name in any_schedule_name(), now in any_instant()) {
        let set = ScheduleSet::builtin();
        let schedule = set.get(name).unwrap();
        let minutes = next_occurrence_minutes(schedule, true, now).unwrap();
        let phrase = humanize(minutes.abs());
        prop_assert!(!phrase.contains('-'), "{}", phrase);
        let sentence = query::describe_schedule(schedule, now).unwrap();
        prop_assert!(!sentence.contains('-'), "{}", sentence);
    }

    #[test]
    fn reminder_never_after_occurrence(name in any_schedule_name(), now in any_instant()) {
        let set = ScheduleSet::builtin();
        let schedule = set.get(name).unwrap();
        let next = next_occurrence_minutes(schedule, false, now).unwrap();
        let plan = query::plan_reminder(schedule, now).unwrap();
        prop_assert!(plan.minutes >= 0.0);
        prop_assert!(plan.minutes < next);
        prop_assert!(plan.at >= now);
    }

    #[test]
    fn sub_day_phrases_always_end_in_minutes(minutes in 0.0f64..1439.0) {
        let phrase = humanize(minutes);
        prop_assert!(phrase.ends_with("minute") || phrase.ends_with("minutes"),
                     "{}", phrase);
    }
}

#[test]
fn upgrade_scenario_before_event() {
    let router = Router::new(Box::new(FixedClock(instant(15 * 60_000_000))),
                             ScheduleSet::builtin());
    let resp = router.handle(&SkillRequest::intent("UpgradeTimeIntent"));
    assert_eq!(resp.speech.as_deref(),
               Some("The next weapon and armor upgrade event is in 15 minutes."));
}

#[test]
fn upgrade_scenario_during_event() {
    let router = Router::new(Box::new(FixedClock(instant(40 * 60_000_000))),
                             ScheduleSet::builtin());
    let status = router.status(UPGRADE).unwrap();
    assert_eq!(status.minutes, -10.0);
    assert_eq!(status.sentence,
               "There's a weapon and armor event happening right now. \
                It ends in 10 minutes.");
}

#[test]
fn humanize_examples() {
    assert_eq!(humanize(1.0), "1 minute");
    assert_eq!(humanize(2.0), "2 minutes");
    assert_eq!(humanize(0.0), "0 minutes");
    assert_eq!(humanize(90.0), "1 hour and 30 minutes");
    assert_eq!(humanize(45.0), "45 minutes");
    assert_eq!(humanize(24.0 * 60.0 + 2.0 * 60.0 + 45.0), "1 day and 2hours");
}

#[test]
fn shipped_schedules_file_matches_builtin() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../schedules.yaml");
    let loaded = sinoclock::util::schedules::load_file(path).unwrap();
    assert_eq!(loaded, ScheduleSet::builtin());
}
