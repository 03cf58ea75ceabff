use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::HashSet;

use slotbook::domain::models::availability::{Availability, AvailabilityRule};
use slotbook::domain::models::event_type::EventType;
use slotbook::domain::services::slots::{calculate_slots, day_bounds_utc, windows_for};

fn availability(tz: &str) -> Availability {
    Availability::new(tz.to_string())
}

fn event_type(duration_minutes: i32) -> EventType {
    EventType::new(
        "demo".to_string(),
        "Demo".to_string(),
        String::new(),
        duration_minutes,
        true,
    )
}

fn rule(weekday: i32, start: &str, end: &str) -> AvailabilityRule {
    AvailabilityRule::new(
        "avail-1".to_string(),
        weekday,
        NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
        NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
    )
}

fn weekday_rules(start: &str, end: &str) -> Vec<AvailabilityRule> {
    (0..5).map(|wd| rule(wd, start, end)).collect()
}

fn long_ago() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
}

// 2030-01-07 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 7).unwrap()
}

#[test]
fn windows_match_weekday_and_are_ordered() {
    let rules = vec![
        rule(0, "14:00", "16:00"),
        rule(0, "09:00", "12:00"),
        rule(2, "10:00", "11:00"),
    ];

    let windows = windows_for(&rules, monday());
    assert_eq!(windows.len(), 2);
    assert!(windows[0].0 < windows[1].0);
    assert_eq!(windows[0].0.time(), NaiveTime::parse_from_str("09:00", "%H:%M").unwrap());
}

#[test]
fn no_rules_for_weekday_yields_no_windows() {
    // Sunday, but only weekday rules exist.
    let sunday = NaiveDate::from_ymd_opt(2030, 1, 6).unwrap();
    assert!(windows_for(&weekday_rules("09:00", "17:00"), sunday).is_empty());

    let slots = calculate_slots(
        &event_type(15),
        &availability("Asia/Kolkata"),
        &weekday_rules("09:00", "17:00"),
        sunday,
        &HashSet::new(),
        long_ago(),
    );
    assert!(slots.is_empty());
}

#[test]
fn kolkata_working_week_excludes_booked_slot() {
    // Mon-Fri 09:00-17:00 in Asia/Kolkata, 30-minute meetings, 10:00 local
    // already confirmed: 10:00 IST == 04:30 UTC.
    let booked: HashSet<DateTime<Utc>> =
        [Utc.with_ymd_and_hms(2030, 1, 7, 4, 30, 0).unwrap()].into_iter().collect();

    let slots = calculate_slots(
        &event_type(30),
        &availability("Asia/Kolkata"),
        &weekday_rules("09:00", "17:00"),
        monday(),
        &booked,
        long_ago(),
    );

    assert!(slots.contains(&"2030-01-07T09:00:00+05:30".to_string()));
    assert!(slots.contains(&"2030-01-07T09:30:00+05:30".to_string()));
    assert!(slots.contains(&"2030-01-07T10:30:00+05:30".to_string()));
    assert!(slots.contains(&"2030-01-07T11:00:00+05:30".to_string()));
    assert!(!slots.contains(&"2030-01-07T10:00:00+05:30".to_string()));

    // 16 half-hour starts between 09:00 and 16:30 inclusive, minus the booked one.
    assert_eq!(slots.len(), 15);
}

#[test]
fn past_slots_are_never_offered() {
    // "now" is 12:00 IST on the requested Monday; the 12:00 slot itself is
    // still bookable, everything earlier is gone.
    let now = Utc.with_ymd_and_hms(2030, 1, 7, 6, 30, 0).unwrap();

    let slots = calculate_slots(
        &event_type(30),
        &availability("Asia/Kolkata"),
        &weekday_rules("09:00", "17:00"),
        monday(),
        &HashSet::new(),
        now,
    );

    assert_eq!(slots.first().unwrap(), "2030-01-07T12:00:00+05:30");
    assert_eq!(slots.len(), 10);
}

#[test]
fn overlapping_rules_do_not_duplicate_slots() {
    let rules = vec![rule(0, "09:00", "11:00"), rule(0, "10:00", "12:00")];

    let slots = calculate_slots(
        &event_type(60),
        &availability("Asia/Kolkata"),
        &rules,
        monday(),
        &HashSet::new(),
        long_ago(),
    );

    assert_eq!(
        slots,
        vec![
            "2030-01-07T09:00:00+05:30".to_string(),
            "2030-01-07T10:00:00+05:30".to_string(),
            "2030-01-07T11:00:00+05:30".to_string(),
        ]
    );
}

#[test]
fn slots_are_strictly_increasing() {
    let rules = vec![rule(0, "09:00", "10:30"), rule(0, "14:00", "15:30")];

    let slots = calculate_slots(
        &event_type(45),
        &availability("Europe/Berlin"),
        &rules,
        monday(),
        &HashSet::new(),
        long_ago(),
    );

    let instants: Vec<DateTime<Utc>> = slots
        .iter()
        .map(|s| DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc))
        .collect();
    assert!(!instants.is_empty());
    for pair in instants.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn slot_must_fit_entirely_inside_window() {
    let rules = vec![rule(0, "09:00", "10:00")];

    let slots = calculate_slots(
        &event_type(45),
        &availability("Asia/Kolkata"),
        &rules,
        monday(),
        &HashSet::new(),
        long_ago(),
    );

    // 09:45 + 45min would spill past 10:00.
    assert_eq!(slots, vec!["2030-01-07T09:00:00+05:30".to_string()]);
}

#[test]
fn nonexistent_local_times_are_skipped_across_dst_gap() {
    // US DST starts 2030-03-10; 02:00-03:00 local does not exist.
    let spring_forward = NaiveDate::from_ymd_opt(2030, 3, 10).unwrap();
    let rules = vec![rule(6, "01:30", "03:30")];

    let slots = calculate_slots(
        &event_type(30),
        &availability("America/New_York"),
        &rules,
        spring_forward,
        &HashSet::new(),
        long_ago(),
    );

    assert_eq!(
        slots,
        vec![
            "2030-03-10T01:30:00-05:00".to_string(),
            "2030-03-10T03:00:00-04:00".to_string(),
        ]
    );
}

#[test]
fn zero_duration_produces_no_slots() {
    let slots = calculate_slots(
        &event_type(0),
        &availability("Asia/Kolkata"),
        &weekday_rules("09:00", "17:00"),
        monday(),
        &HashSet::new(),
        long_ago(),
    );
    assert!(slots.is_empty());
}

#[test]
fn day_bounds_cover_the_local_day() {
    let tz: chrono_tz::Tz = "Asia/Kolkata".parse().unwrap();
    let (start, end) = day_bounds_utc(tz, monday()).unwrap();

    assert_eq!(start, Utc.with_ymd_and_hms(2030, 1, 6, 18, 30, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2030, 1, 7, 18, 30, 0).unwrap());
}
