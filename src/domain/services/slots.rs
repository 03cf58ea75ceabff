use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashSet;

use crate::domain::models::availability::{Availability, AvailabilityRule};
use crate::domain::models::event_type::EventType;

/// All rule windows matching the date's weekday, anchored to that calendar
/// date as local wall-clock intervals, ordered by start time. No timezone
/// conversion happens here.
pub fn windows_for(rules: &[AvailabilityRule], date: NaiveDate) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    let weekday = date.weekday().num_days_from_monday() as i32;

    let mut windows: Vec<(NaiveDateTime, NaiveDateTime)> = rules
        .iter()
        .filter(|r| r.weekday == weekday)
        .map(|r| (date.and_time(r.start_time), date.and_time(r.end_time)))
        .collect();

    windows.sort();
    windows
}

/// Walks each window of the day in duration-sized steps and returns the
/// bookable start instants as RFC 3339 local datetimes (with the schedule's
/// offset), sorted and de-duplicated.
///
/// A candidate is dropped when its UTC equivalent lies before `now_utc`, when
/// a confirmed booking already starts at that instant, or when the local
/// wall-clock does not resolve to a single instant in the zone (DST gap or
/// fold). Pure function of its inputs.
pub fn calculate_slots(
    event_type: &EventType,
    availability: &Availability,
    rules: &[AvailabilityRule],
    date: NaiveDate,
    booked_starts_utc: &HashSet<DateTime<Utc>>,
    now_utc: DateTime<Utc>,
) -> Vec<String> {
    if event_type.duration_minutes <= 0 {
        return Vec::new();
    }

    let tz: Tz = availability.timezone.parse().unwrap_or(chrono_tz::UTC);
    let duration = Duration::minutes(event_type.duration_minutes as i64);

    let mut slots = Vec::new();

    for (window_start, window_end) in windows_for(rules, date) {
        let mut cur = window_start;
        while cur + duration <= window_end {
            if let Some(slot_local) = tz.from_local_datetime(&cur).single() {
                let slot_utc = slot_local.with_timezone(&Utc);
                if slot_utc >= now_utc && !booked_starts_utc.contains(&slot_utc) {
                    slots.push(slot_local.to_rfc3339());
                }
            }
            cur += duration;
        }
    }

    // Overlapping rules may generate the same instant twice; offering a slot
    // twice is a correctness defect, so the output has set semantics.
    slots.sort();
    slots.dedup();
    slots
}

/// UTC bounds of the local calendar day [00:00, next day 00:00) in the given
/// zone. None when local midnight does not exist on that date.
pub fn day_bounds_utc(tz: Tz, date: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let day_start = tz.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).earliest()?;
    let day_end = tz.from_local_datetime(&date.succ_opt()?.and_hms_opt(0, 0, 0)?).earliest()?;

    Some((day_start.with_timezone(&Utc), day_end.with_timezone(&Utc)))
}
