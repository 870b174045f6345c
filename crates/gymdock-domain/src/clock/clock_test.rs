use chrono::{NaiveDate, TimeZone, Timelike, Utc};

use super::*;

fn toronto() -> ZoneCalendar {
    ZoneCalendar::default()
}

#[test]
fn test_late_evening_check_in_stays_on_local_day() {
    // 23:59 EDT on 2024-06-13 is 03:59 UTC on 2024-06-14
    let instant = Utc.with_ymd_and_hms(2024, 6, 14, 3, 59, 0).unwrap();

    assert_eq!(toronto().date_key(instant), "2024-06-13");
    assert_eq!(ZoneCalendar::new(chrono_tz::UTC).date_key(instant), "2024-06-14");
}

#[test]
fn test_monday_of_week_for_thursday() {
    // Thursday 2024-06-13, noon local
    let now = Utc.with_ymd_and_hms(2024, 6, 13, 16, 0, 0).unwrap();
    let monday = toronto().monday_of_week(now);

    assert_eq!(monday.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
    assert_eq!(monday.hour(), 0);
    assert_eq!(monday.minute(), 0);
}

#[test]
fn test_sunday_belongs_to_previous_week() {
    let sunday = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
    assert_eq!(monday_of(sunday), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());

    let monday = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    assert_eq!(monday_of(monday), monday);
}

#[test]
fn test_monday_across_dst_transitions() {
    // Spring forward: Sunday 2024-03-10 in Toronto
    let spring = Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap();
    assert_eq!(
        toronto().monday_of_week(spring).date_naive(),
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    );

    // Fall back: Sunday 2024-11-03 in Toronto
    let fall = Utc.with_ymd_and_hms(2024, 11, 3, 15, 0, 0).unwrap();
    assert_eq!(
        toronto().monday_of_week(fall).date_naive(),
        NaiveDate::from_ymd_opt(2024, 10, 28).unwrap()
    );
}

#[test]
fn test_local_midnight_in_zone_with_midnight_gap() {
    // Santiago skips 00:00-01:00 on its spring-forward day
    let calendar = ZoneCalendar::from_name("America/Santiago").unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
    let midnight = calendar.local_midnight(date);

    assert_eq!(midnight.date_naive(), date);
    assert_eq!(midnight.hour(), 1);
}

#[test]
fn test_now_in_zone_uses_injected_clock() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 4, 30, 0).unwrap());
    let now = toronto().now_in_zone(&clock);

    // 04:30 UTC is 23:30 EST the previous day
    assert_eq!(now.date_naive(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    assert_eq!(now.hour(), 23);
}

#[test]
fn test_from_name_rejects_unknown_zone() {
    assert!(ZoneCalendar::from_name("Mars/Olympus_Mons").is_err());
    assert_eq!(
        ZoneCalendar::from_name("America/Toronto").unwrap(),
        ZoneCalendar::default()
    );
}

#[test]
fn test_parse_instant_formats() {
    let with_offset = parse_instant("2024-06-13T23:59:00-04:00").unwrap();
    assert_eq!(with_offset, Utc.with_ymd_and_hms(2024, 6, 14, 3, 59, 0).unwrap());

    let zulu = parse_instant("2024-06-14T03:59:00Z").unwrap();
    assert_eq!(zulu, with_offset);

    // Naive timestamps are UTC
    let naive = parse_instant("2024-06-14T03:59:00.123456").unwrap();
    assert_eq!(naive.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());

    assert!(parse_instant("").is_none());
    assert!(parse_instant("yesterday").is_none());
    assert!(parse_instant("2024-13-01T00:00:00").is_none());
}

#[test]
fn test_parse_date_key() {
    assert_eq!(
        parse_date_key("2024-03-15"),
        NaiveDate::from_ymd_opt(2024, 3, 15)
    );
    assert!(parse_date_key("2024-3-15x").is_none());
}
