use chrono::{TimeZone, Timelike, Utc};
use taperplan_core::TaperDate;

#[test]
fn iso_round_trip_preserves_the_day_string() {
    for day in ["2024-01-01", "2024-02-29", "1999-12-31", "2030-07-04"] {
        let date = TaperDate::from_iso(day).unwrap();
        assert_eq!(date.iso_day().as_str(), day);
    }
}

#[test]
fn from_instant_discards_time_of_day() {
    let late = Utc.with_ymd_and_hms(2024, 6, 1, 23, 59, 59).unwrap();
    let early = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 1).unwrap();
    assert_eq!(TaperDate::from_instant(late), TaperDate::from_instant(early));
    assert_eq!(
        TaperDate::from_instant(late).iso_day().as_str(),
        "2024-06-01"
    );
}

#[test]
fn dates_are_pinned_to_noon_utc_after_arithmetic() {
    let mut date = TaperDate::from_iso("2024-03-09").unwrap();
    date.increment_by_days(2);
    assert_eq!(date.instant().hour(), 12);
    // Crossing the US spring-forward weekend must not shift the civil day.
    assert_eq!(date.iso_day().as_str(), "2024-03-11");
}

#[test]
fn increment_crosses_month_and_year_boundaries() {
    let mut date = TaperDate::from_iso("2024-12-31").unwrap();
    date.increment_by_days(1);
    assert_eq!(date.iso_day().as_str(), "2025-01-01");

    let mut back = TaperDate::from_iso("2024-03-01").unwrap();
    back.increment_by_days(-1);
    assert_eq!(back.iso_day().as_str(), "2024-02-29");
}

#[test]
fn increment_is_chainable_and_zero_is_identity() {
    let mut date = TaperDate::from_iso("2024-01-01").unwrap();
    date.increment_by_days(1).increment_by_days(3);
    assert_eq!(date.iso_day().as_str(), "2024-01-05");

    let mut same = TaperDate::from_iso("2024-01-05").unwrap();
    same.increment_by_days(0);
    assert_eq!(date, same);
}

#[test]
fn unparseable_input_is_rejected() {
    assert!(TaperDate::from_iso("2024/01/01").is_err());
    assert!(TaperDate::from_iso("01-01-2024").is_err());
    assert!(TaperDate::from_iso("tomorrow").is_err());
}
