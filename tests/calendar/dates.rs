use chrono::{NaiveDate, Weekday};
use ipocal_rs::ExpectedDate;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn parses_exact_dates_in_source_formats() {
    assert_eq!(
        ExpectedDate::parse("2025-06-16"),
        ExpectedDate::Day(d(2025, 6, 16))
    );
    assert_eq!(
        ExpectedDate::parse("6/16/2025"),
        ExpectedDate::Day(d(2025, 6, 16))
    );
    assert_eq!(
        ExpectedDate::parse("June 16, 2025"),
        ExpectedDate::Day(d(2025, 6, 16))
    );
}

#[test]
fn parses_relative_and_week_labels() {
    assert_eq!(ExpectedDate::parse(" Today "), ExpectedDate::Today);
    assert_eq!(ExpectedDate::parse("tomorrow"), ExpectedDate::Tomorrow);
    assert_eq!(ExpectedDate::parse("In 3 days"), ExpectedDate::InDays(3));
    assert_eq!(ExpectedDate::parse("in 1 day"), ExpectedDate::InDays(1));
    assert_eq!(
        ExpectedDate::parse("Week of 6/16/2025"),
        ExpectedDate::WeekOf(d(2025, 6, 16))
    );
    assert_eq!(
        ExpectedDate::parse("Monday"),
        ExpectedDate::Weekday(Weekday::Mon)
    );
}

#[test]
fn unrecognized_text_is_unknown() {
    for s in ["", "TBD", "--", "Priced", "sometime soon", "Week of soon"] {
        assert_eq!(ExpectedDate::parse(s), ExpectedDate::Unknown, "input {s:?}");
    }
}

#[test]
fn resolve_orders_labels_around_today() {
    let today = d(2025, 6, 11); // a Wednesday
    assert_eq!(ExpectedDate::Today.resolve(today), Some(today));
    assert_eq!(ExpectedDate::Tomorrow.resolve(today), Some(d(2025, 6, 12)));
    assert_eq!(ExpectedDate::InDays(5).resolve(today), Some(d(2025, 6, 16)));
    // Friday of the same week.
    assert_eq!(
        ExpectedDate::Weekday(Weekday::Fri).resolve(today),
        Some(d(2025, 6, 13))
    );
    // A weekday earlier in the week wraps to next week.
    assert_eq!(
        ExpectedDate::Weekday(Weekday::Mon).resolve(today),
        Some(d(2025, 6, 16))
    );
    assert_eq!(ExpectedDate::Unknown.resolve(today), None);
}

#[test]
fn display_round_trips_through_parse() {
    let cases = [
        ExpectedDate::Day(d(2025, 6, 16)),
        ExpectedDate::Today,
        ExpectedDate::Tomorrow,
        ExpectedDate::InDays(4),
        ExpectedDate::WeekOf(d(2025, 6, 16)),
        ExpectedDate::Weekday(Weekday::Thu),
        ExpectedDate::Unknown,
    ];
    for date in cases {
        assert_eq!(ExpectedDate::parse(&date.to_string()), date);
    }
}

#[test]
fn serde_form_is_the_display_string() {
    let day = ExpectedDate::Day(d(2025, 6, 16));
    assert_eq!(serde_json::to_string(&day).unwrap(), "\"2025-06-16\"");
    assert_eq!(
        serde_json::from_str::<ExpectedDate>("\"Week of 2025-06-16\"").unwrap(),
        ExpectedDate::WeekOf(d(2025, 6, 16))
    );
    assert_eq!(
        serde_json::from_str::<ExpectedDate>("\"TBD\"").unwrap(),
        ExpectedDate::Unknown
    );
}
