use chrono::NaiveDate;
use ipocal_rs::calendar::assemble;
use ipocal_rs::{AssembleOptions, ExpectedDate, Period, Status, StatusFilter};

use crate::common::record;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn on(ticker: &str, date: ExpectedDate) -> ipocal_rs::IpoRecord {
    let mut r = record(ticker);
    r.expected_date = date;
    r
}

#[test]
fn sorts_chronologically_with_unknown_last_and_ticker_tiebreak() {
    let today = d(2025, 6, 11); // Wednesday
    let records = vec![
        on("ZZZZ", ExpectedDate::Unknown),
        on("LATE", ExpectedDate::Day(d(2025, 6, 20))),
        on("BBBB", ExpectedDate::Day(d(2025, 6, 13))),
        on("AAAA", ExpectedDate::Day(d(2025, 6, 13))),
        on("SOON", ExpectedDate::Today),
    ];

    let out = assemble(&records, &AssembleOptions::default(), today);
    let tickers: Vec<_> = out.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["SOON", "AAAA", "BBBB", "LATE", "ZZZZ"]);
}

#[test]
fn week_windows_are_monday_through_sunday() {
    let today = d(2025, 6, 11); // Wednesday; week is 6/9..=6/15
    let records = vec![
        on("THIS", ExpectedDate::Day(d(2025, 6, 9))),
        on("EDGE", ExpectedDate::Day(d(2025, 6, 15))),
        on("NEXT", ExpectedDate::Day(d(2025, 6, 16))),
        on("FARR", ExpectedDate::Day(d(2025, 7, 1))),
        on("NODT", ExpectedDate::Unknown),
    ];

    let this_week = assemble(
        &records,
        &AssembleOptions {
            period: Period::ThisWeek,
            ..AssembleOptions::default()
        },
        today,
    );
    let tickers: Vec<_> = this_week.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["THIS", "EDGE"]);

    let next_week = assemble(
        &records,
        &AssembleOptions {
            period: Period::NextWeek,
            ..AssembleOptions::default()
        },
        today,
    );
    let tickers: Vec<_> = next_week.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["NEXT"]);
}

#[test]
fn month_window_spans_the_calendar_month() {
    let today = d(2025, 12, 10);
    let records = vec![
        on("DEC1", ExpectedDate::Day(d(2025, 12, 1))),
        on("DEC3", ExpectedDate::Day(d(2025, 12, 31))),
        on("JAN1", ExpectedDate::Day(d(2026, 1, 1))),
    ];
    let out = assemble(
        &records,
        &AssembleOptions {
            period: Period::ThisMonth,
            ..AssembleOptions::default()
        },
        today,
    );
    let tickers: Vec<_> = out.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["DEC1", "DEC3"]);
}

#[test]
fn status_filter_keeps_only_the_requested_stage() {
    let today = d(2025, 6, 11);
    let mut priced = record("PRCD");
    priced.status = Status::Priced;
    let mut filed = record("FILD");
    filed.status = Status::Filed;

    let out = assemble(
        &[priced, filed],
        &AssembleOptions {
            status: StatusFilter::Only(Status::Priced),
            ..AssembleOptions::default()
        },
        today,
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].ticker, "PRCD");
}

#[test]
fn unmatched_filters_yield_empty_not_error() {
    let today = d(2025, 6, 11);
    let out = assemble(
        &[record("ONLY")],
        &AssembleOptions {
            status: StatusFilter::Only(Status::Withdrawn),
            ..AssembleOptions::default()
        },
        today,
    );
    assert!(out.is_empty());
}

#[test]
fn query_string_forms_parse() {
    assert_eq!("this-week".parse::<Period>().unwrap(), Period::ThisWeek);
    assert_eq!("all".parse::<Period>().unwrap(), Period::All);
    assert!("fortnight".parse::<Period>().is_err());

    assert_eq!(
        "priced".parse::<StatusFilter>().unwrap(),
        StatusFilter::Only(Status::Priced)
    );
    assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
    assert!("imminent".parse::<StatusFilter>().is_err());
}
