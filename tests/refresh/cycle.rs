use httpmock::Method::GET;
use ipocal_rs::{CalendarStore, RefreshBuilder, RetryConfig, Status};

use crate::common::{client_for, mock_calendar_page, setup_server};

fn d(y: i32, m: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

const SPARSE_AIRO_PAGE: &str = r#"<html><body>
<table>
<tr><th>Company</th><th>Symbol</th><th>Lead Managers</th><th>Shares (Millions)</th><th>Price Low</th><th>Price High</th><th>Est. $ Volume</th><th>Expected to Trade</th><th>SCOOP Rating</th></tr>
<tr><td>Airo Group Holdings</td><td>AIRO</td><td></td><td></td><td></td><td></td><td></td><td>Priced</td><td></td></tr>
</table>
</body></html>"#;

#[tokio::test]
async fn refresh_persists_the_assembled_calendar() {
    let server = setup_server();
    let _mock = mock_calendar_page(&server);
    let dir = tempfile::tempdir().unwrap();
    let store = CalendarStore::new(dir.path().join("ipo_calendar.json"));

    let report = RefreshBuilder::new(&client_for(&server), store.clone())
        .today(d(2025, 6, 11))
        .refresh()
        .await
        .unwrap();

    assert_eq!(report.fetched, 4);
    // The placeholder-ticker row is dropped at normalization.
    assert_eq!(report.skipped, 1);
    assert_eq!(report.conflicts, 0);
    assert_eq!(report.calendar.len(), 3);

    let stored = store.load().unwrap();
    assert_eq!(stored.ipos, report.calendar);
    assert!(stored.last_updated.is_some());

    // Spot-check classification and ordering: AIRO (6/13) before VOYG
    // (week of 6/16), with the dateless priced CHYM row last.
    let tickers: Vec<_> = stored.ipos.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["AIRO", "VOYG", "CHYM"]);
    let chym = stored.ipos.iter().find(|r| r.ticker == "CHYM").unwrap();
    assert_eq!(chym.status, Status::Priced);
}

#[tokio::test]
async fn second_cycle_fills_gaps_without_losing_information() {
    // Cycle one: the full calendar page.
    let server = setup_server();
    let _mock = mock_calendar_page(&server);
    let dir = tempfile::tempdir().unwrap();
    let store = CalendarStore::new(dir.path().join("ipo_calendar.json"));

    RefreshBuilder::new(&client_for(&server), store.clone())
        .today(d(2025, 6, 11))
        .refresh()
        .await
        .unwrap();

    // Cycle two: the source has dropped every detail except that AIRO priced.
    let server2 = setup_server();
    server2.mock(|when, then| {
        when.method(GET).path("/ipo-calendar/");
        then.status(200)
            .header("content-type", "text/html")
            .body(SPARSE_AIRO_PAGE);
    });

    let report = RefreshBuilder::new(&client_for(&server2), store.clone())
        .today(d(2025, 6, 14))
        .refresh()
        .await
        .unwrap();

    let airo = report.calendar.iter().find(|r| r.ticker == "AIRO").unwrap();
    // Status advanced, but the details from cycle one are not regressed.
    assert_eq!(airo.status, Status::Priced);
    assert_eq!(airo.price_range.as_deref(), Some("$14-$16"));
    assert_eq!(airo.lead_managers, vec!["Cantor Fitzgerald", "BTIG"]);
    assert_eq!(airo.expected_date.to_string(), "2025-06-13");

    // Tickers the source stopped reporting are retained.
    assert!(report.calendar.iter().any(|r| r.ticker == "CHYM"));
    assert!(report.calendar.iter().any(|r| r.ticker == "VOYG"));
}

#[tokio::test]
async fn failed_fetch_leaves_the_stored_calendar_in_place() {
    let server = setup_server();
    let _mock = mock_calendar_page(&server);
    let dir = tempfile::tempdir().unwrap();
    let store = CalendarStore::new(dir.path().join("ipo_calendar.json"));

    RefreshBuilder::new(&client_for(&server), store.clone())
        .today(d(2025, 6, 11))
        .refresh()
        .await
        .unwrap();
    let before = store.load().unwrap();

    let flaky = setup_server();
    flaky.mock(|when, then| {
        when.method(GET).path("/ipo-calendar/");
        then.status(503);
    });

    let err = RefreshBuilder::new(&client_for(&flaky), store.clone())
        .retry_policy(Some(RetryConfig {
            enabled: false,
            ..RetryConfig::default()
        }))
        .refresh()
        .await
        .unwrap_err();
    assert!(matches!(err, ipocal_rs::IpoError::Status { status: 503, .. }));

    // Stale-but-available: readers keep seeing the last good snapshot.
    let after = store.load().unwrap();
    assert_eq!(after.ipos, before.ipos);
}
