#![allow(dead_code)]

use httpmock::{Method::GET, Mock, MockServer};
use std::{fs, path::Path};

use ipocal_rs::{ExpectedDate, IpoClient, IpoRecord, Status};

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn mock_calendar_page(server: &'_ MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/ipo-calendar/");
        then.status(200)
            .header("content-type", "text/html")
            .body(fixture("ipo_calendar_page.html"));
    })
}

pub fn client_for(server: &MockServer) -> IpoClient {
    IpoClient::builder()
        .base_calendar(url::Url::parse(&server.base_url()).unwrap())
        .build()
        .unwrap()
}

/// A minimal canonical record: every optional field at its documented
/// default, so tests only state what they care about.
pub fn record(ticker: &str) -> IpoRecord {
    IpoRecord {
        ticker: ticker.to_string(),
        company: format!("{ticker} Inc."),
        expected_date: ExpectedDate::Unknown,
        price_range: None,
        shares_millions: None,
        volume: None,
        status: Status::Expected,
        documents: 0,
        lockup: "180 days".to_string(),
        lead_managers: Vec::new(),
        scoop_rating: None,
        exchange: Some("NASDAQ".to_string()),
    }
}
