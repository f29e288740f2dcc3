//! Serving-layer shapes: what the HTTP collaborator hands to the browser.
//!
//! [`IpoRecord`] serializes cleanly on its own; this module adds the display
//! conventions the frontend table expects (placeholder dashes, `"TBD"`,
//! `"10.0M"` share counts) and the sector-tree endpoint payload.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::{IpoRecord, Status};

fn group_thousands(v: f64) -> String {
    let digits = format!("{:.0}", v.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0.0 {
        out.push('-');
    }
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One row of the served calendar feed, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEntry {
    /// ISO date or relative label.
    pub expected_date: String,
    /// Ticker symbol.
    pub ticker: String,
    /// Company name.
    pub company: String,
    /// Price range text, `"TBD"` when unknown.
    pub price_range: String,
    /// Share count like `"10.0M"`, `"-"` when unknown.
    pub shares: String,
    /// Deal volume with thousands separators, `"-"` when unknown.
    pub volume: String,
    /// Lifecycle status (drives the UI badge color).
    pub status: Status,
    /// Filing count.
    pub documents: u32,
    /// Lock-up term.
    pub lockup: String,
    /// Slash-joined manager list, `"-"` when empty.
    pub lead_managers: String,
    /// Rating text, `"-"` when absent.
    pub scoop_rating: String,
    /// Listing exchange, `"TBD"` when unknown.
    pub exchange: String,
}

impl CalendarEntry {
    /// Format one canonical record with the frontend's placeholder
    /// conventions.
    #[must_use]
    pub fn from_record(record: &IpoRecord) -> Self {
        Self {
            expected_date: record.expected_date.to_string(),
            ticker: record.ticker.clone(),
            company: record.company.clone(),
            price_range: record.price_range.clone().unwrap_or_else(|| "TBD".into()),
            shares: record
                .shares_millions
                .map_or_else(|| "-".into(), |s| format!("{s:.1}M")),
            volume: record.volume.map_or_else(|| "-".into(), group_thousands),
            status: record.status,
            documents: record.documents,
            lockup: record.lockup.clone(),
            lead_managers: if record.lead_managers.is_empty() {
                "-".into()
            } else {
                record.lead_managers.join(" / ")
            },
            scoop_rating: record.scoop_rating.clone().unwrap_or_else(|| "-".into()),
            exchange: record.exchange.clone().unwrap_or_else(|| "TBD".into()),
        }
    }
}

/// Format a whole assembled calendar, preserving its order.
#[must_use]
pub fn calendar_entries(records: &[IpoRecord]) -> Vec<CalendarEntry> {
    records.iter().map(CalendarEntry::from_record).collect()
}

/// One company in the tree endpoint payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    /// Ticker symbol.
    pub ticker: String,
    /// Company name.
    pub company: String,
    /// Filing count shown next to the company.
    pub filing_count: u32,
}

/// Group the calendar for the companies-tree endpoint.
///
/// Canonical records carry no sector, so grouping is by exchange label with
/// `"Other"` for records that somehow lack one. Groups and members are both
/// ordered for stable output.
#[must_use]
pub fn companies_tree(records: &[IpoRecord]) -> BTreeMap<String, Vec<TreeEntry>> {
    let mut tree: BTreeMap<String, Vec<TreeEntry>> = BTreeMap::new();
    for record in records {
        let group = record.exchange.clone().unwrap_or_else(|| "Other".into());
        tree.entry(group).or_default().push(TreeEntry {
            ticker: record.ticker.clone(),
            company: record.company.clone(),
            filing_count: record.documents,
        });
    }
    for members in tree.values_mut() {
        members.sort_by(|a, b| a.ticker.cmp(&b.ticker));
    }
    tree
}
