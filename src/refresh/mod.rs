//! One refresh cycle: scrape → normalize → merge → assemble → persist.
//!
//! The pure step ([`run`]) takes the previous calendar and a raw batch and
//! returns the new calendar; [`RefreshBuilder`] wires it to the external
//! collaborators (network fetch, file store). A failed fetch leaves the
//! stored calendar untouched, so readers keep seeing the last good snapshot.

use chrono::{NaiveDate, Utc};

use crate::{
    IpoClient, IpoError,
    calendar::{AssembleOptions, RawRecord, assemble, merge::merge_calendars_counted, normalize},
    core::{IpoRecord, client::{CacheMode, RetryConfig}},
    scrape::CalendarScrapeBuilder,
    store::CalendarStore,
};

/// Result of the pure pipeline step.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    /// The merged, classified, ordered calendar.
    pub calendar: Vec<IpoRecord>,
    /// Raw rows dropped for missing identity fields.
    pub skipped: u32,
    /// Per-ticker merges that failed and kept the previous record.
    pub conflicts: u32,
}

/// Run the pure pipeline over an already-fetched batch.
///
/// Malformed rows are skipped and logged, never fatal; merge conflicts keep
/// the previously persisted record. The result is assembled unfiltered and
/// in calendar order, ready to persist or to slice further with
/// [`crate::calendar::assemble`].
#[must_use]
pub fn run(previous: &[IpoRecord], batch: &[RawRecord], today: NaiveDate) -> RefreshOutcome {
    let mut normalized = Vec::with_capacity(batch.len());
    let mut skipped = 0u32;
    for raw in batch {
        match normalize(raw) {
            Ok(record) => normalized.push(record),
            Err(e) => {
                skipped += 1;
                tracing::warn!(error = %e, "skipping malformed record");
            }
        }
    }

    let (merged, conflicts) = merge_calendars_counted(previous, &normalized);
    let calendar = assemble(&merged, &AssembleOptions::default(), today);

    RefreshOutcome {
        calendar,
        skipped,
        conflicts,
    }
}

/// Result of a full orchestrated refresh.
#[derive(Debug, Clone)]
pub struct RefreshReport {
    /// The calendar that was persisted.
    pub calendar: Vec<IpoRecord>,
    /// Raw rows fetched from the source.
    pub fetched: u32,
    /// Raw rows dropped for missing identity fields.
    pub skipped: u32,
    /// Per-ticker merges that failed and kept the previous record.
    pub conflicts: u32,
}

/// A builder for one scrape-merge-persist cycle.
pub struct RefreshBuilder {
    client: IpoClient,
    store: CalendarStore,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
    today: Option<NaiveDate>,
}

impl RefreshBuilder {
    /// Creates a new `RefreshBuilder` over a client and a calendar store.
    pub fn new(client: &IpoClient, store: CalendarStore) -> Self {
        Self {
            client: client.clone(),
            store,
            cache_mode: CacheMode::Refresh,
            retry_override: None,
            today: None,
        }
    }

    /// Sets the cache mode for the underlying fetch. Defaults to
    /// [`CacheMode::Refresh`]: a refresh cycle should hit the network.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for the underlying fetch.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Pins "today" for date resolution instead of reading the clock.
    #[must_use]
    pub const fn today(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    /// Fetch, merge against the stored calendar, and persist the result.
    ///
    /// # Errors
    ///
    /// Any fetch, load, or save error is returned without the store having
    /// been modified, so the previously persisted calendar stays served.
    pub async fn refresh(self) -> Result<RefreshReport, IpoError> {
        let batch = CalendarScrapeBuilder::new(&self.client)
            .cache_mode(self.cache_mode)
            .retry_policy(self.retry_override.clone())
            .fetch()
            .await?;

        let previous = self.store.load()?;
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        let outcome = run(&previous.ipos, &batch, today);

        self.store.save(&outcome.calendar)?;
        tracing::debug!(
            fetched = batch.len(),
            kept = outcome.calendar.len(),
            skipped = outcome.skipped,
            conflicts = outcome.conflicts,
            "refresh cycle complete"
        );

        Ok(RefreshReport {
            fetched: batch.len() as u32,
            skipped: outcome.skipped,
            conflicts: outcome.conflicts,
            calendar: outcome.calendar,
        })
    }
}

/* ----- Calendar queries used by the serving layer ----- */

/// Case-insensitive substring search over ticker and company name.
#[must_use]
pub fn search_records(records: &[IpoRecord], query: &str) -> Vec<IpoRecord> {
    let q = query.trim().to_ascii_lowercase();
    if q.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| {
            r.ticker.to_ascii_lowercase().contains(&q)
                || r.company.to_ascii_lowercase().contains(&q)
        })
        .cloned()
        .collect()
}

/// An offering whose lock-up window ends inside the requested horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockupExpiration {
    /// Ticker symbol.
    pub ticker: String,
    /// Company name.
    pub company: String,
    /// The day the lock-up ends.
    pub expires: NaiveDate,
    /// Days from "today" until expiry.
    pub days_until: i64,
}

fn lockup_days(lockup: &str) -> Option<i64> {
    let digits: String = lockup.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok().filter(|d| *d > 0)
}

/// Offerings whose lock-up expires within `days_ahead` days.
///
/// The window is anchored on the record's resolved expected date plus its
/// parsed "N days" lock-up term; records without a resolvable date or a
/// parseable term are skipped. Sorted by expiry, then ticker.
#[must_use]
pub fn lockup_expirations(
    records: &[IpoRecord],
    today: NaiveDate,
    days_ahead: i64,
) -> Vec<LockupExpiration> {
    let horizon = today + chrono::Duration::days(days_ahead);
    let mut out: Vec<LockupExpiration> = records
        .iter()
        .filter_map(|r| {
            let anchor = r.expected_date.resolve(today)?;
            let expires = anchor + chrono::Duration::days(lockup_days(&r.lockup)?);
            (expires >= today && expires <= horizon).then(|| LockupExpiration {
                ticker: r.ticker.clone(),
                company: r.company.clone(),
                expires,
                days_until: (expires - today).num_days(),
            })
        })
        .collect();
    out.sort_by(|a, b| (a.expires, &a.ticker).cmp(&(b.expires, &b.ticker)));
    out
}
