//! Fetching the listing site's calendar page and extracting raw rows.

mod api;
mod extract;

use crate::{
    IpoClient, IpoError,
    calendar::RawRecord,
    core::client::{CacheMode, RetryConfig},
};

/// A builder for fetching the raw IPO calendar from the listing site.
pub struct CalendarScrapeBuilder {
    client: IpoClient,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl CalendarScrapeBuilder {
    /// Creates a new `CalendarScrapeBuilder`.
    pub fn new(client: &IpoClient) -> Self {
        Self {
            client: client.clone(),
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Sets the cache mode for this specific fetch.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for this specific fetch.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Executes the request and extracts the calendar table rows.
    ///
    /// The rows come back raw; run them through
    /// [`crate::calendar::normalize`] (or the [`crate::refresh`] pipeline)
    /// to obtain canonical records.
    ///
    /// # Errors
    ///
    /// Returns an `IpoError` if the request fails, the server answers with a
    /// non-success status, or no calendar table can be found on the page.
    pub async fn fetch(self) -> Result<Vec<RawRecord>, IpoError> {
        api::fetch_calendar(&self.client, self.cache_mode, self.retry_override.as_ref()).await
    }
}
