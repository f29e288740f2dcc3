//! Public client surface + builder.
//! Internals are split into `retry` (policy types) and `constants` (UA + defaults).

mod constants;
mod retry;

pub use retry::{Backoff, CacheMode, RetryConfig};

use crate::core::IpoError;
use constants::{CALENDAR_PAGE_PATH, DEFAULT_BASE_CALENDAR, USER_AGENT};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

#[derive(Debug)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheStore {
    map: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

/// Shared HTTP client for the listing site.
///
/// Cheap to clone; holds the `reqwest` client, endpoint configuration, the
/// retry policy, and an optional in-memory page cache.
#[derive(Debug, Clone)]
pub struct IpoClient {
    http: Client,
    base_calendar: Url,
    retry: RetryConfig,
    cache: Option<Arc<CacheStore>>,
}

impl Default for IpoClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl IpoClient {
    /// Create a new builder.
    pub fn builder() -> IpoClientBuilder {
        IpoClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// The fully joined calendar page URL.
    ///
    /// # Errors
    ///
    /// Returns `IpoError::Url` if the configured base cannot be joined with
    /// the calendar page path.
    pub fn calendar_url(&self) -> Result<Url, IpoError> {
        Ok(self.base_calendar.join(CALENDAR_PAGE_PATH)?)
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub(crate) async fn cache_get(&self, url: &Url) -> Option<String> {
        let store = self.cache.as_ref()?;
        let key = url.as_str().to_string();
        let guard = store.map.read().await;
        if let Some(entry) = guard.get(&key)
            && Instant::now() <= entry.expires_at
        {
            return Some(entry.body.clone());
        }
        None
    }

    pub(crate) async fn cache_put(&self, url: &Url, body: &str, ttl_override: Option<Duration>) {
        let store = match &self.cache {
            Some(s) => s.clone(),
            None => return,
        };
        let key = url.as_str().to_string();
        let ttl = ttl_override.unwrap_or(store.default_ttl);
        let entry = CacheEntry {
            body: body.to_string(),
            expires_at: Instant::now() + ttl,
        };
        let mut guard = store.map.write().await;
        guard.insert(key, entry);
    }

    /// Send a request, retrying per the client's policy (or `override_cfg`).
    pub(crate) async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
        override_cfg: Option<&RetryConfig>,
    ) -> Result<reqwest::Response, IpoError> {
        let cfg = override_cfg.unwrap_or(&self.retry);
        if !cfg.enabled {
            return Ok(req.send().await?);
        }

        let mut attempt: u32 = 0;
        loop {
            let this_try = req
                .try_clone()
                .ok_or_else(|| IpoError::Data("request not cloneable for retry".into()))?;

            let outcome = this_try.send().await;
            let retryable = match &outcome {
                Ok(resp) => cfg.retry_on_status.contains(&resp.status().as_u16()),
                Err(e) => {
                    (cfg.retry_on_timeout && e.is_timeout())
                        || (cfg.retry_on_connect && e.is_connect())
                }
            };

            if !retryable || attempt >= cfg.max_retries {
                return Ok(outcome?);
            }

            let delay = cfg.backoff.delay_for(attempt);
            tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying request");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct IpoClientBuilder {
    user_agent: Option<String>,
    base_calendar: Option<Url>,
    retry: Option<RetryConfig>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
}

impl IpoClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the listing site base (e.g., an httpmock server in tests).
    #[must_use]
    pub fn base_calendar(mut self, url: Url) -> Self {
        self.base_calendar = Some(url);
        self
    }

    /// Replace the default retry policy.
    #[must_use]
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Enable in-memory page caching with a default TTL.
    /// If not set, caching is disabled.
    #[must_use]
    pub fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns `IpoError` if a default URL fails to parse or the underlying
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<IpoClient, IpoError> {
        let base_calendar = match self.base_calendar {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_CALENDAR)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(IpoClient {
            http,
            base_calendar,
            retry: self.retry.unwrap_or_default(),
            cache: self.cache_ttl.map(|ttl| {
                Arc::new(CacheStore {
                    map: RwLock::new(HashMap::new()),
                    default_ttl: ttl,
                })
            }),
        })
    }
}
