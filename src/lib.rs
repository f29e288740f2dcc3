//! ipocal-rs: IPO calendar client and pipeline.
//!
//! Scrapes IPO calendar entries from an IPOScoop-style listing site and runs
//! them through a pure normalize → merge → classify → assemble pipeline. The
//! assembled calendar is an immutable snapshot: each refresh cycle reads the
//! previously persisted calendar, folds in the new batch without losing
//! information the calendar already had, and writes a complete replacement.
//!
//! The pipeline stages ([`calendar`]) are synchronous, in-memory functions
//! over already-fetched data; network ([`scrape`]) and disk ([`store`]) live
//! at the edges so the core stays independently testable.

pub mod core;

pub mod calendar;
pub mod feed;
pub mod refresh;
pub mod scrape;
pub mod store;

pub use crate::core::client::{Backoff, CacheMode, RetryConfig};
pub use crate::core::{ExpectedDate, IpoClient, IpoError, IpoRecord, Status};

pub use calendar::{AssembleOptions, Period, RawRecord, StatusFilter};
pub use feed::CalendarEntry;
pub use refresh::{RefreshBuilder, RefreshOutcome, RefreshReport};
pub use scrape::CalendarScrapeBuilder;
pub use store::{CalendarStore, StoredCalendar};
