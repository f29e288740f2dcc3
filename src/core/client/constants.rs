//! Centralized constants for default endpoints and UA.

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// IPOScoop site base; the calendar page path is joined onto this.
pub(crate) const DEFAULT_BASE_CALENDAR: &str = "https://www.iposcoop.com/";

/// Path of the calendar page under the site base.
pub(crate) const CALENDAR_PAGE_PATH: &str = "ipo-calendar/";
