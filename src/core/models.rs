use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The lock-up string applied when the source reports nothing.
///
/// The listing site omits the lock-up column for most offerings and the
/// standard term is 180 days; downstream consumers rely on this default.
pub const DEFAULT_LOCKUP: &str = "180 days";

/* ----- STATUS (shared by calendar/, feed/, refresh/) ----- */

/// Lifecycle stage of an offering, derived from heterogeneous source text.
///
/// Classification is total: any input maps to exactly one variant, with
/// [`Status::Expected`] as the fallback.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// A registration statement is on file but no date has been set.
    Filed,
    /// The offering has an expected window but has not priced yet.
    #[default]
    Expected,
    /// The offering has priced.
    Priced,
    /// Shares are trading on the listed exchange.
    Trading,
    /// The offering was withdrawn.
    Withdrawn,
}

impl Status {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Status::Filed => "Filed",
            Status::Expected => "Expected",
            Status::Priced => "Priced",
            Status::Trading => "Trading",
            Status::Withdrawn => "Withdrawn",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/* ----- EXPECTED DATE ----- */

/// The expected trade date as reported by the source.
///
/// The source mixes exact dates, relative labels, "Week of" windows, and
/// bare weekday names, and the original display text matters to consumers.
/// Modeling the variants explicitly (instead of collapsing to one date type)
/// keeps the display semantics; [`ExpectedDate::resolve`] produces an
/// approximate date for ordering and window filtering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedDate {
    /// An exact calendar date.
    Day(NaiveDate),
    /// The source said "Today".
    Today,
    /// The source said "Tomorrow".
    Tomorrow,
    /// The source said "In N days".
    InDays(u32),
    /// A "Week of <date>" window.
    WeekOf(NaiveDate),
    /// A bare weekday name; resolves to the next such weekday.
    Weekday(Weekday),
    /// No usable date ("TBD", "--", empty, or free text).
    #[default]
    Unknown,
}

const DAY_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%B %d, %Y"];

fn parse_day(s: &str) -> Option<NaiveDate> {
    DAY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn weekday_label(w: Weekday) -> &'static str {
    match w {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

impl ExpectedDate {
    /// Parse the source's date cell text. Total: unrecognized input becomes
    /// [`ExpectedDate::Unknown`], never an error.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let t = text.trim();
        if t.is_empty() || t == "--" {
            return ExpectedDate::Unknown;
        }
        let lower = t.to_ascii_lowercase();
        match lower.as_str() {
            "tbd" => return ExpectedDate::Unknown,
            "today" => return ExpectedDate::Today,
            "tomorrow" => return ExpectedDate::Tomorrow,
            _ => {}
        }
        if let Some(rest) = lower.strip_prefix("week of ") {
            return parse_day(rest.trim())
                .or_else(|| parse_day(t["week of ".len()..].trim()))
                .map_or(ExpectedDate::Unknown, ExpectedDate::WeekOf);
        }
        if let Some(mid) = lower
            .strip_prefix("in ")
            .and_then(|r| r.strip_suffix(" days").or_else(|| r.strip_suffix(" day")))
            && let Ok(n) = mid.trim().parse::<u32>()
        {
            return ExpectedDate::InDays(n);
        }
        if let Ok(w) = lower.parse::<Weekday>() {
            return ExpectedDate::Weekday(w);
        }
        parse_day(t).map_or(ExpectedDate::Unknown, ExpectedDate::Day)
    }

    /// Resolve to an approximate date for sorting and period filtering.
    ///
    /// `None` means the record carries no usable date and sorts last.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            ExpectedDate::Day(d) | ExpectedDate::WeekOf(d) => Some(d),
            ExpectedDate::Today => Some(today),
            ExpectedDate::Tomorrow => Some(today + Duration::days(1)),
            ExpectedDate::InDays(n) => Some(today + Duration::days(i64::from(n))),
            ExpectedDate::Weekday(w) => {
                let ahead = (i64::from(w.num_days_from_monday())
                    - i64::from(today.weekday().num_days_from_monday()))
                .rem_euclid(7);
                Some(today + Duration::days(ahead))
            }
            ExpectedDate::Unknown => None,
        }
    }

    /// Whether any usable date was parsed.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, ExpectedDate::Unknown)
    }
}

impl std::fmt::Display for ExpectedDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpectedDate::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            ExpectedDate::Today => f.write_str("Today"),
            ExpectedDate::Tomorrow => f.write_str("Tomorrow"),
            ExpectedDate::InDays(n) => write!(f, "In {n} days"),
            ExpectedDate::WeekOf(d) => write!(f, "Week of {}", d.format("%Y-%m-%d")),
            ExpectedDate::Weekday(w) => f.write_str(weekday_label(*w)),
            ExpectedDate::Unknown => f.write_str("TBD"),
        }
    }
}

// The feed renders `expected_date` as either an ISO date or one of the
// relative labels, so the serde form is the display string in both directions.
impl Serialize for ExpectedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExpectedDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ExpectedDate::parse(&s))
    }
}

/* ----- THE CANONICAL RECORD ----- */

fn default_lockup() -> String {
    DEFAULT_LOCKUP.to_string()
}

/// Canonical representation of one IPO offering.
///
/// Produced fresh by the normalizer on each fetch cycle and never mutated
/// after assembly; the merge step decides per ticker which version survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpoRecord {
    /// Identity key: uppercase, non-empty.
    pub ticker: String,
    /// Company name as reported.
    pub company: String,
    /// Expected trade date (possibly a label rather than a date).
    #[serde(default)]
    pub expected_date: ExpectedDate,
    /// Offer price range, e.g. `"$10.00-$12.00"`. `None` when TBD.
    #[serde(default)]
    pub price_range: Option<String>,
    /// Shares offered, in millions.
    #[serde(default)]
    pub shares_millions: Option<f64>,
    /// Deal volume in dollars.
    #[serde(default)]
    pub volume: Option<f64>,
    /// Lifecycle status; always classified, default `Expected`.
    #[serde(default)]
    pub status: Status,
    /// Count of associated filings.
    #[serde(default)]
    pub documents: u32,
    /// Lock-up term, `"180 days"` when the source is silent.
    #[serde(default = "default_lockup")]
    pub lockup: String,
    /// Lead managers in source order.
    #[serde(default)]
    pub lead_managers: Vec<String>,
    /// IPOScoop's rating column, when present.
    #[serde(default)]
    pub scoop_rating: Option<String>,
    /// Listing exchange; inferred from ticker length when unreported.
    #[serde(default)]
    pub exchange: Option<String>,
}

impl IpoRecord {
    /// Sort key used by the assembler: resolved date first (unresolved last),
    /// then ticker for determinism.
    #[must_use]
    pub fn sort_key(&self, today: NaiveDate) -> (bool, Option<NaiveDate>, &str) {
        let resolved = self.expected_date.resolve(today);
        // Leading bool pushes unresolved dates after every real one.
        (resolved.is_none(), resolved, self.ticker.as_str())
    }
}
