//! Ordering and filtering of the merged set into the served calendar.

use chrono::{Datelike, Duration, NaiveDate};

use crate::core::{IpoError, IpoRecord, Status};

/// Date window filter, computed relative to the caller-supplied "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// No date filtering.
    #[default]
    All,
    /// Monday through Sunday of the current week.
    ThisWeek,
    /// Monday through Sunday of the following week.
    NextWeek,
    /// The current calendar month.
    ThisMonth,
}

impl Period {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Period::All => "all",
            Period::ThisWeek => "this-week",
            Period::NextWeek => "next-week",
            Period::ThisMonth => "this-month",
        }
    }

    /// Inclusive date window for this period, `None` for [`Period::All`].
    #[must_use]
    pub fn window(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        match self {
            Period::All => None,
            Period::ThisWeek => Some((monday, monday + Duration::days(6))),
            Period::NextWeek => {
                let next = monday + Duration::days(7);
                Some((next, next + Duration::days(6)))
            }
            Period::ThisMonth => {
                let first = today.with_day(1)?;
                let next_month = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
                };
                Some((first, next_month - Duration::days(1)))
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = IpoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Period::All),
            "this-week" => Ok(Period::ThisWeek),
            "next-week" => Ok(Period::NextWeek),
            "this-month" => Ok(Period::ThisMonth),
            other => Err(IpoError::Data(format!("unknown period filter: {other}"))),
        }
    }
}

/// Status filter: everything, or a single lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No status filtering.
    #[default]
    All,
    /// Only records in the given status.
    Only(Status),
}

impl StatusFilter {
    fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == wanted,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = IpoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "filed" => Ok(StatusFilter::Only(Status::Filed)),
            "expected" => Ok(StatusFilter::Only(Status::Expected)),
            "priced" => Ok(StatusFilter::Only(Status::Priced)),
            "trading" => Ok(StatusFilter::Only(Status::Trading)),
            "withdrawn" => Ok(StatusFilter::Only(Status::Withdrawn)),
            other => Err(IpoError::Data(format!("unknown status filter: {other}"))),
        }
    }
}

/// Filters applied when assembling the served calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssembleOptions {
    /// Date window, relative to the caller's "today".
    pub period: Period,
    /// Status narrowing.
    pub status: StatusFilter,
}

/// Filter and order the merged, classified set for serving.
///
/// Sorting is chronological on the resolved expected date with unresolvable
/// dates last, tie-broken by ticker for determinism. Date windows only admit
/// records whose date actually resolves inside the window. Input records are
/// never mutated; an empty result is not an error.
#[must_use]
pub fn assemble(
    records: &[IpoRecord],
    options: &AssembleOptions,
    today: NaiveDate,
) -> Vec<IpoRecord> {
    let window = options.period.window(today);
    let mut out: Vec<IpoRecord> = records
        .iter()
        .filter(|r| options.status.matches(r.status))
        .filter(|r| match window {
            None => true,
            Some((start, end)) => r
                .expected_date
                .resolve(today)
                .is_some_and(|d| d >= start && d <= end),
        })
        .cloned()
        .collect();
    out.sort_by(|a, b| a.sort_key(today).cmp(&b.sort_key(today)));
    out
}
