//! Raw-record validation: the boundary where loosely-typed scraped input
//! becomes the strict [`IpoRecord`] shape everything downstream relies on.

use crate::calendar::status;
use crate::calendar::wire::RawRecord;
use crate::core::{DEFAULT_LOCKUP, ExpectedDate, IpoError, IpoRecord};

/// Ticker cells the source uses when no symbol has been assigned yet.
const TICKER_PLACEHOLDERS: &[&str] = &["--", "-", "TBD"];

fn format_price(v: f64) -> String {
    if v.fract().abs() < f64::EPSILON {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

fn clean_opt(text: Option<&str>) -> Option<String> {
    let t = text?.trim();
    if t.is_empty() || t == "-" || t == "--" {
        return None;
    }
    Some(t.to_string())
}

/// Split a slash-delimited manager list, trimming each entry and dropping
/// empty segments while preserving order.
#[must_use]
pub fn parse_lead_managers(text: &str) -> Vec<String> {
    text.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate one raw row into a fully-typed [`IpoRecord`].
///
/// Pure: no I/O, no clock. Optional fields map to their documented defaults;
/// string fields are trimmed and the ticker uppercased.
///
/// # Errors
///
/// Returns [`IpoError::MalformedRecord`] when `ticker` or `company` is
/// missing, empty after trimming, or a source placeholder. Callers running a
/// batch should skip and log such rows rather than aborting.
pub fn normalize(raw: &RawRecord) -> Result<IpoRecord, IpoError> {
    let ticker = raw
        .ticker
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty() && !TICKER_PLACEHOLDERS.contains(t))
        .map(str::to_uppercase)
        .ok_or_else(|| IpoError::MalformedRecord("missing or placeholder ticker".into()))?;

    let company = raw
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .ok_or_else(|| IpoError::MalformedRecord(format!("{ticker}: missing company name")))?;

    let date_text = raw.expected_date.as_deref().unwrap_or("");
    let expected_date = ExpectedDate::parse(date_text);
    let classified = status::classify_with_date(raw.status.as_deref().unwrap_or(""), date_text);

    // Prefer explicit low/high cells; fall back to preformatted text.
    let price_range = match (
        raw.price_low.as_ref().and_then(super::wire::LooseNum::as_f64),
        raw.price_high.as_ref().and_then(super::wire::LooseNum::as_f64),
    ) {
        (Some(low), Some(high)) if low > 0.0 && (low - high).abs() < f64::EPSILON => {
            Some(format!("${}", format_price(low)))
        }
        (Some(low), Some(high)) if low > 0.0 && high > 0.0 => {
            Some(format!("${}-${}", format_price(low), format_price(high)))
        }
        _ => clean_opt(raw.price_range.as_deref()).filter(|p| !p.eq_ignore_ascii_case("tbd")),
    };

    let exchange = clean_opt(raw.exchange.as_deref())
        .filter(|e| !e.eq_ignore_ascii_case("tbd"))
        .or_else(|| {
            // The source rarely reports the venue; short symbols list on
            // NASDAQ, longer ones on NYSE.
            Some(if ticker.len() <= 4 { "NASDAQ" } else { "NYSE" }.to_string())
        });

    Ok(IpoRecord {
        ticker,
        company,
        expected_date,
        price_range,
        shares_millions: raw.shares.as_ref().and_then(super::wire::LooseNum::as_f64),
        volume: raw.volume.as_ref().and_then(super::wire::LooseNum::as_f64),
        status: classified,
        documents: raw.documents.map_or(0, |d| u32::try_from(d).unwrap_or(0)),
        lockup: clean_opt(raw.lockup.as_deref()).unwrap_or_else(|| DEFAULT_LOCKUP.to_string()),
        lead_managers: raw
            .lead_managers
            .as_deref()
            .map(parse_lead_managers)
            .unwrap_or_default(),
        scoop_rating: clean_opt(raw.scoop_rating.as_deref()),
        exchange,
    })
}
