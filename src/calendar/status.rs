//! Status classification from heterogeneous source text.

use crate::core::Status;

/// Map a raw status string onto the closed [`Status`] set.
///
/// Case-insensitive substring match against the source's vocabulary, the way
/// the listing site actually annotates rows ("Priced 6/12", "now trading").
/// Total: unrecognized or empty text classifies as [`Status::Expected`].
#[must_use]
pub fn classify(text: &str) -> Status {
    let lower = text.trim().to_ascii_lowercase();
    if lower.contains("priced") {
        Status::Priced
    } else if lower.contains("trading") {
        Status::Trading
    } else if lower.contains("withdrawn") {
        Status::Withdrawn
    } else if lower.contains("filed") {
        Status::Filed
    } else {
        Status::Expected
    }
}

/// Classify with the date column as fallback.
///
/// The source reuses the expected-date cell for lifecycle annotations
/// ("Priced", "Trading"), so an absent or unrecognized status string defers
/// to whatever the date text says.
#[must_use]
pub fn classify_with_date(status_text: &str, date_text: &str) -> Status {
    let primary = classify(status_text);
    if primary != Status::Expected {
        return primary;
    }
    classify(date_text)
}
