//! Per-ticker calendar merging: fill gaps, don't regress.
//!
//! A calendar must never lose information it already had. An incoming
//! record's field wins only when it is informative; a default or placeholder
//! value loses to whatever the previous cycle knew.

use std::collections::HashMap;

use crate::core::{DEFAULT_LOCKUP, IpoError, IpoRecord, Status};

fn prefer_opt<T: Clone>(previous: &Option<T>, incoming: &Option<T>) -> Option<T> {
    incoming.clone().or_else(|| previous.clone())
}

/// Combine two records describing the same offering.
///
/// Field-by-field, the incoming value wins unless it is the documented
/// default and the previous value is not.
///
/// # Errors
///
/// Returns [`IpoError::MergeConflict`] when the identity fields disagree.
/// The normalizer's contract makes this unreachable for well-formed input,
/// but the merge checks it anyway.
pub fn merge_records(previous: &IpoRecord, incoming: &IpoRecord) -> Result<IpoRecord, IpoError> {
    if previous.ticker != incoming.ticker {
        return Err(IpoError::MergeConflict {
            ticker: incoming.ticker.clone(),
        });
    }

    Ok(IpoRecord {
        ticker: incoming.ticker.clone(),
        company: incoming.company.clone(),
        expected_date: if incoming.expected_date.is_known() {
            incoming.expected_date
        } else {
            previous.expected_date
        },
        price_range: prefer_opt(&previous.price_range, &incoming.price_range),
        shares_millions: prefer_opt(&previous.shares_millions, &incoming.shares_millions),
        volume: prefer_opt(&previous.volume, &incoming.volume),
        status: if incoming.status == Status::Expected {
            previous.status
        } else {
            incoming.status
        },
        documents: if incoming.documents == 0 {
            previous.documents
        } else {
            incoming.documents
        },
        lockup: if incoming.lockup == DEFAULT_LOCKUP && previous.lockup != DEFAULT_LOCKUP {
            previous.lockup.clone()
        } else {
            incoming.lockup.clone()
        },
        lead_managers: if incoming.lead_managers.is_empty() {
            previous.lead_managers.clone()
        } else {
            incoming.lead_managers.clone()
        },
        scoop_rating: prefer_opt(&previous.scoop_rating, &incoming.scoop_rating),
        exchange: match incoming.exchange.as_deref() {
            None => previous.exchange.clone(),
            Some(e) if e.eq_ignore_ascii_case("tbd") && previous.exchange.is_some() => {
                previous.exchange.clone()
            }
            Some(_) => incoming.exchange.clone(),
        },
    })
}

/// Fold a newly normalized batch into the previously persisted calendar,
/// producing exactly one record per distinct ticker.
///
/// Tickers only in `previous` are retained unchanged: the source stops
/// reporting offerings once they go stale, and historical completeness is
/// preferred over silent deletion. A per-ticker conflict keeps the previous
/// record and logs a warning instead of aborting the run.
#[must_use]
pub fn merge_calendars(previous: &[IpoRecord], incoming: &[IpoRecord]) -> Vec<IpoRecord> {
    merge_calendars_counted(previous, incoming).0
}

pub(crate) fn merge_calendars_counted(
    previous: &[IpoRecord],
    incoming: &[IpoRecord],
) -> (Vec<IpoRecord>, u32) {
    let mut merged: Vec<IpoRecord> = Vec::with_capacity(previous.len() + incoming.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(previous.len());
    let mut conflicts = 0u32;

    for record in previous {
        match index.get(&record.ticker) {
            // Defensive: a persisted calendar should already be unique.
            Some(&at) => merged[at] = record.clone(),
            None => {
                index.insert(record.ticker.clone(), merged.len());
                merged.push(record.clone());
            }
        }
    }

    for record in incoming {
        match index.get(&record.ticker) {
            Some(&at) => match merge_records(&merged[at], record) {
                Ok(combined) => merged[at] = combined,
                Err(e) => {
                    conflicts += 1;
                    tracing::warn!(
                        ticker = %record.ticker,
                        error = %e,
                        "merge conflict, keeping previously persisted record"
                    );
                }
            },
            None => {
                index.insert(record.ticker.clone(), merged.len());
                merged.push(record.clone());
            }
        }
    }

    (merged, conflicts)
}
