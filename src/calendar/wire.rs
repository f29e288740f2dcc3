use serde::{Deserialize, Serialize};

/// A numeric cell as the source reports it: sometimes a number, sometimes
/// text with currency symbols, thousands separators, or unit suffixes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNum {
    /// Already numeric in the source JSON.
    Num(f64),
    /// Free text, e.g. `"$72,000,000"` or `"10M"`.
    Text(String),
}

impl LooseNum {
    /// Best-effort numeric coercion; `None` when no digits survive cleaning.
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            LooseNum::Num(n) => Some(*n),
            LooseNum::Text(t) => {
                let cleaned: String = t
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect();
                cleaned.parse::<f64>().ok()
            }
        }
    }
}

/// One raw calendar row, as produced by the scraper or read from seed JSON.
///
/// Every key is optional; the normalizer applies documented defaults and
/// rejects only rows missing `ticker`/`company`. Aliases cover the header
/// variants the source and older seed files have used.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Ticker symbol.
    #[serde(default, alias = "symbol")]
    pub ticker: Option<String>,
    /// Company name.
    #[serde(default, alias = "company_name")]
    pub company: Option<String>,
    /// Expected trade date text, in whatever form the source used.
    #[serde(default, alias = "date")]
    pub expected_date: Option<String>,
    /// Preformatted price range text.
    #[serde(default)]
    pub price_range: Option<String>,
    /// Low end of the price range.
    #[serde(default)]
    pub price_low: Option<LooseNum>,
    /// High end of the price range.
    #[serde(default)]
    pub price_high: Option<LooseNum>,
    /// Shares offered, in millions.
    #[serde(default, alias = "shares_millions")]
    pub shares: Option<LooseNum>,
    /// Deal volume in dollars.
    #[serde(default)]
    pub volume: Option<LooseNum>,
    /// Status text.
    #[serde(default)]
    pub status: Option<String>,
    /// Count of associated filings.
    #[serde(default, alias = "filing_count")]
    pub documents: Option<i64>,
    /// Lock-up term text.
    #[serde(default, alias = "lockup_period")]
    pub lockup: Option<String>,
    /// Slash-delimited lead manager list.
    #[serde(default, alias = "managers", alias = "lead_underwriter", alias = "underwriter")]
    pub lead_managers: Option<String>,
    /// IPOScoop rating text.
    #[serde(default, alias = "rating")]
    pub scoop_rating: Option<String>,
    /// Listing exchange.
    #[serde(default)]
    pub exchange: Option<String>,
}
