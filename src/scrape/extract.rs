//! Calendar-table extraction from the listing page HTML.
//!
//! Deliberately naive string scanning tailored to the site's table markup;
//! column positions are discovered from the header row rather than assumed.

use crate::calendar::{LooseNum, RawRecord};
use crate::core::IpoError;

/// Contents of every `<tag ...>...</tag>` block, in document order.
/// Case-insensitive on the tag name; ASCII lowercasing keeps offsets valid.
fn tag_blocks<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    let lower = html.to_ascii_lowercase();
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let mut blocks = Vec::new();
    let mut pos = 0usize;
    while let Some(rel) = lower[pos..].find(&open) {
        let start = pos + rel;
        // `<th` must not swallow `<thead>`: the name has to end here.
        let after_name = lower.as_bytes().get(start + open.len()).copied();
        if !matches!(after_name, Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')) {
            pos = start + open.len();
            continue;
        }
        let Some(open_end) = lower[start..].find('>') else {
            break;
        };
        let inner_start = start + open_end + 1;
        let Some(close_rel) = lower[inner_start..].find(&close) else {
            break;
        };
        blocks.push(&html[inner_start..inner_start + close_rel]);
        pos = inner_start + close_rel + close.len();
    }
    blocks
}

/// Minimal entity decoding for the handful the site actually emits.
fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Remove all tags, decode entities, and collapse whitespace runs.
fn cell_text(s: &str) -> String {
    let mut stripped = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => stripped.push(ch),
            _ => {}
        }
    }
    let decoded = decode_entities(&stripped);
    let mut out = String::with_capacity(decoded.len());
    let mut prev_space = false;
    for ch in decoded.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

#[derive(Default)]
struct ColumnMap {
    company: Option<usize>,
    ticker: Option<usize>,
    lead_managers: Option<usize>,
    shares: Option<usize>,
    price_low: Option<usize>,
    price_high: Option<usize>,
    volume: Option<usize>,
    expected_date: Option<usize>,
    scoop_rating: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Self {
        let mut map = Self::default();
        for (i, header) in headers.iter().enumerate() {
            let h = header.to_ascii_lowercase();
            if h.contains("company") {
                map.company.get_or_insert(i);
            } else if h.contains("symbol") {
                map.ticker.get_or_insert(i);
            } else if h.contains("lead") || h.contains("manager") {
                map.lead_managers.get_or_insert(i);
            } else if h.contains("price low") {
                map.price_low.get_or_insert(i);
            } else if h.contains("price high") {
                map.price_high.get_or_insert(i);
            } else if h.contains("shares") {
                map.shares.get_or_insert(i);
            } else if h.contains("volume") {
                map.volume.get_or_insert(i);
            } else if h.contains("expected") || h.contains("trade") {
                map.expected_date.get_or_insert(i);
            } else if h.contains("rating") && !h.contains("change") {
                map.scoop_rating.get_or_insert(i);
            }
        }
        map
    }

    fn is_calendar(&self) -> bool {
        self.company.is_some() && self.ticker.is_some()
    }
}

fn pick(cells: &[String], at: Option<usize>) -> Option<String> {
    let text = cells.get(at?)?.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.to_string())
}

fn pick_num(cells: &[String], at: Option<usize>) -> Option<LooseNum> {
    pick(cells, at).map(LooseNum::Text)
}

/// Extract raw calendar rows from the listing page.
///
/// The first table whose header row carries both a company and a symbol
/// column is taken to be the calendar; rows without any `<td>` cells
/// (header/section rows) are skipped.
///
/// # Errors
///
/// Returns [`IpoError::Data`] when no table on the page looks like the
/// calendar, which usually means the site layout changed.
pub(crate) fn parse_calendar_page(html: &str) -> Result<Vec<RawRecord>, IpoError> {
    for table in tag_blocks(html, "table") {
        let headers: Vec<String> = tag_blocks(table, "th").iter().map(|h| cell_text(h)).collect();
        let map = ColumnMap::from_headers(&headers);
        if !map.is_calendar() {
            continue;
        }

        let mut records = Vec::new();
        for row in tag_blocks(table, "tr") {
            let cells: Vec<String> = tag_blocks(row, "td").iter().map(|c| cell_text(c)).collect();
            if cells.len() < 2 {
                continue;
            }
            records.push(RawRecord {
                ticker: pick(&cells, map.ticker),
                company: pick(&cells, map.company),
                expected_date: pick(&cells, map.expected_date),
                price_low: pick_num(&cells, map.price_low),
                price_high: pick_num(&cells, map.price_high),
                shares: pick_num(&cells, map.shares),
                volume: pick_num(&cells, map.volume),
                lead_managers: pick(&cells, map.lead_managers),
                scoop_rating: pick(&cells, map.scoop_rating),
                ..RawRecord::default()
            });
        }
        tracing::debug!(rows = records.len(), "parsed calendar table");
        return Ok(records);
    }

    Err(IpoError::Data("no calendar table found on page".into()))
}
