//! Date-freshness validation for payment evidence
//!
//! Payment screenshots carry a free-text transaction date pulled out by OCR
//! or the oracle. This check parses it tolerantly and positions it against
//! "today": strictly future dates are fabrication, dates past the staleness
//! window are recycled old proofs. "Now" is passed in, keeping the check a
//! pure function.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

/// ISO-ish full-string formats tried before substring extraction.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d %b %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d.%m.%Y",
];

/// A parsed date positioned against "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFinding {
    pub parsed: NaiveDate,
    /// Days elapsed since the parsed date; negative for future dates
    pub age_days: i64,
    /// Parsed date is strictly after today
    pub is_future: bool,
    /// Parsed date is more than the staleness window before today
    pub is_stale: bool,
}

/// Parse a free-text date string.
///
/// Tries whole-string formats first, then hunts for an embedded date inside
/// surrounding noise (OCR output, oracle prose). Returns `None` when nothing
/// date-like is found.
pub fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }

    extract_embedded_date(trimmed)
}

/// Hunt for a date substring inside free text.
fn extract_embedded_date(text: &str) -> Option<NaiveDate> {
    let iso = Regex::new(r"\d{4}-\d{2}-\d{2}").ok()?;
    if let Some(m) = iso.find(text) {
        if let Ok(date) = NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d") {
            return Some(date);
        }
    }

    // "12 Aug 2025", "3 September, 2025"
    let day_month = Regex::new(r"(?i)\b(\d{1,2})\s+([A-Za-z]{3,9})\.?,?\s+(\d{4})\b").ok()?;
    if let Some(c) = day_month.captures(text) {
        let candidate = format!("{} {} {}", &c[1], &c[2], &c[3]);
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, "%d %b %Y") {
            return Some(date);
        }
    }

    // "Aug 12, 2025", "September 3 2025"
    let month_day = Regex::new(r"(?i)\b([A-Za-z]{3,9})\.?\s+(\d{1,2}),?\s+(\d{4})\b").ok()?;
    if let Some(c) = month_day.captures(text) {
        let candidate = format!("{} {} {}", &c[1], &c[2], &c[3]);
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, "%b %d %Y") {
            return Some(date);
        }
    }

    // "12/08/2025", "12-08-25". Day-first wins for ambiguous numeric dates;
    // payment screenshots in scope use dd/mm ordering.
    let numeric = Regex::new(r"\b(\d{1,2})[/.-](\d{1,2})[/.-](\d{2,4})\b").ok()?;
    if let Some(c) = numeric.captures(text) {
        let year = if c[3].len() == 2 {
            format!("20{}", &c[3])
        } else {
            c[3].to_string()
        };
        let candidate = format!("{}/{}/{}", &c[1], &c[2], year);
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, "%d/%m/%Y") {
            return Some(date);
        }
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, "%m/%d/%Y") {
            return Some(date);
        }
    }

    None
}

/// Position an extracted date against `today`.
///
/// Both the future and the staleness judgement are computed for every parsed
/// date; the fusion rules consume them in their own fixed order.
pub fn evaluate_freshness(
    raw: &str,
    today: NaiveDate,
    stale_after_days: i64,
) -> Option<DateFinding> {
    let parsed = parse_loose_date(raw)?;
    let age_days = (today - parsed).num_days();
    Some(DateFinding {
        parsed,
        age_days,
        is_future: parsed > today,
        is_stale: age_days > stale_after_days,
    })
}
