//! Transaction-ID format validation
//!
//! UPI transaction references are 12 contiguous digits. A payment proof the
//! oracle calls SAFE but that carries no such sequence gets downgraded by
//! the fusion engine.

use regex::Regex;

/// Find the first 12-digit contiguous sequence in OCR text.
///
/// Word boundaries keep longer digit runs (account numbers, card PANs) from
/// matching.
pub fn find_transaction_id(text: &str) -> Option<String> {
    let re = Regex::new(r"\b\d{12}\b").ok()?;
    re.find(text).map(|m| m.as_str().to_string())
}
