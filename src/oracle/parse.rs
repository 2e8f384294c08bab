//! Lenient extraction of JSON judgments from raw oracle output
//!
//! Providers wrap their JSON in markdown fences or sprinkle `//` comments
//! into it. Extraction tries the raw text first, then retries on a cleaned
//! copy with fences and line comments removed. Every judgment field is
//! serde-defaulted so a sparse response still parses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Parse a JSON value out of raw oracle text, tolerating markdown fences
/// and `//` line comments. Returns `None` when no JSON object survives.
pub fn extract_json<T: DeserializeOwned>(raw: &str) -> Option<T> {
    if let Ok(value) = serde_json::from_str(raw.trim()) {
        return Some(value);
    }
    serde_json::from_str(strip_noise(raw).trim()).ok()
}

fn strip_noise(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for line in raw.lines() {
        if line.trim_start().starts_with("```") {
            continue;
        }
        cleaned.push_str(strip_line_comment(line));
        cleaned.push('\n');
    }
    cleaned
}

/// Cut a trailing `//` comment. A `//` right after `:` is left alone so
/// protocol separators inside string values (`https://...`) survive.
fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for i in 0..bytes.len().saturating_sub(1) {
        if bytes[i] == b'/' && bytes[i + 1] == b'/' {
            let after_colon = i > 0 && bytes[i - 1] == b':';
            if !after_colon {
                return &line[..i];
            }
        }
    }
    line
}

fn default_verdict() -> String {
    "UNKNOWN".to_string()
}

/// Judgment shape for message scans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageJudgment {
    #[serde(default = "default_verdict")]
    pub verdict: String,
    #[serde(default)]
    pub is_safe: bool,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub fraud_category: String,
    #[serde(default)]
    pub action_needed: String,
}

impl MessageJudgment {
    /// Parse raw oracle text, falling back to a conservative ERROR.
    pub fn from_raw(raw: &str) -> Self {
        extract_json(raw).unwrap_or_else(|| Self {
            verdict: "ERROR".to_string(),
            is_safe: false,
            explanation: "Analysis output could not be parsed.".to_string(),
            fraud_category: String::new(),
            action_needed: String::new(),
        })
    }
}

/// Judgment shape for URL audits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlJudgment {
    #[serde(default = "default_verdict")]
    pub verdict: String,
    #[serde(default)]
    pub is_safe: bool,
    #[serde(default)]
    pub audit_report: String,
    #[serde(default)]
    pub risk_indicators: Vec<String>,
}

impl UrlJudgment {
    pub fn from_raw(raw: &str) -> Self {
        extract_json(raw).unwrap_or_else(|| Self {
            verdict: "ERROR".to_string(),
            is_safe: false,
            audit_report: "Analysis output could not be parsed.".to_string(),
            risk_indicators: Vec::new(),
        })
    }
}

/// Judgment shape for document forensics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentJudgment {
    #[serde(default = "default_verdict")]
    pub verdict: String,
    #[serde(default)]
    pub is_tampered: bool,
    #[serde(default)]
    pub primary_evidence: String,
    #[serde(default)]
    pub technical_details: Vec<String>,
}

impl DocumentJudgment {
    pub fn from_raw(raw: &str) -> Self {
        extract_json(raw).unwrap_or_else(|| Self {
            verdict: "ERROR".to_string(),
            is_tampered: false,
            primary_evidence: "Analysis output could not be parsed.".to_string(),
            technical_details: Vec::new(),
        })
    }
}

/// Fields the oracle reads off a payment screenshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDetails {
    #[serde(default)]
    pub date_found: String,
    #[serde(default)]
    pub upi_txn_id: String,
}

/// Judgment shape for payment-proof audits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentJudgment {
    #[serde(default = "default_verdict")]
    pub verdict: String,
    #[serde(default)]
    pub risk_score: u8,
    #[serde(default)]
    pub verdict_explanation: String,
    #[serde(default)]
    pub forensic_flags: Vec<String>,
    #[serde(default)]
    pub extracted_details: ExtractedDetails,
}

impl PaymentJudgment {
    /// Parse raw oracle text. Payment audits fall back to SUSPICIOUS at
    /// risk 75 rather than ERROR: an unreadable forensic response is
    /// itself a reason for doubt.
    pub fn from_raw(raw: &str) -> Self {
        extract_json(raw).unwrap_or_else(|| Self {
            verdict: "SUSPICIOUS".to_string(),
            risk_score: 75,
            verdict_explanation: "Analysis output could not be parsed.".to_string(),
            forensic_flags: Vec::new(),
            extracted_details: ExtractedDetails::default(),
        })
    }
}

/// Judgment shape for the session-wide fraud-chain report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainJudgment {
    #[serde(default = "default_verdict")]
    pub fraud_type: String,
    #[serde(default)]
    pub risk_score: u8,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub recommendation: String,
}

impl ChainJudgment {
    pub fn from_raw(raw: &str) -> Self {
        extract_json(raw).unwrap_or_else(|| Self {
            fraud_type: "UNKNOWN".to_string(),
            risk_score: 0,
            narrative: "Analysis output could not be parsed.".to_string(),
            recommendation: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_json() {
        let raw = r#"{"verdict": "SAFE", "is_safe": true, "explanation": "ok"}"#;
        let judgment: MessageJudgment = extract_json(raw).unwrap();
        assert_eq!(judgment.verdict, "SAFE");
        assert!(judgment.is_safe);
    }

    #[test]
    fn test_extract_fenced_json() {
        let raw = "```json\n{\"verdict\": \"SPAM\", \"is_safe\": false}\n```";
        let judgment: MessageJudgment = extract_json(raw).unwrap();
        assert_eq!(judgment.verdict, "SPAM");
        assert!(!judgment.is_safe);
    }

    #[test]
    fn test_extract_json_with_line_comments() {
        let raw = concat!(
            "```json\n",
            "{\n",
            "  \"verdict\": \"PHISHING\", // forced redirect observed\n",
            "  \"is_safe\": false,\n",
            "  \"audit_report\": \"Cloned login page\"\n",
            "}\n",
            "```",
        );
        let judgment: UrlJudgment = extract_json(raw).unwrap();
        assert_eq!(judgment.verdict, "PHISHING");
        assert_eq!(judgment.audit_report, "Cloned login page");
    }

    #[test]
    fn test_extract_preserves_urls_in_strings() {
        let raw = r#"{"verdict": "SUSPICIOUS", "audit_report": "Redirects to https://evil.example"}"#;
        let judgment: UrlJudgment = extract_json(raw).unwrap();
        assert_eq!(judgment.audit_report, "Redirects to https://evil.example");
    }

    #[test]
    fn test_missing_fields_default() {
        let judgment: PaymentJudgment = extract_json(r#"{"verdict": "FAKE"}"#).unwrap();
        assert_eq!(judgment.verdict, "FAKE");
        assert_eq!(judgment.risk_score, 0);
        assert!(judgment.forensic_flags.is_empty());
        assert_eq!(judgment.extracted_details.date_found, "");
    }

    #[test]
    fn test_message_fallback_on_garbage() {
        let judgment = MessageJudgment::from_raw("the model rambled with no json at all");
        assert_eq!(judgment.verdict, "ERROR");
        assert!(!judgment.is_safe);
        assert_eq!(judgment.explanation, "Analysis output could not be parsed.");
    }

    #[test]
    fn test_payment_fallback_is_suspicious() {
        let judgment = PaymentJudgment::from_raw("```json\n{broken");
        assert_eq!(judgment.verdict, "SUSPICIOUS");
        assert_eq!(judgment.risk_score, 75);
    }

    #[test]
    fn test_chain_judgment_roundtrip() {
        let raw = r#"{"fraud_type": "UPI Scam Chain", "risk_score": 88, "narrative": "Message led to link led to payment", "recommendation": "Block sender"}"#;
        let judgment = ChainJudgment::from_raw(raw);
        assert_eq!(judgment.fraud_type, "UPI Scam Chain");
        assert_eq!(judgment.risk_score, 88);
    }

    #[test]
    fn test_strip_line_comment_edges() {
        assert_eq!(strip_line_comment("  \"a\": 1, // note"), "  \"a\": 1, ");
        assert_eq!(
            strip_line_comment("\"url\": \"https://x.example\""),
            "\"url\": \"https://x.example\""
        );
        assert_eq!(strip_line_comment("no comment here"), "no comment here");
    }
}
