//! QR payload risk classification
//!
//! Classifies an externally decoded QR payload string. Two traps: a payload
//! with a hardcoded amount parameter debits the scanner instead of
//! crediting them, and a payload resolving to a plain web link instead of a
//! payment-app URI is a phishing vector.

use serde::{Deserialize, Serialize};

/// Risk classification of a decoded QR payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrFinding {
    pub payload: String,
    /// Payload enforces a payment amount (`&am=` parameter)
    pub fixed_amount: bool,
    /// Payload is a web link rather than a UPI URI
    pub web_link: bool,
}

impl QrFinding {
    pub fn is_risky(&self) -> bool {
        self.fixed_amount || self.web_link
    }
}

/// Classify a decoded QR payload.
pub fn classify_qr_payload(payload: &str) -> QrFinding {
    QrFinding {
        payload: payload.to_string(),
        fixed_amount: payload.contains("&am="),
        web_link: payload.contains("http") && !payload.contains("upi://"),
    }
}
