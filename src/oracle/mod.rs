//! Semantic-verdict oracle: trait, REST client, lenient response parsing

mod gemini;
mod parse;
mod prompts;
mod resilient;
mod scripted;

pub use gemini::GeminiOracle;
pub use parse::{
    extract_json, ChainJudgment, DocumentJudgment, ExtractedDetails, MessageJudgment,
    PaymentJudgment, UrlJudgment,
};
pub use prompts::{
    document_prompt, fraud_chain_prompt, message_prompt, payment_prompt, url_prompt,
    DocumentEvidence, MessageEvidence, PaymentEvidence, UrlEvidence,
};
pub use resilient::ResilientOracle;
pub use scripted::ScriptedOracle;

use crate::error::Result;
use async_trait::async_trait;

/// Canned response served when the oracle is unreachable, misconfigured,
/// or times out. It carries every per-artifact explanation field so each
/// judgment shape parses it into a well-formed ERROR instead of tripping
/// the parse-failure path.
pub const DEGRADED_RESPONSE: &str = r#"{"verdict":"ERROR","is_safe":false,"explanation":"Analysis service unavailable.","audit_report":"Analysis service unavailable.","primary_evidence":"Analysis service unavailable.","verdict_explanation":"Analysis service unavailable.","narrative":"Analysis service unavailable."}"#;

/// Binary payload forwarded to the oracle alongside the evidence text.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// Requested response framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaHint {
    /// Free text expected to contain a JSON object, possibly fenced.
    JsonInText,
    /// A bare JSON document, enforced by the provider where supported.
    JsonDocument,
}

/// One oracle consultation: evidence text plus optional attachments.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    pub prompt: String,
    pub attachments: Vec<Attachment>,
    pub schema: SchemaHint,
}

impl OracleRequest {
    /// Text-only request with the default free-text framing.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachments: Vec::new(),
            schema: SchemaHint::JsonInText,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Ask the provider to return a bare JSON document.
    pub fn as_json_document(mut self) -> Self {
        self.schema = SchemaHint::JsonDocument;
        self
    }
}

/// External semantic-verdict source. Implementations submit an evidence
/// bundle and return the provider's raw textual response; callers run the
/// result through the lenient [`extract_json`] layer.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Adapter name for logs.
    fn name(&self) -> &str;

    /// Submit evidence and return the raw response text.
    async fn judge(&self, request: OracleRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_response_parses_for_every_shape() {
        let msg: MessageJudgment = extract_json(DEGRADED_RESPONSE).unwrap();
        assert_eq!(msg.verdict, "ERROR");
        assert!(!msg.is_safe);
        assert_eq!(msg.explanation, "Analysis service unavailable.");

        let url: UrlJudgment = extract_json(DEGRADED_RESPONSE).unwrap();
        assert_eq!(url.verdict, "ERROR");
        assert_eq!(url.audit_report, "Analysis service unavailable.");

        let doc: DocumentJudgment = extract_json(DEGRADED_RESPONSE).unwrap();
        assert_eq!(doc.verdict, "ERROR");
        assert_eq!(doc.primary_evidence, "Analysis service unavailable.");

        let pay: PaymentJudgment = extract_json(DEGRADED_RESPONSE).unwrap();
        assert_eq!(pay.verdict, "ERROR");
        assert_eq!(pay.risk_score, 0);
        assert_eq!(pay.verdict_explanation, "Analysis service unavailable.");
    }

    #[test]
    fn test_request_builder() {
        let request = OracleRequest::text("prompt body")
            .with_attachment(Attachment::new("image/jpeg", vec![1, 2, 3]))
            .as_json_document();

        assert_eq!(request.prompt, "prompt body");
        assert_eq!(request.attachments.len(), 1);
        assert_eq!(request.attachments[0].mime_type, "image/jpeg");
        assert_eq!(request.schema, SchemaHint::JsonDocument);
    }
}
