//! Prompt builders: one evidence bundle and one builder per artifact kind
//!
//! Each builder names the JSON fields the matching judgment struct in
//! [`parse`](super::parse) deserializes, so prompt and parser stay in step.

/// Evidence bundle for a message scan.
#[derive(Debug, Clone, Default)]
pub struct MessageEvidence {
    pub text: String,
    pub source: String,
    pub language: String,
    pub spam_probability: f32,
    pub entities: Vec<String>,
}

/// Evidence bundle for a URL audit.
#[derive(Debug, Clone, Default)]
pub struct UrlEvidence {
    pub url: String,
    pub final_domain: String,
    pub safe_browsing: String,
    pub domain_age: String,
    pub page_excerpt: String,
    pub links: Vec<String>,
}

/// Evidence bundle for document forensics.
#[derive(Debug, Clone, Default)]
pub struct DocumentEvidence {
    pub filename: String,
    pub mime_type: String,
    pub metadata_status: String,
    pub tamper_score: f32,
    pub signature_status: String,
    pub query: String,
}

/// Evidence bundle for a payment-proof audit. `query` already carries any
/// session context notes the caller injected.
#[derive(Debug, Clone, Default)]
pub struct PaymentEvidence {
    pub amount: f64,
    pub recipient: String,
    pub today: String,
    pub ocr_text: String,
    pub query: String,
}

const MESSAGE_TEXT_LIMIT: usize = 2000;
const PAGE_EXCERPT_LIMIT: usize = 2000;
const OCR_EXCERPT_LIMIT: usize = 300;

/// Char-boundary-safe prefix.
fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn message_prompt(evidence: &MessageEvidence) -> String {
    let spam_detected = if evidence.spam_probability > 0.8 {
        "YES"
    } else {
        "NO"
    };
    format!(
        r#"Act as a cyber-security intelligence unit. Analyze this message in full.

INPUT DATA:
- Message text: "{text}"
- Source: {source}
- Language: {language}
- Classifier spam signal: {spam}
- Entities found: {entities:?}

TASK: decide whether this message is SAFE or MALICIOUS/SPAM.

RULES:
1. Output must be categorical. No numeric scores.
2. A bare greeting ("Hi", "Hello") is SAFE.
3. A greeting combined with a link or a money request is SUSPICIOUS.
4. If the text reads as ordinary conversation, override the classifier signal.

REQUIRED OUTPUT (JSON only):
{{
    "verdict": "SAFE" / "SPAM" / "SUSPICIOUS" / "MALICIOUS",
    "is_safe": true/false,
    "explanation": "Clear, direct reason.",
    "fraud_category": "Phishing / CEO Fraud / Marketing / None",
    "action_needed": "None" / "Delete" / "Block Sender"
}}"#,
        text = clip(&evidence.text, MESSAGE_TEXT_LIMIT),
        source = evidence.source,
        language = evidence.language,
        spam = spam_detected,
        entities = evidence.entities,
    )
}

pub fn url_prompt(evidence: &UrlEvidence) -> String {
    format!(
        r#"Act as a security auditor. Provide a strict safety verdict for this URL.

INPUT DATA:
- URL: {url}
- Resolved domain: {domain}
- Reputation lookup: {reputation}
- Domain registered: {age}
- Outbound links observed: {links:?}
- Rendered page text: "{page}"

OUTPUT (JSON only):
{{
    "verdict": "SAFE" / "PHISHING" / "SUSPICIOUS",
    "is_safe": true/false,
    "audit_report": "Brief summary of why it is safe or unsafe.",
    "risk_indicators": ["specific red flags, or 'None'"]
}}"#,
        url = evidence.url,
        domain = evidence.final_domain,
        reputation = evidence.safe_browsing,
        age = evidence.domain_age,
        links = evidence.links,
        page = clip(&evidence.page_excerpt, PAGE_EXCERPT_LIMIT),
    )
}

pub fn document_prompt(evidence: &DocumentEvidence) -> String {
    let question = if evidence.query.is_empty() {
        String::new()
    } else {
        format!(
            "\nUSER QUESTION: \"{}\"\n- Answer it directly in the reasoning.\n",
            evidence.query
        )
    };
    format!(
        r#"Act as a senior forensic document analyst.

TASK: verify the authenticity of "{filename}" ({mime}).
{question}
FORENSIC PROTOCOL:
1. Compare noise and grain between static labels and variable values.
   If labels look scanned but values look freshly digital, it is TAMPERED.
2. Check font weight and baseline alignment of amounts and dates against
   the surrounding line.
3. Look for clean rectangular patches behind text and inconsistent lighting.

VERDICT LOGIC:
- Specific visual inconsistencies found -> TAMPERED.
- Consistently low quality throughout -> LEGIT.
- Metadata reads "{metadata}" and it is not clean -> TAMPERED.
- Local signature scan: {signature}. Recompression difference score: {tamper:.0}/100.

OUTPUT (JSON only):
{{
    "verdict": "LEGIT" / "TAMPERED" / "SUSPICIOUS",
    "is_tampered": true/false,
    "primary_evidence": "One sentence naming the exact flaw.",
    "technical_details": [
        "Noise analysis: [Consistent/Inconsistent]",
        "Alignment check: [Pass/Fail]",
        "Font integrity: [Pass/Fail]"
    ]
}}"#,
        filename = evidence.filename,
        mime = evidence.mime_type,
        question = question,
        metadata = evidence.metadata_status,
        signature = evidence.signature_status,
        tamper = evidence.tamper_score,
    )
}

pub fn payment_prompt(evidence: &PaymentEvidence) -> String {
    format!(
        r#"Act as a payment-fraud analyst auditing a UPI payment screenshot.

CONTEXT: the user claims this payment was made recently.
CURRENT DATE: {today}

TASK: reject any screenshot that is old, outdated, or manipulated.

RULES (zero tolerance):
1. Read the transaction date off the screenshot. A date years in the past
   means the proof is stale: verdict FAKE, reason "obsolete interface,
   payment proofs must be recent".
2. Modern payment apps use rounded cards and large centered amounts. Sharp
   white cards with small fonts indicate an obsolete layout: FAKE.
3. The UPI transaction ID must be exactly 12 digits.
4. A date after {today} is impossible: FAKE.

INPUT DATA:
- Claimed amount: {amount}
- Claimed recipient: "{recipient}"
- User query: "{query}"
- OCR scan: "{ocr}"

OUTPUT (JSON only):
{{
    "verdict": "SAFE" / "FAKE" / "SUSPICIOUS",
    "risk_score": <integer 0-100>,
    "verdict_explanation": "Direct reason.",
    "forensic_flags": ["each concrete finding, one per entry"],
    "extracted_details": {{
        "date_found": "date string exactly as shown",
        "upi_txn_id": "ID found"
    }}
}}"#,
        today = evidence.today,
        amount = evidence.amount,
        recipient = evidence.recipient,
        query = evidence.query,
        ocr = clip(&evidence.ocr_text, OCR_EXCERPT_LIMIT),
    )
}

/// `session_json` is the serialized session snapshot: last message, last
/// link, last payment.
pub fn fraud_chain_prompt(session_json: &str) -> String {
    format!(
        r#"Connect the dots across this user's recent activity: message -> link -> payment.

SESSION DATA:
{session}

Predict the fraud pattern, if any, and score it 0-100.

OUTPUT (JSON only):
{{
    "fraud_type": "named pattern, or 'None'",
    "risk_score": <integer 0-100>,
    "narrative": "How the pieces connect.",
    "recommendation": "What the user should do next."
}}"#,
        session = session_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_prompt_carries_evidence() {
        let evidence = MessageEvidence {
            text: "You won a prize, click http://claim.example".to_string(),
            source: "sms".to_string(),
            language: "en".to_string(),
            spam_probability: 0.93,
            entities: vec!["prize".to_string()],
        };
        let prompt = message_prompt(&evidence);
        assert!(prompt.contains("You won a prize"));
        assert!(prompt.contains("Classifier spam signal: YES"));
        assert!(prompt.contains("\"fraud_category\""));
    }

    #[test]
    fn test_message_prompt_spam_threshold() {
        let evidence = MessageEvidence {
            spam_probability: 0.8,
            ..Default::default()
        };
        // Signal fires strictly above 0.8.
        assert!(message_prompt(&evidence).contains("Classifier spam signal: NO"));
    }

    #[test]
    fn test_message_prompt_clips_long_text() {
        let evidence = MessageEvidence {
            text: "x".repeat(5000),
            ..Default::default()
        };
        let prompt = message_prompt(&evidence);
        assert!(prompt.len() < 4000);
    }

    #[test]
    fn test_document_prompt_optional_question() {
        let mut evidence = DocumentEvidence {
            filename: "receipt.jpg".to_string(),
            ..Default::default()
        };
        assert!(!document_prompt(&evidence).contains("USER QUESTION"));

        evidence.query = "Is the stamp real?".to_string();
        let prompt = document_prompt(&evidence);
        assert!(prompt.contains("USER QUESTION: \"Is the stamp real?\""));
    }

    #[test]
    fn test_payment_prompt_carries_context() {
        let evidence = PaymentEvidence {
            amount: 4999.0,
            recipient: "merchant@upi".to_string(),
            today: "20 Aug 2025".to_string(),
            ocr_text: "Paid to merchant 123456789012".to_string(),
            query: "verify [SYSTEM ALERT: User visited a RISKY URL: http://bad.example]"
                .to_string(),
        };
        let prompt = payment_prompt(&evidence);
        assert!(prompt.contains("CURRENT DATE: 20 Aug 2025"));
        assert!(prompt.contains("SYSTEM ALERT"));
        assert!(prompt.contains("123456789012"));
    }

    #[test]
    fn test_clip_respects_char_boundaries() {
        let text = "héllo wörld";
        assert_eq!(clip(text, 4), "héll");
        assert_eq!(clip(text, 100), text);
    }

    #[test]
    fn test_chain_prompt_embeds_session() {
        let prompt = fraud_chain_prompt(r#"{"last_message":null}"#);
        assert!(prompt.contains(r#"{"last_message":null}"#));
        assert!(prompt.contains("\"fraud_type\""));
    }
}
