//! Scan orchestration
//!
//! One [`Analyzer`] serves every artifact kind. Each scan follows the
//! same shape: fan out to the collectors, run the deterministic checks,
//! consult the oracle over the gathered evidence, hand everything to the
//! fusion chain, then record the outcome in the session context and the
//! history ledger. Collector failures degrade to sentinels and the
//! oracle degrades to a canned ERROR response, so a scan returns a
//! well-formed verdict for anything short of a malformed request.

use crate::checks::{
    assess_tamper_score, classify_qr_payload, evaluate_freshness, evaluate_metadata,
    find_transaction_id, scan_signatures,
};
use crate::collectors::{
    DomainIntel, Forensics, GoogleSafeBrowsing, NoopDomainIntel, NoopForensics, NoopRenderer,
    NoopTextIntel, PageRenderer, RenderedPage, TextIntel, UrlReputation,
};
use crate::config::TrustShieldConfig;
use crate::error::{Error, Result};
use crate::fusion::{
    fuse_document, fuse_message, fuse_payment, fuse_url, text_only_payment, DocumentSignals,
    PaymentSignals,
};
use crate::history::{HistoryLedger, OverviewStats};
use crate::oracle::{
    document_prompt, fraud_chain_prompt, message_prompt, payment_prompt, url_prompt, Attachment,
    ChainJudgment, DocumentEvidence, DocumentJudgment, GeminiOracle, MessageEvidence,
    MessageJudgment, Oracle, OracleRequest, PaymentEvidence, PaymentJudgment, ResilientOracle,
    UrlEvidence, UrlJudgment,
};
use crate::session::{SessionStore, Slot};
use crate::verdict::{ArtifactKind, Verdict};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const SESSION_SUMMARY_LIMIT: usize = 100;
const HISTORY_DETAIL_LIMIT: usize = 50;

/// Uploaded artifact bytes as received by the HTTP layer.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

/// Assembles an [`Analyzer`], defaulting any component that is not
/// injected: the Gemini oracle behind the degrade wrapper, the Safe
/// Browsing reputation client, and sentinel no-ops for the optional
/// collectors.
pub struct AnalyzerBuilder {
    config: TrustShieldConfig,
    oracle: Option<Arc<dyn Oracle>>,
    text_intel: Option<Arc<dyn TextIntel>>,
    reputation: Option<Arc<dyn UrlReputation>>,
    domain_intel: Option<Arc<dyn DomainIntel>>,
    renderer: Option<Arc<dyn PageRenderer>>,
    forensics: Option<Arc<dyn Forensics>>,
}

impl AnalyzerBuilder {
    pub fn new(config: TrustShieldConfig) -> Self {
        Self {
            config,
            oracle: None,
            text_intel: None,
            reputation: None,
            domain_intel: None,
            renderer: None,
            forensics: None,
        }
    }

    pub fn with_oracle(mut self, oracle: Arc<dyn Oracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn with_text_intel(mut self, text_intel: Arc<dyn TextIntel>) -> Self {
        self.text_intel = Some(text_intel);
        self
    }

    pub fn with_reputation(mut self, reputation: Arc<dyn UrlReputation>) -> Self {
        self.reputation = Some(reputation);
        self
    }

    pub fn with_domain_intel(mut self, domain_intel: Arc<dyn DomainIntel>) -> Self {
        self.domain_intel = Some(domain_intel);
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn PageRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_forensics(mut self, forensics: Arc<dyn Forensics>) -> Self {
        self.forensics = Some(forensics);
        self
    }

    pub fn build(self) -> Analyzer {
        let AnalyzerBuilder {
            config,
            oracle,
            text_intel,
            reputation,
            domain_intel,
            renderer,
            forensics,
        } = self;

        let oracle = oracle.unwrap_or_else(|| {
            // Outer guard sits above the HTTP client's own timeout so a
            // wedged connection still degrades instead of hanging the scan.
            let guard = Duration::from_secs(config.oracle.timeout_secs + 5);
            Arc::new(ResilientOracle::new(
                GeminiOracle::new(config.oracle.clone()),
                guard,
            ))
        });
        let reputation =
            reputation.unwrap_or_else(|| Arc::new(GoogleSafeBrowsing::new(&config.collectors)));

        Analyzer {
            oracle,
            text_intel: text_intel.unwrap_or_else(|| Arc::new(NoopTextIntel)),
            reputation,
            domain_intel: domain_intel.unwrap_or_else(|| Arc::new(NoopDomainIntel)),
            renderer: renderer.unwrap_or_else(|| Arc::new(NoopRenderer)),
            forensics: forensics.unwrap_or_else(|| Arc::new(NoopForensics)),
            session: SessionStore::new(),
            history: HistoryLedger::new(&config.history),
            config,
        }
    }
}

/// Scan orchestrator: owns the collectors, the oracle, the session
/// context and the history ledger.
pub struct Analyzer {
    config: TrustShieldConfig,
    oracle: Arc<dyn Oracle>,
    text_intel: Arc<dyn TextIntel>,
    reputation: Arc<dyn UrlReputation>,
    domain_intel: Arc<dyn DomainIntel>,
    renderer: Arc<dyn PageRenderer>,
    forensics: Arc<dyn Forensics>,
    session: SessionStore,
    history: HistoryLedger,
}

impl Analyzer {
    pub fn builder(config: TrustShieldConfig) -> AnalyzerBuilder {
        AnalyzerBuilder::new(config)
    }

    /// Analyzer with the default component set for this configuration.
    pub fn from_config(config: TrustShieldConfig) -> Self {
        AnalyzerBuilder::new(config).build()
    }

    /// Scan message text, an uploaded screenshot of one, or both.
    ///
    /// Image uploads are OCRed locally and the recognized text is folded
    /// into the evidence; the raw bytes still travel to the oracle so it
    /// can read what OCR missed.
    pub async fn scan_message(
        &self,
        text: Option<String>,
        file: Option<FileUpload>,
    ) -> Result<Verdict> {
        let scan_id = Uuid::new_v4();
        let mut final_text = text.unwrap_or_default();
        let mut source = "text_input";
        let mut attachment = None;

        if let Some(file) = &file {
            if !file.content.is_empty() {
                source = if file.mime_type.contains("pdf") {
                    "document"
                } else {
                    "screenshot"
                };
                attachment = Some(Attachment::new(file.mime_type.clone(), file.content.clone()));

                if file.mime_type.starts_with("image/") {
                    if let Some(ocr) = self.forensics.inspect(&file.content).await.ocr_text {
                        final_text = if final_text.is_empty() {
                            ocr
                        } else {
                            format!("{}\n[OCR]: {}", final_text, ocr)
                        };
                    }
                }
            }
        }

        if final_text.is_empty() && attachment.is_none() {
            return Err(Error::InvalidRequest(
                "No content found to analyze.".to_string(),
            ));
        }

        tracing::debug!(%scan_id, source, chars = final_text.len(), "message scan started");
        let signals = self.text_intel.analyze(&final_text).await;
        let evidence = MessageEvidence {
            text: final_text.clone(),
            source: source.to_string(),
            language: signals.language,
            spam_probability: signals.spam_probability,
            entities: signals.entities,
        };

        let mut request = OracleRequest::text(message_prompt(&evidence));
        if let Some(attachment) = attachment {
            request = request.with_attachment(attachment);
        }
        let raw = self.oracle.judge(request).await?;
        let verdict = fuse_message(&MessageJudgment::from_raw(&raw));

        self.session
            .record(
                Slot::Message,
                &verdict,
                clip(&final_text, SESSION_SUMMARY_LIMIT),
            )
            .await;
        self.history
            .record(
                ArtifactKind::Message,
                verdict.label,
                format!("{}...", clip(&final_text, HISTORY_DETAIL_LIMIT)),
            )
            .await;
        tracing::info!(%scan_id, label = %verdict.label, risk = verdict.risk_score, "message scan complete");
        Ok(verdict)
    }

    /// Audit a URL: reputation, registration and page render run in
    /// parallel, then the oracle judges the combined evidence.
    ///
    /// A render that fails or exceeds its budget degrades to an
    /// unavailable-page sentinel; the audit proceeds on the remaining
    /// signals.
    pub async fn scan_url(&self, url: &str) -> Result<Verdict> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::InvalidRequest("No URL provided.".to_string()));
        }
        let scan_id = Uuid::new_v4();
        tracing::debug!(%scan_id, url, "url scan started");

        let render_budget = Duration::from_secs(self.config.collectors.render_timeout_secs);
        let (reputation, domain, page) = tokio::join!(
            self.reputation.lookup(url),
            self.domain_intel.lookup(url),
            async {
                match tokio::time::timeout(render_budget, self.renderer.render(url)).await {
                    Ok(page) => page,
                    Err(_) => RenderedPage::unavailable(url, "render timed out"),
                }
            }
        );
        if let Some(reason) = &page.error {
            tracing::warn!(%scan_id, url, reason = %reason, "page render unavailable");
        }

        let evidence = UrlEvidence {
            url: url.to_string(),
            final_domain: page.final_domain.clone(),
            safe_browsing: reputation.to_string(),
            domain_age: domain.created,
            page_excerpt: clip(&page.page_text, self.config.collectors.page_text_limit).to_string(),
            links: page
                .links
                .into_iter()
                .take(self.config.collectors.link_limit)
                .collect(),
        };

        let raw = self
            .oracle
            .judge(OracleRequest::text(url_prompt(&evidence)))
            .await?;
        let verdict = fuse_url(&UrlJudgment::from_raw(&raw));

        self.session.record(Slot::Link, &verdict, url).await;
        self.history
            .record(ArtifactKind::Url, verdict.label, url)
            .await;
        tracing::info!(%scan_id, label = %verdict.label, risk = verdict.risk_score, "url scan complete");
        Ok(verdict)
    }

    /// Forensically verify an uploaded document or image.
    pub async fn scan_document(&self, file: FileUpload, query: &str) -> Result<Verdict> {
        let scan_id = Uuid::new_v4();
        tracing::debug!(%scan_id, filename = %file.filename, mime = %file.mime_type, "document scan started");

        let signature = scan_signatures(&file.content);
        let bundle = self.forensics.inspect(&file.content).await;
        let metadata = evaluate_metadata(
            bundle.metadata.as_deref(),
            &self.config.rules.safe_tools,
            &self.config.rules.risky_tools,
        );
        // Recompression analysis only means anything for raster images.
        let tamper = if file.mime_type.starts_with("image/") {
            assess_tamper_score(
                bundle.tamper_score,
                self.config.rules.tamper_suspicious_threshold,
                self.config.rules.tamper_force_threshold,
            )
        } else {
            None
        };

        let evidence = DocumentEvidence {
            filename: file.filename.clone(),
            mime_type: file.mime_type.clone(),
            metadata_status: metadata.status_line(),
            tamper_score: tamper.map(|t| t.score).unwrap_or(0.0),
            signature_status: signature
                .as_ref()
                .map(|hit| hit.description.clone())
                .unwrap_or_else(|| "Clean".to_string()),
            query: query.to_string(),
        };

        let request = OracleRequest::text(document_prompt(&evidence))
            .with_attachment(Attachment::new(file.mime_type.clone(), file.content));
        let raw = self.oracle.judge(request).await?;

        let signals = DocumentSignals {
            signature,
            metadata,
            tamper,
        };
        let verdict = fuse_document(&DocumentJudgment::from_raw(&raw), &signals);

        self.history
            .record(ArtifactKind::Document, verdict.label, file.filename)
            .await;
        tracing::info!(%scan_id, label = %verdict.label, risk = verdict.risk_score, "document scan complete");
        Ok(verdict)
    }

    /// Audit a payment screenshot against the claimed transaction.
    ///
    /// Earlier message and link verdicts from this session are folded
    /// into the oracle query as alert notes before the audit runs.
    pub async fn scan_payment(
        &self,
        amount: f64,
        recipient: &str,
        query: &str,
        file: Option<FileUpload>,
    ) -> Result<Verdict> {
        let scan_id = Uuid::new_v4();
        let details = format!("₹{} to {}", amount, recipient);

        let Some(file) = file else {
            let verdict = text_only_payment();
            self.session
                .record(Slot::Payment, &verdict, details.clone())
                .await;
            self.history
                .record(ArtifactKind::Payment, verdict.label, details)
                .await;
            tracing::info!(%scan_id, label = %verdict.label, "payment audit without screenshot");
            return Ok(verdict);
        };

        let notes = self.session.snapshot().await.alert_notes();
        if !notes.is_empty() {
            tracing::debug!(%scan_id, "session alerts joined the payment audit");
        }
        let full_query = format!("{} {}", query, notes).trim().to_string();

        let bundle = self.forensics.inspect(&file.content).await;
        let ocr_text = bundle.ocr_text.clone().unwrap_or_default();
        let today = chrono::Local::now().date_naive();

        let evidence = PaymentEvidence {
            amount,
            recipient: recipient.to_string(),
            today: today.format("%d %b %Y").to_string(),
            ocr_text: ocr_text.clone(),
            query: full_query,
        };
        let request = OracleRequest::text(payment_prompt(&evidence))
            .with_attachment(Attachment::new(file.mime_type.clone(), file.content))
            .as_json_document();
        let raw = self.oracle.judge(request).await?;
        let judgment = PaymentJudgment::from_raw(&raw);

        let signals = PaymentSignals {
            date: evaluate_freshness(
                &judgment.extracted_details.date_found,
                today,
                self.config.rules.stale_after_days,
            ),
            transaction_id: find_transaction_id(&ocr_text),
            qr: bundle.qr_payload.as_deref().map(classify_qr_payload),
        };
        let verdict = fuse_payment(&judgment, &signals);

        self.session
            .record(Slot::Payment, &verdict, details.clone())
            .await;
        self.history
            .record(ArtifactKind::Payment, verdict.label, details)
            .await;
        tracing::info!(%scan_id, label = %verdict.label, risk = verdict.risk_score, "payment audit complete");
        Ok(verdict)
    }

    /// Aggregate the session context into one holistic fraud-chain
    /// judgment. Read-only over the session slots.
    pub async fn fraud_report(&self) -> Result<ChainJudgment> {
        let context = self.session.snapshot().await;
        let session_json = serde_json::to_string(&context)?;
        let raw = self
            .oracle
            .judge(OracleRequest::text(fraud_chain_prompt(&session_json)))
            .await?;
        Ok(ChainJudgment::from_raw(&raw))
    }

    /// Dashboard statistics from the scan ledger.
    pub async fn overview_stats(&self) -> OverviewStats {
        self.history.stats().await
    }
}

/// Char-boundary-safe prefix.
fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
