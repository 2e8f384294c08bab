//! Signal collectors: external lookups feeding the fusion engine
//!
//! Collectors never fail a scan. Each returns a bundle whose fields fall
//! back to sentinel values on error, so the engine reads an absent or
//! errored signal as "no signal" and carries on with what it has.

mod noop;
mod safe_browsing;

pub use noop::{NoopDomainIntel, NoopForensics, NoopRenderer, NoopTextIntel};
pub use safe_browsing::GoogleSafeBrowsing;

use crate::checks::MetadataTag;
use async_trait::async_trait;
use std::fmt;

/// Outcome of a URL reputation lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReputationStatus {
    Safe,
    Unsafe,
    /// Lookup not performed; the payload names the reason.
    Unknown(String),
    /// Lookup attempted and failed.
    Error,
}

impl ReputationStatus {
    pub fn is_unsafe(&self) -> bool {
        matches!(self, ReputationStatus::Unsafe)
    }
}

impl fmt::Display for ReputationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReputationStatus::Safe => write!(f, "safe"),
            ReputationStatus::Unsafe => write!(f, "unsafe"),
            ReputationStatus::Unknown(reason) => write!(f, "unknown ({})", reason),
            ReputationStatus::Error => write!(f, "error"),
        }
    }
}

/// Classifier signals for a piece of text.
#[derive(Debug, Clone)]
pub struct TextSignals {
    pub language: String,
    pub spam_label: String,
    pub spam_probability: f32,
    pub entities: Vec<String>,
}

impl Default for TextSignals {
    fn default() -> Self {
        Self {
            language: "unknown".to_string(),
            spam_label: "unknown".to_string(),
            spam_probability: 0.0,
            entities: Vec::new(),
        }
    }
}

/// Registration facts for a domain.
#[derive(Debug, Clone)]
pub struct DomainRecord {
    pub created: String,
    pub organization: String,
}

impl Default for DomainRecord {
    fn default() -> Self {
        Self {
            created: "Unknown".to_string(),
            organization: "Hidden".to_string(),
        }
    }
}

/// What a headless-browser visit saw.
#[derive(Debug, Clone, Default)]
pub struct RenderedPage {
    pub final_domain: String,
    pub page_text: String,
    pub links: Vec<String>,
    pub screenshot_path: Option<String>,
    pub error: Option<String>,
}

impl RenderedPage {
    /// Sentinel page for a render that never happened.
    pub fn unavailable(url: &str, reason: &str) -> Self {
        Self {
            final_domain: url.to_string(),
            error: Some(reason.to_string()),
            ..Self::default()
        }
    }
}

/// Image forensics: metadata, recompression score, OCR, QR payload.
/// `metadata: None` means the tags could not be read at all, which the
/// document rules surface as a warning rather than ignoring.
#[derive(Debug, Clone, Default)]
pub struct ForensicBundle {
    pub metadata: Option<Vec<MetadataTag>>,
    pub tamper_score: Option<f32>,
    pub ocr_text: Option<String>,
    pub qr_payload: Option<String>,
}

/// Language, spam and entity signals for message text.
#[async_trait]
pub trait TextIntel: Send + Sync {
    async fn analyze(&self, text: &str) -> TextSignals;
}

/// Blocklist reputation for a URL.
#[async_trait]
pub trait UrlReputation: Send + Sync {
    async fn lookup(&self, url: &str) -> ReputationStatus;
}

/// WHOIS-style registration lookup.
#[async_trait]
pub trait DomainIntel: Send + Sync {
    async fn lookup(&self, url: &str) -> DomainRecord;
}

/// Headless-browser page render.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> RenderedPage;
}

/// Byte-level image forensics.
#[async_trait]
pub trait Forensics: Send + Sync {
    async fn inspect(&self, content: &[u8]) -> ForensicBundle;
}
