//! Sentinel-returning collectors for builds without the optional tooling

use super::{
    DomainIntel, DomainRecord, ForensicBundle, Forensics, PageRenderer, RenderedPage, TextIntel,
    TextSignals,
};
use async_trait::async_trait;

/// Text classifier stand-in; every signal stays "unknown".
#[derive(Debug, Default)]
pub struct NoopTextIntel;

#[async_trait]
impl TextIntel for NoopTextIntel {
    async fn analyze(&self, _text: &str) -> TextSignals {
        TextSignals::default()
    }
}

/// WHOIS stand-in.
#[derive(Debug, Default)]
pub struct NoopDomainIntel;

#[async_trait]
impl DomainIntel for NoopDomainIntel {
    async fn lookup(&self, _url: &str) -> DomainRecord {
        DomainRecord::default()
    }
}

/// Renderer stand-in; reports the page as unrendered.
#[derive(Debug, Default)]
pub struct NoopRenderer;

#[async_trait]
impl PageRenderer for NoopRenderer {
    async fn render(&self, url: &str) -> RenderedPage {
        RenderedPage::unavailable(url, "no renderer configured")
    }
}

/// Image forensics stand-in; yields an empty bundle, which downstream
/// rules treat as unreadable evidence rather than clean evidence.
#[derive(Debug, Default)]
pub struct NoopForensics;

#[async_trait]
impl Forensics for NoopForensics {
    async fn inspect(&self, _content: &[u8]) -> ForensicBundle {
        ForensicBundle::default()
    }
}
