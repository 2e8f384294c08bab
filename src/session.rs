//! Cross-scan session context
//!
//! Keeps the most recent verdict per artifact lane (message, link,
//! payment) so later scans can see what came before. Each lane is a
//! single overwrite-only slot; there is no per-scan history here, that
//! lives in the ledger. The payment pipeline folds the context into its
//! audit query as alert notes, and the fraud chain report serializes the
//! whole snapshot for the oracle.

use crate::verdict::{ThreatBucket, Verdict, VerdictLabel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Artifact lane a verdict is filed under.
///
/// Document scans are deliberately absent. A tampered document says
/// nothing about whether the next payment is part of the same scam, so
/// it never feeds the correlation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Last scanned message or chat text
    Message,
    /// Last scanned URL
    Link,
    /// Last audited payment screenshot
    Payment,
}

/// Latest verdict recorded for one lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSnapshot {
    pub label: VerdictLabel,
    pub risk_score: u8,
    /// Short human-readable subject: truncated message text, the URL,
    /// or the payment description.
    pub summary: String,
    pub recorded_at: DateTime<Utc>,
}

/// Point-in-time view of all three lanes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub last_message: Option<SlotSnapshot>,
    pub last_link: Option<SlotSnapshot>,
    pub last_payment: Option<SlotSnapshot>,
}

impl SessionContext {
    /// True when no scan has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.last_message.is_none() && self.last_link.is_none() && self.last_payment.is_none()
    }

    /// Alert notes injected into a payment audit query when earlier
    /// lanes saw trouble.
    ///
    /// A message slot counts only when its label lands in the threat
    /// bucket. A link slot counts whenever its label is anything other
    /// than SAFE, so an unresolved or errored URL scan still raises the
    /// alert.
    pub fn alert_notes(&self) -> String {
        let mut notes = Vec::new();
        if let Some(message) = &self.last_message {
            if message.label.bucket() == ThreatBucket::Threat {
                notes.push(format!(
                    "[SYSTEM ALERT: User previously scanned a DANGEROUS message: '{}']",
                    message.summary
                ));
            }
        }
        if let Some(link) = &self.last_link {
            if link.label != VerdictLabel::Safe {
                notes.push(format!(
                    "[SYSTEM ALERT: User visited a RISKY URL: {}]",
                    link.summary
                ));
            }
        }
        notes.join(" ")
    }
}

/// Three overwrite-only slots behind a single lock.
///
/// Writers replace whole slots, so a torn read is impossible and readers
/// never observe a half-updated lane.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionContext>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SessionContext::default()),
        }
    }

    /// Record a finished scan into its lane, replacing whatever was
    /// there before.
    pub async fn record(&self, slot: Slot, verdict: &Verdict, summary: impl Into<String>) {
        let snapshot = SlotSnapshot {
            label: verdict.label,
            risk_score: verdict.risk_score,
            summary: summary.into(),
            recorded_at: Utc::now(),
        };
        let mut state = self.state.write().await;
        match slot {
            Slot::Message => state.last_message = Some(snapshot),
            Slot::Link => state.last_link = Some(snapshot),
            Slot::Payment => state.last_payment = Some(snapshot),
        }
        tracing::debug!(?slot, "session slot updated");
    }

    /// Read-only copy of the current context.
    pub async fn snapshot(&self) -> SessionContext {
        self.state.read().await.clone()
    }

    /// Drop all recorded context, returning the store to its empty
    /// state.
    pub async fn clear(&self) {
        *self.state.write().await = SessionContext::default();
        tracing::debug!("session context cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::ArtifactKind;

    fn verdict(kind: ArtifactKind, label: VerdictLabel, risk: u8) -> Verdict {
        Verdict::new(kind, label, risk, "test verdict")
    }

    #[tokio::test]
    async fn test_record_overwrites_lane() {
        let store = SessionStore::new();
        store
            .record(
                Slot::Message,
                &verdict(ArtifactKind::Message, VerdictLabel::Safe, 0),
                "hello there",
            )
            .await;
        store
            .record(
                Slot::Message,
                &verdict(ArtifactKind::Message, VerdictLabel::Spam, 70),
                "you won a prize",
            )
            .await;

        let context = store.snapshot().await;
        let message = context.last_message.unwrap();
        assert_eq!(message.label, VerdictLabel::Spam);
        assert_eq!(message.risk_score, 70);
        assert_eq!(message.summary, "you won a prize");
        assert!(context.last_link.is_none());
        assert!(context.last_payment.is_none());
    }

    #[tokio::test]
    async fn test_lanes_are_independent() {
        let store = SessionStore::new();
        store
            .record(
                Slot::Message,
                &verdict(ArtifactKind::Message, VerdictLabel::Safe, 0),
                "hi",
            )
            .await;
        store
            .record(
                Slot::Link,
                &verdict(ArtifactKind::Url, VerdictLabel::Phishing, 85),
                "http://secure-login.example.top",
            )
            .await;
        store
            .record(
                Slot::Payment,
                &verdict(ArtifactKind::Payment, VerdictLabel::Suspicious, 60),
                "₹500 to merchant",
            )
            .await;

        let context = store.snapshot().await;
        assert!(!context.is_empty());
        assert_eq!(context.last_message.unwrap().label, VerdictLabel::Safe);
        assert_eq!(context.last_link.unwrap().label, VerdictLabel::Phishing);
        assert_eq!(context.last_payment.unwrap().label, VerdictLabel::Suspicious);
    }

    #[tokio::test]
    async fn test_alert_notes_flag_threat_message() {
        let store = SessionStore::new();
        store
            .record(
                Slot::Message,
                &verdict(ArtifactKind::Message, VerdictLabel::Malicious, 100),
                "send your OTP now",
            )
            .await;

        let notes = store.snapshot().await.alert_notes();
        assert_eq!(
            notes,
            "[SYSTEM ALERT: User previously scanned a DANGEROUS message: 'send your OTP now']"
        );
    }

    #[tokio::test]
    async fn test_alert_notes_skip_clean_context() {
        let store = SessionStore::new();
        store
            .record(
                Slot::Message,
                &verdict(ArtifactKind::Message, VerdictLabel::Safe, 0),
                "lunch at noon?",
            )
            .await;
        store
            .record(
                Slot::Link,
                &verdict(ArtifactKind::Url, VerdictLabel::Safe, 0),
                "https://example.com",
            )
            .await;

        assert_eq!(store.snapshot().await.alert_notes(), "");
    }

    #[tokio::test]
    async fn test_alert_notes_treat_unresolved_link_as_risky() {
        // An errored URL scan is not proof of safety, so the link alert
        // still fires for it.
        let store = SessionStore::new();
        store
            .record(
                Slot::Link,
                &verdict(ArtifactKind::Url, VerdictLabel::Error, 0),
                "http://cannot-reach.example",
            )
            .await;

        let notes = store.snapshot().await.alert_notes();
        assert_eq!(
            notes,
            "[SYSTEM ALERT: User visited a RISKY URL: http://cannot-reach.example]"
        );
    }

    #[tokio::test]
    async fn test_alert_notes_combined_order() {
        let store = SessionStore::new();
        store
            .record(
                Slot::Link,
                &verdict(ArtifactKind::Url, VerdictLabel::Phishing, 85),
                "http://kyc-update.example.top",
            )
            .await;
        store
            .record(
                Slot::Message,
                &verdict(ArtifactKind::Message, VerdictLabel::Phishing, 85),
                "your account is blocked",
            )
            .await;

        let notes = store.snapshot().await.alert_notes();
        assert!(notes.starts_with("[SYSTEM ALERT: User previously scanned a DANGEROUS message:"));
        assert!(notes.contains("'] [SYSTEM ALERT: User visited a RISKY URL:"));
    }

    #[tokio::test]
    async fn test_caution_message_does_not_alert() {
        // Suspicious is below the threat bucket; only confirmed threat
        // labels poison later payment audits.
        let store = SessionStore::new();
        store
            .record(
                Slot::Message,
                &verdict(ArtifactKind::Message, VerdictLabel::Suspicious, 60),
                "limited time offer",
            )
            .await;

        assert_eq!(store.snapshot().await.alert_notes(), "");
    }

    #[tokio::test]
    async fn test_snapshot_is_read_only() {
        let store = SessionStore::new();
        store
            .record(
                Slot::Message,
                &verdict(ArtifactKind::Message, VerdictLabel::Spam, 70),
                "contest winner",
            )
            .await;

        let first = store.snapshot().await;
        let _ = first.alert_notes();
        let second = store.snapshot().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_clear_resets_all_lanes() {
        let store = SessionStore::new();
        store
            .record(
                Slot::Payment,
                &verdict(ArtifactKind::Payment, VerdictLabel::Fake, 85),
                "₹9000 to stranger",
            )
            .await;
        store.clear().await;

        assert!(store.snapshot().await.is_empty());
    }

    #[test]
    fn test_context_serializes_for_oracle() {
        let context = SessionContext {
            last_message: Some(SlotSnapshot {
                label: VerdictLabel::Spam,
                risk_score: 70,
                summary: "you won".into(),
                recorded_at: Utc::now(),
            }),
            last_link: None,
            last_payment: None,
        };

        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["lastMessage"]["label"], "SPAM");
        assert_eq!(json["lastMessage"]["riskScore"], 70);
        assert!(json["lastLink"].is_null());
    }
}
