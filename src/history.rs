//! Scan history and overview statistics
//!
//! Every finished scan is appended to an in-memory ledger, newest
//! first. The ledger feeds the dashboard overview: aggregate counts, a
//! pie breakdown by threat bucket, and the most recent entries. Nothing
//! is persisted across restarts.

use crate::config::HistoryConfig;
use crate::verdict::{ArtifactKind, ThreatBucket, VerdictLabel};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// One finalized scan as shown in the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: usize,
    pub kind: ArtifactKind,
    pub verdict: VerdictLabel,
    /// Wall-clock time of day, `HH:MM:SS`
    pub timestamp: String,
    /// Short subject line: truncated text, URL, filename or payment
    /// description.
    pub details: String,
}

/// Aggregate view for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_scans: usize,
    pub threats_detected: usize,
    pub safe_scans: usize,
    /// Slices ordered `[safe, suspicious, threats]`. Unscored entries
    /// (ERROR, UNKNOWN) count toward the total but join no slice.
    pub pie_data: [usize; 3],
    /// Newest entries first, capped by the configured limit.
    pub recent_activity: Vec<HistoryEntry>,
}

/// In-memory ledger of finished scans.
///
/// Ids are assigned from the entry count inside the write lock, which
/// keeps them unique and monotone even when scans finish concurrently.
#[derive(Debug)]
pub struct HistoryLedger {
    entries: RwLock<Vec<HistoryEntry>>,
    recent_limit: usize,
}

impl HistoryLedger {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            recent_limit: config.recent_limit,
        }
    }

    /// Record a finished scan at the head of the ledger and return its
    /// assigned id.
    pub async fn record(
        &self,
        kind: ArtifactKind,
        verdict: VerdictLabel,
        details: impl Into<String>,
    ) -> usize {
        let mut entries = self.entries.write().await;
        let id = entries.len() + 1;
        let entry = HistoryEntry {
            id,
            kind,
            verdict,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            details: details.into(),
        };
        entries.insert(0, entry);
        tracing::debug!(id, ?kind, %verdict, "scan recorded");
        id
    }

    /// Aggregate counts plus the newest entries.
    ///
    /// An empty ledger reports a `[1, 0, 0]` pie so the dashboard chart
    /// has something to draw before the first scan.
    pub async fn stats(&self) -> OverviewStats {
        let entries = self.entries.read().await;
        if entries.is_empty() {
            return OverviewStats {
                total_scans: 0,
                threats_detected: 0,
                safe_scans: 0,
                pie_data: [1, 0, 0],
                recent_activity: Vec::new(),
            };
        }

        let mut safe = 0;
        let mut suspicious = 0;
        let mut threats = 0;
        for entry in entries.iter() {
            match entry.verdict.bucket() {
                ThreatBucket::Safe => safe += 1,
                ThreatBucket::Caution => suspicious += 1,
                ThreatBucket::Threat => threats += 1,
                ThreatBucket::Unscored => {}
            }
        }

        OverviewStats {
            total_scans: entries.len(),
            threats_detected: threats,
            safe_scans: safe,
            pie_data: [safe, suspicious, threats],
            recent_activity: entries.iter().take(self.recent_limit).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ledger() -> HistoryLedger {
        HistoryLedger::new(&HistoryConfig::default())
    }

    #[tokio::test]
    async fn test_newest_first_with_monotone_ids() {
        let ledger = ledger();
        let first = ledger
            .record(ArtifactKind::Message, VerdictLabel::Safe, "hello")
            .await;
        let second = ledger
            .record(ArtifactKind::Url, VerdictLabel::Phishing, "http://bad.example")
            .await;

        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let stats = ledger.stats().await;
        assert_eq!(stats.recent_activity[0].id, 2);
        assert_eq!(stats.recent_activity[0].kind, ArtifactKind::Url);
        assert_eq!(stats.recent_activity[1].id, 1);
    }

    #[tokio::test]
    async fn test_empty_ledger_reports_placeholder_pie() {
        let stats = ledger().stats().await;
        assert_eq!(stats.total_scans, 0);
        assert_eq!(stats.threats_detected, 0);
        assert_eq!(stats.safe_scans, 0);
        assert_eq!(stats.pie_data, [1, 0, 0]);
        assert!(stats.recent_activity.is_empty());
    }

    #[tokio::test]
    async fn test_stats_count_by_bucket() {
        let ledger = ledger();
        ledger
            .record(ArtifactKind::Message, VerdictLabel::Safe, "hi")
            .await;
        ledger
            .record(ArtifactKind::Document, VerdictLabel::Legit, "invoice.pdf")
            .await;
        ledger
            .record(ArtifactKind::Payment, VerdictLabel::Suspicious, "₹500 to shop")
            .await;
        ledger
            .record(ArtifactKind::Message, VerdictLabel::Spam, "you won")
            .await;
        ledger
            .record(ArtifactKind::Url, VerdictLabel::Phishing, "http://bad.example")
            .await;
        ledger
            .record(ArtifactKind::Url, VerdictLabel::Error, "http://down.example")
            .await;

        let stats = ledger.stats().await;
        assert_eq!(stats.total_scans, 6);
        assert_eq!(stats.safe_scans, 2);
        assert_eq!(stats.threats_detected, 2);
        assert_eq!(stats.pie_data, [2, 1, 2]);
        // The errored scan joins no slice.
        let sliced: usize = stats.pie_data.iter().sum();
        assert_eq!(sliced, 5);
    }

    #[tokio::test]
    async fn test_recent_activity_is_capped() {
        let ledger = HistoryLedger::new(&HistoryConfig { recent_limit: 3 });
        for i in 0..5 {
            ledger
                .record(ArtifactKind::Message, VerdictLabel::Safe, format!("scan {i}"))
                .await;
        }

        let stats = ledger.stats().await;
        assert_eq!(stats.total_scans, 5);
        assert_eq!(stats.recent_activity.len(), 3);
        assert_eq!(stats.recent_activity[0].id, 5);
        assert_eq!(stats.recent_activity[2].id, 3);
    }

    #[tokio::test]
    async fn test_concurrent_records_get_unique_ids() {
        let ledger = Arc::new(ledger());
        let mut handles = Vec::new();
        for i in 0..32 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger
                    .record(ArtifactKind::Message, VerdictLabel::Safe, format!("scan {i}"))
                    .await
            }));
        }

        let mut ids: Vec<usize> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_timestamp_is_time_of_day() {
        let ledger = ledger();
        ledger
            .record(ArtifactKind::Message, VerdictLabel::Safe, "hi")
            .await;

        let stats = ledger.stats().await;
        let timestamp = &stats.recent_activity[0].timestamp;
        assert_eq!(timestamp.len(), 8);
        assert_eq!(timestamp.as_bytes()[2], b':');
        assert_eq!(timestamp.as_bytes()[5], b':');
    }

    #[tokio::test]
    async fn test_entry_serializes_camel_case() {
        let ledger = ledger();
        ledger
            .record(ArtifactKind::Url, VerdictLabel::Phishing, "http://bad.example")
            .await;

        let stats = ledger.stats().await;
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalScans"], 1);
        assert_eq!(json["pieData"][2], 1);
        assert_eq!(json["recentActivity"][0]["kind"], "URL");
        assert_eq!(json["recentActivity"][0]["verdict"], "PHISHING");
    }
}
