//! Google Safe Browsing v4 reputation client

use super::{ReputationStatus, UrlReputation};
use crate::config::{resolve_secret, CollectorConfig};
use async_trait::async_trait;
use std::time::Duration;

const ENDPOINT: &str = "https://safebrowsing.googleapis.com/v4/threatMatches:find";

/// threatMatches:find client. Any match at all maps to Unsafe; a missing
/// key or transport failure maps to the matching sentinel, never to a
/// scan failure.
pub struct GoogleSafeBrowsing {
    api_key: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl GoogleSafeBrowsing {
    pub fn new(config: &CollectorConfig) -> Self {
        Self {
            api_key: resolve_secret(&config.safe_browsing_key_ref),
            timeout: Duration::from_secs(config.reputation_timeout_secs),
            client: reqwest::Client::new(),
        }
    }

    fn build_payload(url: &str) -> serde_json::Value {
        serde_json::json!({
            "client": {"clientId": "trustshield", "clientVersion": "1.0"},
            "threatInfo": {
                "threatTypes": ["MALWARE", "SOCIAL_ENGINEERING"],
                "platformTypes": ["ANY_PLATFORM"],
                "threatEntryTypes": ["URL"],
                "threatEntries": [{"url": url}]
            }
        })
    }
}

#[async_trait]
impl UrlReputation for GoogleSafeBrowsing {
    async fn lookup(&self, url: &str) -> ReputationStatus {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => return ReputationStatus::Unknown("no key".to_string()),
        };

        let endpoint = format!("{}?key={}", ENDPOINT, api_key);
        let response = self
            .client
            .post(&endpoint)
            .timeout(self.timeout)
            .json(&Self::build_payload(url))
            .send()
            .await;

        let body: serde_json::Value = match response {
            Ok(resp) => match resp.json().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(error = %err, "reputation response unreadable");
                    return ReputationStatus::Error;
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "reputation lookup failed");
                return ReputationStatus::Error;
            }
        };

        if body.get("matches").is_some() {
            ReputationStatus::Unsafe
        } else {
            ReputationStatus::Safe
        }
    }
}
