//! Scripted oracle for tests and offline runs

use super::{Oracle, OracleRequest, DEGRADED_RESPONSE};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Oracle that replays queued responses in order, then repeats the last
/// one. Records every prompt it receives so tests can assert on the
/// evidence that reached it.
pub struct ScriptedOracle {
    responses: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    /// Always answer with the same response.
    pub fn fixed(response: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            last: Mutex::new(response.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Answer with each response in turn, repeating the final one.
    pub fn sequence(responses: Vec<String>) -> Self {
        let last = responses
            .last()
            .cloned()
            .unwrap_or_else(|| DEGRADED_RESPONSE.to_string());
        Self {
            responses: Mutex::new(responses.into()),
            last: Mutex::new(last),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn judge(&self, request: OracleRequest) -> Result<String> {
        self.prompts.lock().await.push(request.prompt);
        match self.responses.lock().await.pop_front() {
            Some(response) => {
                *self.last.lock().await = response.clone();
                Ok(response)
            }
            None => Ok(self.last.lock().await.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_repeats() {
        let oracle = ScriptedOracle::fixed(r#"{"verdict": "SAFE"}"#);
        for _ in 0..3 {
            let raw = oracle.judge(OracleRequest::text("x")).await.unwrap();
            assert_eq!(raw, r#"{"verdict": "SAFE"}"#);
        }
    }

    #[tokio::test]
    async fn test_sequence_then_repeat_last() {
        let oracle = ScriptedOracle::sequence(vec![
            r#"{"verdict": "SAFE"}"#.to_string(),
            r#"{"verdict": "SPAM"}"#.to_string(),
        ]);
        assert!(oracle
            .judge(OracleRequest::text("a"))
            .await
            .unwrap()
            .contains("SAFE"));
        assert!(oracle
            .judge(OracleRequest::text("b"))
            .await
            .unwrap()
            .contains("SPAM"));
        assert!(oracle
            .judge(OracleRequest::text("c"))
            .await
            .unwrap()
            .contains("SPAM"));
    }

    #[tokio::test]
    async fn test_records_prompts() {
        let oracle = ScriptedOracle::fixed("{}");
        oracle
            .judge(OracleRequest::text("first evidence"))
            .await
            .unwrap();
        oracle
            .judge(OracleRequest::text("second evidence"))
            .await
            .unwrap();
        let prompts = oracle.prompts().await;
        assert_eq!(prompts, vec!["first evidence", "second evidence"]);
    }

    #[tokio::test]
    async fn test_empty_sequence_serves_degraded() {
        let oracle = ScriptedOracle::sequence(Vec::new());
        let raw = oracle.judge(OracleRequest::text("x")).await.unwrap();
        assert_eq!(raw, DEGRADED_RESPONSE);
    }
}
