//! Degrade-to-fallback wrapper around an oracle

use super::{Oracle, OracleRequest, DEGRADED_RESPONSE};
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Wraps an oracle with a hard timeout and converts any failure into the
/// canned degraded response. Scans behind this wrapper always get a
/// response text back; the parse layer turns the canned text into an
/// ERROR verdict.
pub struct ResilientOracle<O> {
    inner: O,
    timeout: Duration,
}

impl<O: Oracle> ResilientOracle<O> {
    pub fn new(inner: O, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<O: Oracle> Oracle for ResilientOracle<O> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn judge(&self, request: OracleRequest) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.inner.judge(request)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(err)) => {
                tracing::warn!(oracle = self.inner.name(), error = %err, "oracle failed, serving degraded response");
                Ok(DEGRADED_RESPONSE.to_string())
            }
            Err(_) => {
                tracing::warn!(
                    oracle = self.inner.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "oracle timed out, serving degraded response"
                );
                Ok(DEGRADED_RESPONSE.to_string())
            }
        }
    }
}
