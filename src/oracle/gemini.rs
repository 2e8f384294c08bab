//! Gemini generateContent REST adapter

use super::{Oracle, OracleRequest, SchemaHint, DEGRADED_RESPONSE};
use crate::config::{resolve_secret, OracleConfig};
use crate::error::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini REST client. Scam bait and malware samples are exactly what it
/// is asked to look at, so every safety category is set to BLOCK_NONE.
pub struct GeminiOracle {
    config: OracleConfig,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GeminiOracle {
    /// Create a client, resolving the API key from the configured
    /// environment variable. A missing key is tolerated: `judge` then
    /// serves the degraded canned response instead of calling out.
    pub fn new(config: OracleConfig) -> Self {
        let api_key = resolve_secret(&config.api_key_ref);
        if api_key.is_none() {
            tracing::warn!(
                "oracle API key not set ({}), scans will degrade to ERROR verdicts",
                config.api_key_ref
            );
        }
        Self {
            config,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            api_key
        )
    }

    fn build_body(&self, request: &OracleRequest) -> GenerateRequest {
        let mut parts = vec![Part::Text {
            text: request.prompt.clone(),
        }];
        for attachment in &request.attachments {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: attachment.mime_type.clone(),
                    data: base64::engine::general_purpose::STANDARD.encode(&attachment.data),
                },
            });
        }

        GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
                response_mime_type: match request.schema {
                    SchemaHint::JsonDocument => Some("application/json".to_string()),
                    SchemaHint::JsonInText => None,
                },
            },
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category: category.to_string(),
                    threshold: "BLOCK_NONE".to_string(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl Oracle for GeminiOracle {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn judge(&self, request: OracleRequest) -> Result<String> {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => return Ok(DEGRADED_RESPONSE.to_string()),
        };

        let body = self.build_body(&request);
        tracing::debug!(
            model = %self.config.model,
            attachments = request.attachments.len(),
            "submitting evidence to oracle"
        );

        let response = self
            .client
            .post(self.endpoint(&api_key))
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Oracle(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Oracle(format!(
                "Gemini API error ({}): {}",
                status,
                detail.chars().take(200).collect::<String>()
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Oracle(format!("Failed to parse Gemini response: {}", e)))?;

        let text = result
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::Oracle("Gemini returned no candidate text".to_string()));
        }
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}
