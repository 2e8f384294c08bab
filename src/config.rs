//! TrustShield configuration management

use serde::{Deserialize, Serialize};

/// Main TrustShield configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustShieldConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Semantic-verdict oracle configuration
    #[serde(default)]
    pub oracle: OracleConfig,

    /// External collector configuration
    #[serde(default)]
    pub collectors: CollectorConfig,

    /// Deterministic rule-check tuning
    #[serde(default)]
    pub rules: RuleConfig,

    /// Scan history configuration
    #[serde(default)]
    pub history: HistoryConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed CORS origins (empty = allow any)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8600,
            cors_origins: Vec::new(),
        }
    }
}

/// Oracle configuration
///
/// The API key is referenced by environment-variable name and never stored
/// in the config file itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Provider identifier (informational; only the Gemini REST shape is built in)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// API base URL
    pub base_url: String,

    /// Environment variable holding the API key
    pub api_key_ref: String,

    /// Per-call timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus sampling cutoff
    pub top_p: f32,

    /// Maximum output tokens per response
    pub max_output_tokens: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-3-pro-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_ref: "GEMINI_API_KEY".to_string(),
            timeout_secs: 30,
            temperature: 0.4,
            top_p: 0.9,
            max_output_tokens: 4096,
        }
    }
}

/// Collector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Environment variable holding the Safe Browsing API key
    pub safe_browsing_key_ref: String,

    /// Timeout for reputation lookups in seconds
    pub reputation_timeout_secs: u64,

    /// Timeout for page rendering in seconds
    pub render_timeout_secs: u64,

    /// Maximum rendered page text forwarded to the oracle
    pub page_text_limit: usize,

    /// Maximum page links forwarded to the oracle
    pub link_limit: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            safe_browsing_key_ref: "GOOGLE_SAFE_BROWSING_KEY".to_string(),
            reputation_timeout_secs: 5,
            render_timeout_secs: 20,
            page_text_limit: 2000,
            link_limit: 10,
        }
    }
}

/// Deterministic rule-check tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Editing-tool name fragments that force a TAMPERED verdict
    pub risky_tools: Vec<String>,

    /// Benign tool name fragments checked before the risky list;
    /// a match skips the tag entirely
    pub safe_tools: Vec<String>,

    /// Tamper score at or above which a suspicious flag is raised
    pub tamper_suspicious_threshold: f32,

    /// Tamper score above which the verdict is forced to SUSPICIOUS
    pub tamper_force_threshold: f32,

    /// Payment evidence older than this many days is rejected as stale
    pub stale_after_days: i64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            risky_tools: default_risky_tools(),
            safe_tools: default_safe_tools(),
            tamper_suspicious_threshold: 40.0,
            tamper_force_threshold: 90.0,
            stale_after_days: 180,
        }
    }
}

/// Manipulation-tool fragments: software that implies editing, not capture.
pub fn default_risky_tools() -> Vec<String> {
    ["photoshop", "gimp", "canva", "paint.net", "inshot", "faceapp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Benign tool fragments: scanners, capture apps and office suites.
pub fn default_safe_tools() -> Vec<String> {
    ["acrobat", "scanner", "capture", "office", "lens"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Scan history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Number of entries returned as recent activity
    pub recent_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { recent_limit: 10 }
    }
}

/// Resolve a secret referenced by environment-variable name.
///
/// Tries the exact name first, then the UPPER_CASE form. Returns `None` when
/// neither is set; a missing secret degrades the dependent component rather
/// than failing startup.
pub fn resolve_secret(key_ref: &str) -> Option<String> {
    std::env::var(key_ref)
        .or_else(|_| std::env::var(key_ref.to_uppercase()))
        .ok()
        .filter(|v| !v.is_empty())
}
