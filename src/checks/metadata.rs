//! Editing-software metadata heuristic
//!
//! Inspects `Software` metadata tags for manipulation-tool names. The
//! allowlist is evaluated before the denylist per tag value: a value
//! matching a benign fragment is skipped entirely, even if a risky fragment
//! is also present (first-match-wins).

use serde::{Deserialize, Serialize};

/// One extracted metadata tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataTag {
    pub name: String,
    pub value: String,
}

impl MetadataTag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Outcome of the metadata heuristic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataFinding {
    /// No editor signatures found
    Clean,
    /// Metadata could not be read (stripped or corrupt file)
    Unreadable,
    /// A manipulation tool signed the file; carries the raw tag value
    Critical { software: String },
}

impl MetadataFinding {
    /// Status line in the shape the oracle prompt and the forensics block
    /// expect.
    pub fn status_line(&self) -> String {
        match self {
            Self::Clean => "Clean (No editor signatures)".to_string(),
            Self::Unreadable => "Unreadable (Stripped)".to_string(),
            Self::Critical { software } => format!(
                "CRITICAL: Metadata indicates editing software ('{}').",
                software
            ),
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical { .. })
    }
}

/// Evaluate metadata tags against the tool fragment lists.
///
/// `tags = None` means the extractor could not read the file at all, which
/// surfaces as `Unreadable` (fail-closed: the caller turns it into a warning
/// flag rather than silence). Only `Software` tags are considered.
pub fn evaluate_metadata(
    tags: Option<&[MetadataTag]>,
    safe_tools: &[String],
    risky_tools: &[String],
) -> MetadataFinding {
    let tags = match tags {
        Some(tags) => tags,
        None => return MetadataFinding::Unreadable,
    };

    for tag in tags {
        if !tag.name.eq_ignore_ascii_case("software") {
            continue;
        }
        let value_lower = tag.value.to_lowercase();

        // Allowlist first: a benign fragment skips the tag outright.
        if safe_tools.iter().any(|safe| value_lower.contains(safe)) {
            continue;
        }

        if risky_tools.iter().any(|tool| value_lower.contains(tool)) {
            return MetadataFinding::Critical {
                software: tag.value.clone(),
            };
        }
    }

    MetadataFinding::Clean
}
