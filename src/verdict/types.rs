//! Verdict wire types
//!
//! All types use camelCase JSON serialization; verdict labels travel as
//! upper-case strings (`"SAFE"`, `"TAMPERED"`, ...).

use serde::{Deserialize, Serialize};

/// Artifact kind under analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    Message,
    #[serde(rename = "URL")]
    Url,
    Document,
    Payment,
}

impl ArtifactKind {
    /// Labels an oracle may legally assign for this artifact kind.
    ///
    /// `Error` and `Unknown` are universal fallbacks and always allowed.
    pub fn allowed_labels(&self) -> &'static [VerdictLabel] {
        match self {
            Self::Message => &[
                VerdictLabel::Safe,
                VerdictLabel::Spam,
                VerdictLabel::Suspicious,
                VerdictLabel::Malicious,
            ],
            Self::Url => &[
                VerdictLabel::Safe,
                VerdictLabel::Suspicious,
                VerdictLabel::Phishing,
            ],
            Self::Document => &[
                VerdictLabel::Legit,
                VerdictLabel::Suspicious,
                VerdictLabel::Tampered,
                VerdictLabel::Malicious,
            ],
            Self::Payment => &[
                VerdictLabel::Safe,
                VerdictLabel::Caution,
                VerdictLabel::Suspicious,
                VerdictLabel::Fake,
            ],
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message => write!(f, "Message"),
            Self::Url => write!(f, "URL"),
            Self::Document => write!(f, "Document"),
            Self::Payment => write!(f, "Payment"),
        }
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Message" => Ok(Self::Message),
            "URL" => Ok(Self::Url),
            "Document" => Ok(Self::Document),
            "Payment" => Ok(Self::Payment),
            other => Err(format!("unknown artifact kind: {}", other)),
        }
    }
}

/// Final verdict category
///
/// One closed enum covers every artifact kind; `ArtifactKind::allowed_labels`
/// restricts which values an oracle response may map to. `Error` and
/// `Unknown` are the universal fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictLabel {
    Safe,
    Legit,
    Caution,
    Suspicious,
    Spam,
    Phishing,
    Tampered,
    Fake,
    Malicious,
    Error,
    Unknown,
}

impl VerdictLabel {
    /// Every label, for totality checks and bucket iteration.
    pub const ALL: [VerdictLabel; 11] = [
        Self::Safe,
        Self::Legit,
        Self::Caution,
        Self::Suspicious,
        Self::Spam,
        Self::Phishing,
        Self::Tampered,
        Self::Fake,
        Self::Malicious,
        Self::Error,
        Self::Unknown,
    ];

    /// Total mapping into the reporting buckets.
    pub fn bucket(&self) -> ThreatBucket {
        match self {
            Self::Malicious | Self::Tampered | Self::Fake | Self::Spam | Self::Phishing => {
                ThreatBucket::Threat
            }
            Self::Suspicious | Self::Caution => ThreatBucket::Caution,
            Self::Safe | Self::Legit => ThreatBucket::Safe,
            Self::Error | Self::Unknown => ThreatBucket::Unscored,
        }
    }

    /// Risk score implied by the label alone, for judgments that carry
    /// no numeric score of their own. Anchored on the scores the payment
    /// override rules pin (caution 50, suspicious 60, stale fake 85,
    /// forced failures 100).
    pub fn default_risk(&self) -> u8 {
        match self {
            Self::Safe | Self::Legit => 0,
            Self::Caution => 50,
            Self::Suspicious => 60,
            Self::Spam => 70,
            Self::Phishing | Self::Tampered | Self::Fake => 85,
            Self::Malicious => 100,
            Self::Error | Self::Unknown => 0,
        }
    }

    /// Parse oracle text into a label legal for `kind`.
    ///
    /// Trims and upper-cases before matching; anything unrecognised or
    /// outside the kind's closed set collapses to `Unknown`.
    pub fn parse_for(kind: ArtifactKind, raw: &str) -> VerdictLabel {
        let label = match raw.trim().to_uppercase().parse::<VerdictLabel>() {
            Ok(label) => label,
            Err(_) => return Self::Unknown,
        };
        if label == Self::Error
            || label == Self::Unknown
            || kind.allowed_labels().contains(&label)
        {
            label
        } else {
            Self::Unknown
        }
    }
}

impl std::fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Legit => write!(f, "LEGIT"),
            Self::Caution => write!(f, "CAUTION"),
            Self::Suspicious => write!(f, "SUSPICIOUS"),
            Self::Spam => write!(f, "SPAM"),
            Self::Phishing => write!(f, "PHISHING"),
            Self::Tampered => write!(f, "TAMPERED"),
            Self::Fake => write!(f, "FAKE"),
            Self::Malicious => write!(f, "MALICIOUS"),
            Self::Error => write!(f, "ERROR"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl std::str::FromStr for VerdictLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SAFE" => Ok(Self::Safe),
            "LEGIT" => Ok(Self::Legit),
            "CAUTION" => Ok(Self::Caution),
            "SUSPICIOUS" => Ok(Self::Suspicious),
            "SPAM" => Ok(Self::Spam),
            "PHISHING" => Ok(Self::Phishing),
            "TAMPERED" => Ok(Self::Tampered),
            "FAKE" => Ok(Self::Fake),
            "MALICIOUS" => Ok(Self::Malicious),
            "ERROR" => Ok(Self::Error),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(format!("unknown verdict label: {}", other)),
        }
    }
}

/// Reporting bucket for a verdict label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatBucket {
    /// Confirmed threats (malicious, tampered, fake, spam, phishing)
    Threat,
    /// Needs attention but unconfirmed (suspicious, caution)
    Caution,
    /// Cleared (safe, legit)
    Safe,
    /// Error/unknown outcomes; counted in totals but in no report bucket
    Unscored,
}

/// Severity of a single evidence flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagSeverity {
    Info,
    Warning,
    High,
    Critical,
}

impl std::fmt::Display for FlagSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// One piece of evidence attached to a verdict
///
/// `kind` is a stable machine tag (`"metadata-critical"`, `"future-date"`,
/// ...); `text` is the human-readable finding. Flag order in a verdict
/// reflects override precedence, not discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceFlag {
    pub kind: String,
    pub severity: FlagSeverity,
    pub text: String,
}

impl EvidenceFlag {
    pub fn new(
        kind: impl Into<String>,
        severity: FlagSeverity,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            severity,
            text: text.into(),
        }
    }

    pub fn critical(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(kind, FlagSeverity::Critical, text)
    }

    pub fn high(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(kind, FlagSeverity::High, text)
    }

    pub fn warning(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(kind, FlagSeverity::Warning, text)
    }

    pub fn info(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(kind, FlagSeverity::Info, text)
    }
}

/// Final verdict envelope for one artifact
///
/// Every externally observable analysis result is one of these, even on
/// total internal failure (the label is then `Error`, never absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub kind: ArtifactKind,
    pub label: VerdictLabel,
    pub risk_score: u8,
    pub explanation: String,
    pub flags: Vec<EvidenceFlag>,
}

impl Verdict {
    pub fn new(
        kind: ArtifactKind,
        label: VerdictLabel,
        risk_score: u8,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            label,
            risk_score: risk_score.min(100),
            explanation: explanation.into(),
            flags: Vec::new(),
        }
    }

    /// Well-formed error envelope for a failed analysis.
    pub fn error(kind: ArtifactKind, explanation: impl Into<String>) -> Self {
        Self::new(kind, VerdictLabel::Error, 0, explanation)
    }

    pub fn bucket(&self) -> ThreatBucket {
        self.label.bucket()
    }

    pub fn is_threat(&self) -> bool {
        self.bucket() == ThreatBucket::Threat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_display_round_trip() {
        for label in VerdictLabel::ALL {
            let parsed: VerdictLabel = label.to_string().parse().unwrap();
            assert_eq!(parsed, label);
        }
        assert!("HARMLESS".parse::<VerdictLabel>().is_err());
    }

    #[test]
    fn test_bucket_is_total() {
        let mut threat = 0;
        let mut caution = 0;
        let mut safe = 0;
        let mut unscored = 0;
        for label in VerdictLabel::ALL {
            match label.bucket() {
                ThreatBucket::Threat => threat += 1,
                ThreatBucket::Caution => caution += 1,
                ThreatBucket::Safe => safe += 1,
                ThreatBucket::Unscored => unscored += 1,
            }
        }
        assert_eq!(threat + caution + safe + unscored, VerdictLabel::ALL.len());
        assert_eq!(threat, 5);
        assert_eq!(caution, 2);
        assert_eq!(safe, 2);
        assert_eq!(unscored, 2);
    }

    #[test]
    fn test_parse_for_respects_closed_sets() {
        assert_eq!(
            VerdictLabel::parse_for(ArtifactKind::Message, "safe"),
            VerdictLabel::Safe
        );
        assert_eq!(
            VerdictLabel::parse_for(ArtifactKind::Message, " MALICIOUS "),
            VerdictLabel::Malicious
        );
        // PHISHING is a URL label, not a message label
        assert_eq!(
            VerdictLabel::parse_for(ArtifactKind::Message, "PHISHING"),
            VerdictLabel::Unknown
        );
        assert_eq!(
            VerdictLabel::parse_for(ArtifactKind::Url, "PHISHING"),
            VerdictLabel::Phishing
        );
        assert_eq!(
            VerdictLabel::parse_for(ArtifactKind::Document, "TAMPERED"),
            VerdictLabel::Tampered
        );
        assert_eq!(
            VerdictLabel::parse_for(ArtifactKind::Payment, "FAKE"),
            VerdictLabel::Fake
        );
        // universal fallbacks pass through for every kind
        assert_eq!(
            VerdictLabel::parse_for(ArtifactKind::Payment, "ERROR"),
            VerdictLabel::Error
        );
        assert_eq!(
            VerdictLabel::parse_for(ArtifactKind::Url, "gibberish"),
            VerdictLabel::Unknown
        );
    }

    #[test]
    fn test_default_risk_monotone_with_bucket() {
        for label in VerdictLabel::ALL {
            let risk = label.default_risk();
            match label.bucket() {
                ThreatBucket::Threat => assert!(risk >= 70, "{label} risk {risk}"),
                ThreatBucket::Caution => assert!((50..70).contains(&risk), "{label} risk {risk}"),
                ThreatBucket::Safe | ThreatBucket::Unscored => assert_eq!(risk, 0),
            }
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(FlagSeverity::Critical > FlagSeverity::High);
        assert!(FlagSeverity::High > FlagSeverity::Warning);
        assert!(FlagSeverity::Warning > FlagSeverity::Info);
    }

    #[test]
    fn test_verdict_risk_clamped() {
        let verdict = Verdict::new(ArtifactKind::Payment, VerdictLabel::Fake, 255, "x");
        assert_eq!(verdict.risk_score, 100);
    }

    #[test]
    fn test_verdict_serialization() {
        let mut verdict = Verdict::new(
            ArtifactKind::Document,
            VerdictLabel::Tampered,
            85,
            "Metadata confirms editing",
        );
        verdict.flags.push(EvidenceFlag::critical(
            "metadata-critical",
            "Metadata indicates editing software ('Photoshop 2024').",
        ));

        let json = serde_json::to_string(&verdict).unwrap();
        assert!(json.contains("\"kind\":\"Document\""));
        assert!(json.contains("\"label\":\"TAMPERED\""));
        assert!(json.contains("\"riskScore\":85"));
        assert!(json.contains("\"severity\":\"critical\""));

        let parsed: Verdict = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.label, VerdictLabel::Tampered);
        assert_eq!(parsed.flags.len(), 1);
    }

    #[test]
    fn test_error_envelope_always_has_label() {
        let verdict = Verdict::error(ArtifactKind::Url, "oracle unreachable");
        assert_eq!(verdict.label, VerdictLabel::Error);
        assert_eq!(verdict.risk_score, 0);
        let json = serde_json::to_string(&verdict).unwrap();
        assert!(json.contains("\"label\":\"ERROR\""));
    }
}
