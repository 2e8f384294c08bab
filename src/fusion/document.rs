//! Document fusion: signature, metadata and tamper-score overrides

use super::VerdictDraft;
use crate::checks::{MetadataFinding, SignatureHit, TamperAssessment};
use crate::oracle::DocumentJudgment;
use crate::verdict::{ArtifactKind, EvidenceFlag, Verdict, VerdictLabel};

/// Deterministic check outputs for one document scan.
#[derive(Debug, Clone)]
pub struct DocumentSignals {
    pub signature: Option<SignatureHit>,
    pub metadata: MetadataFinding,
    pub tamper: Option<TamperAssessment>,
}

impl Default for DocumentSignals {
    fn default() -> Self {
        Self {
            signature: None,
            // No forensics at all means the metadata was never read.
            metadata: MetadataFinding::Unreadable,
            tamper: None,
        }
    }
}

type DocumentRule = fn(&DocumentSignals, &DocumentJudgment, &mut VerdictDraft);

/// Override chain in evaluation order. A signature match is absolute and
/// shadows the metadata rule; the tamper rules and the unreadable-metadata
/// rule are additive.
const DOCUMENT_RULES: [(&str, DocumentRule); 5] = [
    ("signature-match", signature_match),
    ("metadata-critical", metadata_critical),
    ("tamper-extreme", tamper_extreme),
    ("tamper-elevated", tamper_elevated),
    ("metadata-unreadable", metadata_unreadable),
];

pub fn fuse_document(judgment: &DocumentJudgment, signals: &DocumentSignals) -> Verdict {
    let mut draft = VerdictDraft::from_oracle(
        ArtifactKind::Document,
        &judgment.verdict,
        &judgment.primary_evidence,
    );
    for detail in &judgment.technical_details {
        draft.push_flag(EvidenceFlag::info("oracle", detail));
    }

    for (name, rule) in DOCUMENT_RULES {
        let before = draft.label();
        rule(signals, judgment, &mut draft);
        if draft.label() != before {
            tracing::debug!(rule = name, label = %draft.label(), "document override fired");
        }
    }

    draft.finish()
}

fn signature_match(signals: &DocumentSignals, _judgment: &DocumentJudgment, draft: &mut VerdictDraft) {
    if let Some(hit) = &signals.signature {
        draft.force(VerdictLabel::Malicious, 100);
        draft.set_explanation(hit.description.clone());
        draft.insert_flag(EvidenceFlag::critical("signature-match", &hit.description));
    }
}

fn metadata_critical(signals: &DocumentSignals, _judgment: &DocumentJudgment, draft: &mut VerdictDraft) {
    // Shadowed by a signature match.
    if signals.signature.is_some() || !signals.metadata.is_critical() {
        return;
    }
    let status = signals.metadata.status_line();
    draft.force(VerdictLabel::Tampered, VerdictLabel::Tampered.default_risk());
    draft.set_explanation(format!("Metadata confirms editing: {}", status));
    draft.insert_flag(EvidenceFlag::critical("metadata-critical", status));
}

fn tamper_extreme(signals: &DocumentSignals, judgment: &DocumentJudgment, draft: &mut VerdictDraft) {
    let Some(tamper) = signals.tamper else {
        return;
    };
    let already_tampered = judgment.is_tampered
        || matches!(
            draft.label(),
            VerdictLabel::Tampered | VerdictLabel::Malicious
        );
    if tamper.extreme && !already_tampered {
        draft.force(
            VerdictLabel::Suspicious,
            VerdictLabel::Suspicious.default_risk(),
        );
        draft.set_explanation(
            "High error-level analysis score indicates pixel manipulation.",
        );
        draft.push_flag(EvidenceFlag::high(
            "tamper-extreme",
            format!("Recompression difference {:.0}/100.", tamper.score),
        ));
    }
}

fn tamper_elevated(signals: &DocumentSignals, _judgment: &DocumentJudgment, draft: &mut VerdictDraft) {
    let Some(tamper) = signals.tamper else {
        return;
    };
    if tamper.suspicious && !tamper.extreme {
        draft.push_flag(EvidenceFlag::warning(
            "tamper-elevated",
            format!("Elevated recompression difference {:.0}/100.", tamper.score),
        ));
    }
}

fn metadata_unreadable(signals: &DocumentSignals, _judgment: &DocumentJudgment, draft: &mut VerdictDraft) {
    if signals.metadata == MetadataFinding::Unreadable {
        draft.push_flag(EvidenceFlag::warning(
            "metadata-unreadable",
            "Image metadata could not be read (stripped or corrupt file).",
        ));
    }
}
