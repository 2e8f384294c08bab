//! URL fusion

use super::VerdictDraft;
use crate::oracle::UrlJudgment;
use crate::verdict::{ArtifactKind, EvidenceFlag, Verdict};

/// URLs have no deterministic overrides: reputation, domain age and the
/// rendered page are oracle context, and the oracle's judgment stands.
pub fn fuse_url(judgment: &UrlJudgment) -> Verdict {
    let mut draft = VerdictDraft::from_oracle(
        ArtifactKind::Url,
        &judgment.verdict,
        &judgment.audit_report,
    );

    for indicator in &judgment.risk_indicators {
        if indicator.is_empty() || indicator.eq_ignore_ascii_case("none") {
            continue;
        }
        draft.push_flag(EvidenceFlag::info("risk-indicator", indicator));
    }

    draft.finish()
}
