//! Message fusion

use super::VerdictDraft;
use crate::oracle::MessageJudgment;
use crate::verdict::{ArtifactKind, EvidenceFlag, Verdict};

/// Messages have no deterministic overrides: the oracle's categorical
/// judgment is the verdict. Classifier signals travel to the oracle as
/// context and never touch the category here.
pub fn fuse_message(judgment: &MessageJudgment) -> Verdict {
    let mut draft = VerdictDraft::from_oracle(
        ArtifactKind::Message,
        &judgment.verdict,
        &judgment.explanation,
    );

    if is_informative(&judgment.fraud_category) {
        draft.push_flag(EvidenceFlag::info(
            "fraud-category",
            format!("Fraud category: {}", judgment.fraud_category),
        ));
    }
    if is_informative(&judgment.action_needed) {
        draft.push_flag(EvidenceFlag::info(
            "action-needed",
            format!("Recommended action: {}", judgment.action_needed),
        ));
    }

    draft.finish()
}

fn is_informative(field: &str) -> bool {
    !field.is_empty() && !field.eq_ignore_ascii_case("none")
}
