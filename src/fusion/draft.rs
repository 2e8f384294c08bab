//! Working state threaded through an override chain

use crate::verdict::{ArtifactKind, EvidenceFlag, Verdict, VerdictLabel};

/// Verdict under construction. Rules may replace the label, risk and
/// explanation; accumulated flags are never dropped.
#[derive(Debug, Clone)]
pub struct VerdictDraft {
    kind: ArtifactKind,
    label: VerdictLabel,
    risk_score: u8,
    explanation: String,
    flags: Vec<EvidenceFlag>,
}

impl VerdictDraft {
    /// Seed the draft from the oracle's categorical judgment. The raw
    /// verdict text is parsed through the kind's closed label set; risk
    /// starts at the label's default and can be replaced via
    /// [`with_risk`](Self::with_risk) when the judgment scored itself.
    pub fn from_oracle(
        kind: ArtifactKind,
        raw_verdict: &str,
        explanation: impl Into<String>,
    ) -> Self {
        let label = VerdictLabel::parse_for(kind, raw_verdict);
        Self {
            kind,
            label,
            risk_score: label.default_risk(),
            explanation: explanation.into(),
            flags: Vec::new(),
        }
    }

    pub fn with_risk(mut self, risk: u8) -> Self {
        self.risk_score = risk.min(100);
        self
    }

    pub fn label(&self) -> VerdictLabel {
        self.label
    }

    pub fn risk_score(&self) -> u8 {
        self.risk_score
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Replace label and risk, keeping explanation and flags.
    pub fn force(&mut self, label: VerdictLabel, risk: u8) {
        self.label = label;
        self.risk_score = risk.min(100);
    }

    pub fn set_explanation(&mut self, text: impl Into<String>) {
        self.explanation = text.into();
    }

    /// Append a flag after everything collected so far.
    pub fn push_flag(&mut self, flag: EvidenceFlag) {
        self.flags.push(flag);
    }

    /// Insert a flag at the head: highest-precedence evidence leads.
    pub fn insert_flag(&mut self, flag: EvidenceFlag) {
        self.flags.insert(0, flag);
    }

    /// Insert at the head unless a flag with identical text is already
    /// present (the oracle may have reported the same finding itself).
    pub fn insert_flag_dedup(&mut self, flag: EvidenceFlag) {
        if self.flags.iter().any(|f| f.text == flag.text) {
            return;
        }
        self.flags.insert(0, flag);
    }

    pub fn finish(self) -> Verdict {
        Verdict {
            kind: self.kind,
            label: self.label,
            risk_score: self.risk_score,
            explanation: self.explanation,
            flags: self.flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_from_oracle() {
        let draft = VerdictDraft::from_oracle(ArtifactKind::Message, "safe", "looks fine");
        assert_eq!(draft.label(), VerdictLabel::Safe);
        assert_eq!(draft.risk_score(), 0);
        assert_eq!(draft.explanation(), "looks fine");
    }

    #[test]
    fn test_out_of_set_seed_is_unknown() {
        let draft = VerdictDraft::from_oracle(ArtifactKind::Message, "TAMPERED", "");
        assert_eq!(draft.label(), VerdictLabel::Unknown);
        assert_eq!(draft.risk_score(), 0);
    }

    #[test]
    fn test_force_keeps_flags() {
        let mut draft = VerdictDraft::from_oracle(ArtifactKind::Payment, "SAFE", "ok");
        draft.push_flag(EvidenceFlag::info("oracle", "clean layout"));
        draft.force(VerdictLabel::Fake, 100);

        let verdict = draft.finish();
        assert_eq!(verdict.label, VerdictLabel::Fake);
        assert_eq!(verdict.risk_score, 100);
        assert_eq!(verdict.flags.len(), 1);
        assert_eq!(verdict.explanation, "ok");
    }

    #[test]
    fn test_insert_precedes_push() {
        let mut draft = VerdictDraft::from_oracle(ArtifactKind::Payment, "SAFE", "");
        draft.push_flag(EvidenceFlag::info("oracle", "first"));
        draft.push_flag(EvidenceFlag::info("oracle", "second"));
        draft.insert_flag(EvidenceFlag::critical("future-date", "leads"));

        let verdict = draft.finish();
        assert_eq!(verdict.flags[0].text, "leads");
        assert_eq!(verdict.flags[1].text, "first");
        assert_eq!(verdict.flags[2].text, "second");
    }

    #[test]
    fn test_insert_dedup_by_text() {
        let mut draft = VerdictDraft::from_oracle(ArtifactKind::Payment, "SAFE", "");
        draft.push_flag(EvidenceFlag::info("oracle", "CRITICAL: duplicate finding"));
        draft.insert_flag_dedup(EvidenceFlag::critical(
            "stale-date",
            "CRITICAL: duplicate finding",
        ));
        assert_eq!(draft.finish().flags.len(), 1);
    }

    #[test]
    fn test_risk_clamped() {
        let mut draft = VerdictDraft::from_oracle(ArtifactKind::Payment, "SAFE", "").with_risk(250);
        assert_eq!(draft.risk_score(), 100);
        draft.force(VerdictLabel::Fake, 200);
        assert_eq!(draft.risk_score(), 100);
    }
}
