//! Payment fusion: date freshness, transaction-id and QR overrides

use super::VerdictDraft;
use crate::checks::{DateFinding, QrFinding};
use crate::oracle::PaymentJudgment;
use crate::verdict::{ArtifactKind, EvidenceFlag, Verdict, VerdictLabel};
use chrono::Datelike;

/// Deterministic check outputs for one payment scan.
#[derive(Debug, Clone, Default)]
pub struct PaymentSignals {
    /// Freshness of the date the oracle read off the screenshot
    pub date: Option<DateFinding>,
    /// 12-digit transaction id found in the OCR text; absent OCR counts
    /// as absent id
    pub transaction_id: Option<String>,
    /// Decoded QR payload classification
    pub qr: Option<QrFinding>,
}

type PaymentRule = fn(&PaymentSignals, &PaymentJudgment, &mut VerdictDraft);

/// Override chain in evaluation order. The two date rules both run
/// unconditionally; the id rule only downgrades a SAFE verdict; the QR
/// rules add flags without touching the category.
const PAYMENT_RULES: [(&str, PaymentRule); 5] = [
    ("future-date", future_date),
    ("stale-date", stale_date),
    ("txn-id-missing", txn_id_missing),
    ("qr-fixed-amount", qr_fixed_amount),
    ("qr-web-link", qr_web_link),
];

pub fn fuse_payment(judgment: &PaymentJudgment, signals: &PaymentSignals) -> Verdict {
    let mut draft = VerdictDraft::from_oracle(
        ArtifactKind::Payment,
        &judgment.verdict,
        &judgment.verdict_explanation,
    )
    .with_risk(judgment.risk_score);
    for flag in &judgment.forensic_flags {
        draft.push_flag(EvidenceFlag::info("oracle", flag));
    }

    for (name, rule) in PAYMENT_RULES {
        let before = draft.label();
        rule(signals, judgment, &mut draft);
        if draft.label() != before {
            tracing::debug!(rule = name, label = %draft.label(), "payment override fired");
        }
    }

    draft.finish()
}

/// Verdict for a payment claim with no screenshot attached.
pub fn text_only_payment() -> Verdict {
    Verdict::new(
        ArtifactKind::Payment,
        VerdictLabel::Caution,
        50,
        "Text-only analysis is limited.",
    )
}

fn future_date(signals: &PaymentSignals, judgment: &PaymentJudgment, draft: &mut VerdictDraft) {
    let Some(date) = signals.date else {
        return;
    };
    if date.is_future {
        draft.force(VerdictLabel::Fake, 100);
        draft.insert_flag(EvidenceFlag::critical(
            "future-date",
            format!(
                "CRITICAL: Future Date '{}' Detected.",
                judgment.extracted_details.date_found
            ),
        ));
    }
}

fn stale_date(signals: &PaymentSignals, _judgment: &PaymentJudgment, draft: &mut VerdictDraft) {
    let Some(date) = signals.date else {
        return;
    };
    if date.is_stale {
        let message = format!(
            "CRITICAL: Screenshot is OUTDATED ({}). Valid proofs must be recent.",
            date.parsed.year()
        );
        draft.force(VerdictLabel::Fake, 85);
        draft.insert_flag_dedup(EvidenceFlag::critical("stale-date", message.clone()));
        draft.set_explanation(message);
    }
}

fn txn_id_missing(signals: &PaymentSignals, _judgment: &PaymentJudgment, draft: &mut VerdictDraft) {
    if draft.label() == VerdictLabel::Safe && signals.transaction_id.is_none() {
        draft.force(VerdictLabel::Suspicious, 60);
        draft.push_flag(EvidenceFlag::warning(
            "txn-id-missing",
            "Warning: Standard 12-digit UPI ID not found.",
        ));
    }
}

fn qr_fixed_amount(signals: &PaymentSignals, _judgment: &PaymentJudgment, draft: &mut VerdictDraft) {
    if let Some(qr) = &signals.qr {
        if qr.fixed_amount {
            draft.push_flag(EvidenceFlag::high(
                "qr-fixed-amount",
                "QR encodes a hardcoded payment amount. Scanning it deducts money, it does not receive it.",
            ));
        }
    }
}

fn qr_web_link(signals: &PaymentSignals, _judgment: &PaymentJudgment, draft: &mut VerdictDraft) {
    if let Some(qr) = &signals.qr {
        if qr.web_link {
            draft.push_flag(EvidenceFlag::high(
                "qr-web-link",
                "QR links to a website, not a UPI app. Phishing risk.",
            ));
        }
    }
}
