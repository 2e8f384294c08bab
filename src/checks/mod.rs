//! Deterministic rule checks
//!
//! Pure functions over raw artifact content. None of these call the oracle
//! or the network; each returns either "no signal" (`None` / a clean
//! finding) or a typed finding the fusion engine turns into an override or
//! an evidence flag.

mod freshness;
mod metadata;
mod qr;
mod signature;
mod tamper;
mod txn;

pub use freshness::{parse_loose_date, DateFinding};
pub use metadata::{MetadataFinding, MetadataTag};
pub use qr::QrFinding;
pub use signature::SignatureHit;
pub use tamper::TamperAssessment;
pub use txn::find_transaction_id;

pub use freshness::evaluate_freshness;
pub use metadata::evaluate_metadata;
pub use qr::classify_qr_payload;
pub use signature::scan_signatures;
pub use tamper::assess_tamper_score;
