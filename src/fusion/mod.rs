//! Verdict fusion: ordered override chains per artifact kind
//!
//! Fusion is a pure function of (deterministic check outputs, parsed
//! oracle judgment). Each artifact kind has a fixed chain of named rules;
//! a rule may replace the draft's label, risk and explanation, but flags
//! only ever accumulate.

mod document;
mod draft;
mod message;
mod payment;
mod url;

pub use document::{fuse_document, DocumentSignals};
pub use draft::VerdictDraft;
pub use message::fuse_message;
pub use payment::{fuse_payment, text_only_payment, PaymentSignals};
pub use url::fuse_url;
