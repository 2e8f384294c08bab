//! Verdict data model
//!
//! Closed verdict categories per artifact kind, threat bucketing for
//! reporting, and the evidence-flag envelope every scan returns.

mod types;

pub use types::{
    ArtifactKind, EvidenceFlag, FlagSeverity, ThreatBucket, Verdict, VerdictLabel,
};
