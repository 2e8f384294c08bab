//! TrustShield - Multi-Signal Fraud Detection Engine
//!
//! TrustShield scans messages, URLs, documents and payment screenshots
//! and answers with a categorical trust verdict, a 0-100 risk score and
//! a list of evidence flags. Every scan blends three signal planes: a
//! semantic oracle judgment, deterministic rule checks over the raw
//! artifact, and external collector lookups.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                         TrustShield API                            │
//! │    /scan    /scan-url    /analyze    /analyze-payment              │
//! │    /safety-report    /overview-stats    /health                    │
//! └──────────────────────────────┬─────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────▼─────────────────────────────────────┐
//! │                            Analyzer                                │
//! │  ┌───────────────┐  ┌────────────────┐  ┌──────────────────────┐   │
//! │  │  Collectors   │  │  Rule Checks   │  │    Oracle            │   │
//! │  │  - reputation │  │  - signatures  │  │  - evidence prompt   │   │
//! │  │  - rendering  │  │  - metadata    │  │  - Gemini REST       │   │
//! │  │  - forensics  │  │  - freshness   │  │  - degrade wrapper   │   │
//! │  └───────┬───────┘  └───────┬────────┘  └──────────┬───────────┘   │
//! │          └──────────────────┼──────────────────────┘               │
//! │                             │                                      │
//! │  ┌──────────────────────────▼──────────────────────────────────┐   │
//! │  │                      Verdict Fusion                         │   │
//! │  │  - fixed per-kind override chains                           │   │
//! │  │  - deterministic findings outrank the oracle                │   │
//! │  │  - flags accumulate, labels get replaced                    │   │
//! │  └──────────────────────────┬──────────────────────────────────┘   │
//! │                             │                                      │
//! │        ┌────────────────────┴───────────────────┐                  │
//! │  ┌─────▼──────────┐                  ┌──────────▼─────────┐        │
//! │  │ Session Context │                  │  History Ledger    │        │
//! │  │ (fraud chains)  │                  │  (overview stats)  │        │
//! │  └─────────────────┘                  └────────────────────┘        │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: scan orchestration per artifact kind
//! - [`api`]: axum HTTP surface and JSON envelopes
//! - [`oracle`]: semantic-verdict trait, Gemini REST client, lenient parsing
//! - [`checks`]: pure deterministic rule checks
//! - [`collectors`]: reputation, rendering and forensics lookups
//! - [`fusion`]: per-kind verdict override chains
//! - [`verdict`]: verdict envelope and label taxonomy
//! - [`session`]: three-slot session context feeding fraud-chain analysis
//! - [`history`]: scan ledger and dashboard statistics
//! - [`config`]: configuration management

pub mod analyzer;
pub mod api;
pub mod checks;
pub mod collectors;
pub mod config;
pub mod error;
pub mod fusion;
pub mod history;
pub mod oracle;
pub mod session;
pub mod verdict;

pub use config::TrustShieldConfig;
pub use error::{Error, Result};
