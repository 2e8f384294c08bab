//! TrustShield error types
//!
//! Collectors, fusion, and the in-memory stores degrade to sentinel
//! values instead of erroring, so the failure sources here are bad
//! input and the oracle path.

use thiserror::Error;

/// TrustShield error type
#[derive(Error, Debug)]
pub enum Error {
    /// Request rejected before any analysis ran
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Oracle error
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for TrustShield operations
pub type Result<T> = std::result::Result<T, Error>;
