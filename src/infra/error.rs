//! Error types for verification submission
//!
//! Every failure carries the underlying remote diagnostic alongside its
//! classified kind; nothing is silently swallowed, and no unclassified error
//! crosses the module boundary.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while validating or submitting a verification
#[derive(Error, Debug)]
pub enum AnchorError {
    /// Caller-supplied field failed format/range validation. Detected before
    /// any network activity; never retried.
    #[error("invalid input: {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// Missing or malformed process configuration (contract address, signer
    /// credential). Fatal to the invocation; needs operator intervention.
    #[error("configuration error: {field}: {reason}")]
    Configuration {
        field: &'static str,
        reason: String,
    },

    /// The ledger rejected the call because the signer is not the contract
    /// owner. An expected access-control outcome, not a system bug.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Network/connection failure reaching the RPC endpoint. Retryable by
    /// the caller with backoff.
    #[error("remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// Submission accepted but confirmation not observed within the bounded
    /// wait. The transaction may still be included later.
    #[error("confirmation not observed within {0:?}")]
    Timeout(Duration),

    /// Classification service returned a non-2xx status or a malformed body.
    #[error("classification error: {0}")]
    Classification(String),

    /// Anything else, raw remote diagnostic preserved for operators.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

/// Result type for verification operations
pub type Result<T> = std::result::Result<T, AnchorError>;
