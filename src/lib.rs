//! Civic Anchor Library
//!
//! Records a tamper-evident content digest for a citizen-submitted report on
//! an EVM ledger contract and waits for durable inclusion.
//!
//! ## Modules
//!
//! - [`domain`] - Core domain types (report records, verification payloads)
//! - [`crypto`] - Deterministic report digest computation
//! - [`infra`] - Error taxonomy and the ledger trait seam
//! - [`anchor`] - Ledger gateway (signing, submission, confirmation)
//! - [`submit`] - Validate-then-submit orchestration
//! - [`classify`] - Client for the external AI classification service
//! - [`telemetry`] - Logging setup

pub mod anchor;
pub mod classify;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod submit;
pub mod telemetry;

// Re-export commonly used types
pub use crypto::{compute_report_digest, format_digest, parse_digest, Hash256};
pub use domain::{
    clean_label, Classification, ReportRecord, VerificationPayload, VerificationReceipt,
    VerificationRequest,
};
pub use infra::{AnchorError, Result, VerificationLedger};
pub use submit::VerificationSubmitter;
