//! Trait seam between validation and the chain

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::{VerificationPayload, VerificationReceipt};

use super::Result;

/// A ledger that can durably record report verifications.
///
/// The production implementation signs and submits one contract call per
/// payload and blocks until inclusion. Implementations must not retry: the
/// remote contract recognizes no idempotency key, so a blind retry records a
/// duplicate entry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VerificationLedger: Send + Sync {
    /// Submit `recordVerification` as the configured signer and wait for the
    /// transaction to be included in a block.
    async fn record_verification(
        &self,
        payload: &VerificationPayload,
    ) -> Result<VerificationReceipt>;

    /// The contract's designated administrator, as a checksummed address
    /// string. Diagnostic only; the access-control rule itself is enforced
    /// by the contract.
    async fn owner(&self) -> Result<String>;
}
