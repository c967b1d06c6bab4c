//! Validate-then-submit orchestration
//!
//! The submitter is the single entry point callers use: it runs the
//! precondition ladder (no network), then hands the normalized payload to the
//! ledger gateway and waits for the confirmation outcome. Fail fast means no
//! partial side effects: a request that fails validation never reaches the
//! chain.

use tracing::{info, instrument};

use crate::domain::{VerificationReceipt, VerificationRequest};
use crate::infra::{Result, VerificationLedger};

/// Submits validated verification requests to a ledger.
pub struct VerificationSubmitter<L: VerificationLedger> {
    ledger: L,
}

impl<L: VerificationLedger> VerificationSubmitter<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    /// Validate the request and record it on the ledger.
    ///
    /// Two phases: submission (transaction accepted into the pending pool)
    /// and confirmation (inclusion in a block). Once the submission is
    /// accepted there is no rollback; later failures are reported, not
    /// undone.
    #[instrument(skip(self, request), fields(report_id = request.report_id))]
    pub async fn submit(&self, request: &VerificationRequest) -> Result<VerificationReceipt> {
        let payload = request.validate()?;

        info!(category = %payload.category, "request validated, submitting to ledger");
        let receipt = self.ledger.record_verification(&payload).await?;

        info!(block_number = receipt.block_number, "verification confirmed");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VerificationPayload;
    use crate::infra::{AnchorError, MockVerificationLedger};

    fn valid_request() -> VerificationRequest {
        VerificationRequest {
            report_id: 1,
            digest: format!("0x{}", "a".repeat(64)),
            category: "Garbage".to_string(),
            model_version: "v1".to_string(),
        }
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_the_ledger() {
        let mut ledger = MockVerificationLedger::new();
        ledger.expect_record_verification().times(0);

        let submitter = VerificationSubmitter::new(ledger);
        let mut request = valid_request();
        request.report_id = -1;

        match submitter.submit(&request).await {
            Err(AnchorError::InvalidInput { field, .. }) => assert_eq!(field, "reportId"),
            other => panic!("expected InvalidInput(reportId), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bad_digest_never_reaches_the_ledger() {
        let mut ledger = MockVerificationLedger::new();
        ledger.expect_record_verification().times(0);

        let submitter = VerificationSubmitter::new(ledger);
        let mut request = valid_request();
        request.digest = format!("0x{}", "Z".repeat(64));

        match submitter.submit(&request).await {
            Err(AnchorError::InvalidInput { field, .. }) => assert_eq!(field, "digest"),
            other => panic!("expected InvalidInput(digest), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn valid_request_is_normalized_before_the_ledger_sees_it() {
        let mut ledger = MockVerificationLedger::new();
        ledger
            .expect_record_verification()
            .times(1)
            .withf(|payload: &VerificationPayload| {
                payload.report_id == 1
                    && payload.digest == [0xaa; 32]
                    && payload.category == "Garbage"
                    && payload.model_version == "v1"
            })
            .returning(|_| {
                Ok(VerificationReceipt {
                    tx_hash: [0x11; 32],
                    block_number: 42,
                })
            });

        let submitter = VerificationSubmitter::new(ledger);
        let receipt = submitter.submit(&valid_request()).await.unwrap();
        assert_eq!(receipt.tx_hash, [0x11; 32]);
        assert_eq!(receipt.block_number, 42);
    }

    #[tokio::test]
    async fn unauthorized_outcome_is_surfaced_as_is() {
        let mut ledger = MockVerificationLedger::new();
        ledger.expect_record_verification().times(1).returning(|_| {
            Err(AnchorError::Unauthorized(
                "execution reverted: Not authorized".to_string(),
            ))
        });

        let submitter = VerificationSubmitter::new(ledger);
        match submitter.submit(&valid_request()).await {
            Err(AnchorError::Unauthorized(message)) => {
                assert!(message.contains("Not authorized"))
            }
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }
}
