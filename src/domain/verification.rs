//! Verification request validation and receipts

use serde::{Deserialize, Serialize};

use crate::crypto::{parse_digest, Hash256};
use crate::domain::report::{clean_label, MAX_LABEL_LEN};
use crate::infra::{AnchorError, Result};

/// Fallback label when the classifier did not report a model version.
pub const DEFAULT_MODEL_VERSION: &str = "v1";

/// Raw caller input for a verification submission.
///
/// `report_id` is signed so that out-of-range caller values fail validation
/// instead of being coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub report_id: i64,
    pub digest: String,
    pub category: String,
    pub model_version: String,
}

impl VerificationRequest {
    /// Validate and normalize the request. Checks run in a fixed order and
    /// the first failure wins; nothing here touches the network.
    ///
    /// 1. `report_id` must be non-negative.
    /// 2. `digest` must be `0x` + 64 hex characters.
    /// 3. `category` must be non-empty after label cleaning.
    /// 4. `model_version` falls back to [`DEFAULT_MODEL_VERSION`] when empty.
    pub fn validate(&self) -> Result<VerificationPayload> {
        let report_id: u64 = self.report_id.try_into().map_err(|_| AnchorError::InvalidInput {
            field: "reportId",
            reason: format!("must be a non-negative integer, got {}", self.report_id),
        })?;

        let digest = parse_digest(&self.digest).ok_or_else(|| AnchorError::InvalidInput {
            field: "digest",
            reason: format!("must be 0x + 64 hex chars, got {:?}", self.digest),
        })?;

        let category = clean_label(&self.category, MAX_LABEL_LEN);
        if category.is_empty() {
            return Err(AnchorError::InvalidInput {
                field: "category",
                reason: "must be non-empty after sanitization".to_string(),
            });
        }

        let model_version = match clean_label(&self.model_version, MAX_LABEL_LEN) {
            v if v.is_empty() => DEFAULT_MODEL_VERSION.to_string(),
            v => v,
        };

        Ok(VerificationPayload {
            report_id,
            digest,
            category,
            model_version,
        })
    }
}

/// A validated, normalized payload ready for the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationPayload {
    pub report_id: u64,
    pub digest: Hash256,
    pub category: String,
    pub model_version: String,
}

/// Proof of durable inclusion, created only after the ledger confirms the
/// transaction. Never mutated; persisted by the external storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReceipt {
    /// 32-byte transaction hash uniquely naming the submitted transaction.
    #[serde(with = "tx_hash_hex")]
    pub tx_hash: Hash256,
    /// Block height at which the transaction was included.
    pub block_number: u64,
}

/// Serde module rendering the transaction hash as `0x`-prefixed hex.
mod tx_hash_hex {
    use serde::{self, Deserialize, Deserializer, Serializer};

    use crate::crypto::{format_digest, parse_digest};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_digest(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_digest(&s).ok_or_else(|| serde::de::Error::custom("expected 0x + 64 hex chars"))
    }
}
