//! On-chain verification gateway
//!
//! Signs and submits `recordVerification` calls to the Verification contract
//! and waits for inclusion. One transaction per payload, no retry: the
//! contract recognizes no idempotency key, so a blind retry after a timeout
//! records a duplicate entry.

use std::future::IntoFuture;
use std::str::FromStr;
use std::time::Duration;

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, FixedBytes, U256};
use alloy::providers::ProviderBuilder;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::{VerificationPayload, VerificationReceipt};
use crate::infra::{AnchorError, Result, VerificationLedger};

// Contract bindings. The entry point signature and the owner-only access
// rule are owned by the deployed contract; both are fixed from our side.
sol! {
    #[sol(rpc)]
    interface IVerification {
        function recordVerification(
            uint256 reportId,
            bytes32 dataHash,
            string category,
            string modelVersion
        ) external;

        function owner() external view returns (address);
    }
}

/// Default bound on the confirmation wait.
const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 60;

/// Default bound on each pre-confirmation RPC phase.
const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;

/// Anchor gateway configuration
///
/// The signer credential is process-wide configuration owned by the
/// deployment environment. It is never taken from caller input, never
/// persisted and never logged.
#[derive(Debug, Clone)]
pub struct AnchorConfig {
    /// RPC URL for the ledger endpoint
    pub rpc_url: String,
    /// Verification contract address
    pub contract_address: String,
    /// Private key for signing transactions (`0x` + 64 hex chars)
    pub private_key: String,
    /// Bound on each pre-confirmation RPC phase (owner read, submit)
    pub rpc_timeout: Duration,
    /// Bound on the wait for block inclusion
    pub confirm_timeout: Duration,
}

impl AnchorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_signer(require_env("BLOCKCHAIN_OWNER_PK", "credential")?)
    }

    /// Same as [`AnchorConfig::from_env`] but with the signer key supplied
    /// by the caller (the CLI routes its debug-only development fallback
    /// through here).
    pub fn from_env_with_signer(private_key: String) -> Result<Self> {
        Ok(Self {
            rpc_url: require_env("ANCHOR_RPC_URL", "rpcUrl")?,
            contract_address: require_env("VERIFICATION_CONTRACT_ADDRESS", "contractAddress")?,
            private_key,
            rpc_timeout: env_duration_secs("ANCHOR_RPC_TIMEOUT_SECS", DEFAULT_RPC_TIMEOUT_SECS),
            confirm_timeout: env_duration_secs(
                "ANCHOR_CONFIRM_TIMEOUT_SECS",
                DEFAULT_CONFIRM_TIMEOUT_SECS,
            ),
        })
    }
}

fn require_env(var: &str, field: &'static str) -> Result<String> {
    std::env::var(var).map_err(|_| AnchorError::Configuration {
        field,
        reason: format!("missing environment variable {var}"),
    })
}

fn env_duration_secs(var: &str, default_secs: u64) -> Duration {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(default_secs))
}

/// On-chain anchor service
pub struct AnchorService {
    config: AnchorConfig,
}

impl AnchorService {
    pub fn new(config: AnchorConfig) -> Self {
        Self { config }
    }

    /// Syntactic check of the contract address. Runs before any connection
    /// is established.
    fn parse_contract_address(&self) -> Result<Address> {
        Address::from_str(self.config.contract_address.trim()).map_err(|e| {
            AnchorError::Configuration {
                field: "contractAddress",
                reason: format!("not a valid ledger address: {e}"),
            }
        })
    }

    /// Format check plus parse of the signer credential. The error message
    /// never echoes the key material.
    fn parse_signer(&self) -> Result<PrivateKeySigner> {
        let key = self.config.private_key.trim();
        if !is_private_key_format(key) {
            return Err(AnchorError::Configuration {
                field: "credential",
                reason: "signer key must be 0x + 64 hex chars".to_string(),
            });
        }
        key.parse().map_err(|_| AnchorError::Configuration {
            field: "credential",
            reason: "signer key is not a valid secp256k1 private key".to_string(),
        })
    }

    fn parse_rpc_url(&self) -> Result<reqwest::Url> {
        self.config
            .rpc_url
            .parse()
            .map_err(|e| AnchorError::Configuration {
                field: "rpcUrl",
                reason: format!("invalid RPC URL: {e}"),
            })
    }
}

#[async_trait]
impl VerificationLedger for AnchorService {
    async fn record_verification(
        &self,
        payload: &VerificationPayload,
    ) -> Result<VerificationReceipt> {
        // Configuration checks run before any network activity: address
        // first, then credential.
        let contract_address = self.parse_contract_address()?;
        let signer = self.parse_signer()?;
        let rpc_url = self.parse_rpc_url()?;
        let caller = signer.address();

        // Recommended fillers handle per-signer nonce assignment, so
        // concurrent submissions from the same signer stay sequenced.
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(EthereumWallet::from(signer))
            .on_http(rpc_url);

        let contract = IVerification::new(contract_address, &provider);

        // Diagnostic only: the owner-only rule is enforced by the contract.
        // A silent endpoint must not stall the submission here.
        match tokio::time::timeout(self.config.rpc_timeout, contract.owner().call()).await {
            Ok(Ok(owner)) => info!(caller = %caller, owner = %owner._0, "submitting as"),
            Ok(Err(e)) => warn!(caller = %caller, error = %e, "could not read contract owner"),
            Err(_) => warn!(caller = %caller, "contract owner read timed out"),
        }

        info!(
            report_id = payload.report_id,
            digest = %crate::crypto::format_digest(&payload.digest),
            category = %payload.category,
            "sending recordVerification transaction"
        );

        let pending = bounded_call(
            self.config.rpc_timeout,
            contract
                .recordVerification(
                    U256::from(payload.report_id),
                    FixedBytes::from(payload.digest),
                    payload.category.clone(),
                    payload.model_version.clone(),
                )
                .send(),
        )
        .await?;

        info!(tx_hash = %pending.tx_hash(), "transaction accepted, waiting for inclusion");

        // Accepted submissions cannot be retracted; past this point failures
        // can only be reported, never undone.
        let receipt = await_receipt(self.config.confirm_timeout, pending.get_receipt()).await?;

        let block_number = receipt.block_number.ok_or_else(|| {
            AnchorError::Unexpected("confirmed receipt is missing a block number".to_string())
        })?;

        let receipt = VerificationReceipt {
            tx_hash: receipt.transaction_hash.0,
            block_number,
        };

        info!(
            report_id = payload.report_id,
            tx_hash = %crate::crypto::format_digest(&receipt.tx_hash),
            block_number,
            "verification recorded on-chain"
        );

        Ok(receipt)
    }

    async fn owner(&self) -> Result<String> {
        let contract_address = self.parse_contract_address()?;
        let rpc_url = self.parse_rpc_url()?;

        let provider = ProviderBuilder::new().on_http(rpc_url);
        let contract = IVerification::new(contract_address, &provider);

        let owner = bounded_call(self.config.rpc_timeout, contract.owner().call()).await?;

        Ok(owner._0.to_string())
    }
}

/// Bound a pre-confirmation RPC phase. An endpoint that accepts the
/// connection but never answers surfaces as `RemoteUnavailable` instead of
/// blocking the caller indefinitely.
async fn bounded_call<T, E, F>(wait: Duration, fut: F) -> Result<T>
where
    F: IntoFuture<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    match tokio::time::timeout(wait, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(classify_remote_error(e.to_string())),
        Err(_) => Err(AnchorError::RemoteUnavailable(format!(
            "no response from RPC endpoint within {wait:?}"
        ))),
    }
}

/// Bound the confirmation wait. Expiry is the `Timeout` outcome: the
/// transaction was already accepted and may still be included later.
async fn await_receipt<T, E, F>(confirm_timeout: Duration, receipt: F) -> Result<T>
where
    F: IntoFuture<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    match tokio::time::timeout(confirm_timeout, receipt).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(classify_remote_error(e.to_string())),
        Err(_) => Err(AnchorError::Timeout(confirm_timeout)),
    }
}

fn is_private_key_format(key: &str) -> bool {
    key.strip_prefix("0x")
        .map(|hex_part| hex_part.len() == 64 && hex_part.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

/// Map a remote failure onto the error taxonomy by inspecting its message.
/// The raw diagnostic is preserved in every case.
fn classify_remote_error(message: String) -> AnchorError {
    let lower = message.to_lowercase();

    // Owner-only revert reasons. "Not authorized" is what the deployed
    // contract emits; the Ownable variants cover common replacements.
    if lower.contains("not authorized")
        || lower.contains("caller is not the owner")
        || lower.contains("ownable")
        || lower.contains("unauthorized")
    {
        return AnchorError::Unauthorized(message);
    }

    if lower.contains("connection refused")
        || lower.contains("connection reset")
        || lower.contains("error sending request")
        || lower.contains("transport error")
        || lower.contains("dns error")
        || lower.contains("network is unreachable")
        || lower.contains("timed out")
    {
        return AnchorError::RemoteUnavailable(message);
    }

    AnchorError::Unexpected(message)
}
