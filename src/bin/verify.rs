use std::collections::VecDeque;

use civic_anchor::anchor::{AnchorConfig, AnchorService};
use civic_anchor::telemetry::{init_telemetry, TelemetryConfig};
use civic_anchor::{VerificationRequest, VerificationSubmitter};

/// Well-known local development key (Anvil/Hardhat account 0). Only ever used
/// as a fallback in debug builds; release builds require BLOCKCHAIN_OWNER_PK.
const DEV_SIGNER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn print_usage() {
    eprintln!(
        "\
civic-anchor-verify

USAGE:
  civic-anchor-verify <reportId> <digest> <category> <modelVersion>

ARGS:
  reportId        non-negative integer
  digest          0x + 64 hex chars (bytes32)
  category        classification label
  modelVersion    classifier model label (empty falls back to v1)

ENV:
  ANCHOR_RPC_URL                  ledger RPC endpoint (required)
  VERIFICATION_CONTRACT_ADDRESS   deployed Verification contract (required)
  BLOCKCHAIN_OWNER_PK             signer key, 0x + 64 hex (required; never
                                  passed as an argument)
  ANCHOR_RPC_TIMEOUT_SECS         per-RPC-call wait bound (default: 10)
  ANCHOR_CONFIRM_TIMEOUT_SECS     confirmation wait bound (default: 60)

EXAMPLE:
  civic-anchor-verify 1 0x{} \"Garbage\" \"v1\"
",
        "a".repeat(64)
    );
}

fn signer_key_from_env() -> anyhow::Result<String> {
    if let Ok(key) = std::env::var("BLOCKCHAIN_OWNER_PK") {
        return Ok(key);
    }

    if cfg!(debug_assertions) {
        eprintln!(
            "warning: BLOCKCHAIN_OWNER_PK not set, using the local development key (debug build only)"
        );
        Ok(DEV_SIGNER_KEY.to_string())
    } else {
        anyhow::bail!("BLOCKCHAIN_OWNER_PK is required (no fallback in release builds)")
    }
}

#[tokio::main]
async fn main() {
    init_telemetry(&TelemetryConfig::from_env());

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let mut args: VecDeque<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    if args.len() < 4 {
        print_usage();
        std::process::exit(2);
    }

    let report_id: i64 = {
        let raw = args.pop_front().expect("checked above");
        raw.parse()
            .map_err(|_| anyhow::anyhow!("reportId must be an integer, got {raw:?}"))?
    };
    let digest = args.pop_front().expect("checked above");
    let category = args.pop_front().expect("checked above");
    let model_version = args.pop_front().expect("checked above");

    if let Some(extra) = args.pop_front() {
        anyhow::bail!("unexpected argument: {extra}");
    }

    let config = AnchorConfig::from_env_with_signer(signer_key_from_env()?)?;

    let submitter = VerificationSubmitter::new(AnchorService::new(config));
    let request = VerificationRequest {
        report_id,
        digest,
        category,
        model_version,
    };

    let receipt = submitter.submit(&request).await?;

    println!(
        "ok: recorded report_id={} tx_hash=0x{} block={}",
        request.report_id,
        hex::encode(receipt.tx_hash),
        receipt.block_number
    );
    Ok(())
}
