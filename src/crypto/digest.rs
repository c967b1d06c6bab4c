//! Deterministic report digest computation
//!
//! The digest is the tamper-evident fingerprint recorded on-chain for each
//! report: SHA-256 over a canonical pipe-joined concatenation of the report
//! fields, rendered externally as `0x` + 64 lowercase hex characters.
//!
//! The canonical form is fixed. Changing the field order or the separator
//! would orphan every digest already recorded on the ledger.

use sha2::{Digest, Sha256};

use crate::domain::ReportRecord;

/// 32-byte SHA-256 hash
pub type Hash256 = [u8; 32];

/// Separator between fields in the canonical string. Free-text fields are not
/// guaranteed to exclude it; see DESIGN.md for the accepted collision risk.
const FIELD_SEPARATOR: &str = "|";

/// Compute the content digest for a report.
///
/// Canonical string: `reportId|title|description|category|modelVersion|createdAt`.
/// Pure function: same field values always produce the same digest.
pub fn compute_report_digest(report: &ReportRecord) -> Hash256 {
    let canonical = [
        report.report_id.to_string().as_str(),
        report.title.as_str(),
        report.description.as_str(),
        report.category.as_str(),
        report.model_version.as_str(),
        report.created_at.as_str(),
    ]
    .join(FIELD_SEPARATOR);

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hasher.finalize().into()
}

/// Render a digest as `0x` + 64 lowercase hex characters.
pub fn format_digest(digest: &Hash256) -> String {
    format!("0x{}", hex::encode(digest))
}

/// Parse a digest string. Accepts exactly `0x` + 64 hex characters
/// (case-insensitive); anything else is rejected.
pub fn parse_digest(s: &str) -> Option<Hash256> {
    let hex_part = s.strip_prefix("0x")?;
    if hex_part.len() != 64 {
        return None;
    }
    let bytes = hex::decode(hex_part).ok()?;
    bytes.try_into().ok()
}
