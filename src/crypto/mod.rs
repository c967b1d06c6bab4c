//! Cryptographic utilities for report digests

mod digest;


pub use digest::{compute_report_digest, format_digest, parse_digest, Hash256};
