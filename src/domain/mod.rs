//! Core domain types for report verification

mod report;
mod verification;

pub use report::{clean_label, Classification, ReportRecord, MAX_LABEL_LEN};
pub use verification::{VerificationPayload, VerificationReceipt, VerificationRequest};
