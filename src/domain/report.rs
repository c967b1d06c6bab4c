//! Report records and classification labels

use serde::{Deserialize, Serialize};

/// Maximum length for classification labels embedded in contract calls.
pub const MAX_LABEL_LEN: usize = 50;

/// Timestamp format captured at digest-computation time.
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A citizen-submitted report, immutable once hashed.
///
/// `report_id` is assigned by the external persistence layer; `category` and
/// `model_version` come from the external classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub report_id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub model_version: String,
    /// Fixed-format timestamp (`YYYY-MM-DD HH:MM:SS`).
    pub created_at: String,
}

impl ReportRecord {
    /// Build a record with `created_at` captured now, cleaning the
    /// classification labels before they enter the canonical form.
    pub fn new(
        report_id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        classification: &Classification,
    ) -> Self {
        Self {
            report_id,
            title: title.into(),
            description: description.into(),
            category: clean_label(&classification.category, MAX_LABEL_LEN),
            model_version: clean_label(&classification.model_version, MAX_LABEL_LEN),
            created_at: chrono::Utc::now().format(CREATED_AT_FORMAT).to_string(),
        }
    }
}

/// Result of the external classification service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    pub confidence: f64,
    #[serde(default)]
    pub model_version: String,
}

/// Normalize a classification label so it is safe to embed in contract calls.
///
/// Keeps letters, digits, spaces, `_`, `-` and `.`; strips control characters
/// and everything else; collapses runs of whitespace; trims; truncates to
/// `max_len` characters.
pub fn clean_label(s: &str, max_len: usize) -> String {
    let filtered: String = s
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-' | '.'))
        .collect();

    let collapsed = filtered
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    collapsed.chars().take(max_len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_label_keeps_allowed_characters() {
        assert_eq!(clean_label("Garbage", 50), "Garbage");
        assert_eq!(clean_label("road_repair-v1.2", 50), "road_repair-v1.2");
    }

    #[test]
    fn clean_label_strips_disallowed_characters() {
        assert_eq!(clean_label("Garbage; rm -rf /", 50), "Garbage rm -rf");
        assert_eq!(clean_label("a|b`c$d", 50), "abcd");
        assert_eq!(clean_label("\x00\x07evil\x1f", 50), "evil");
    }

    #[test]
    fn clean_label_collapses_and_trims_whitespace() {
        assert_eq!(clean_label("  Water   Leak  ", 50), "Water Leak");
    }

    #[test]
    fn clean_label_truncates() {
        assert_eq!(clean_label(&"a".repeat(80), 50).len(), 50);
    }

    #[test]
    fn clean_label_can_produce_empty() {
        assert_eq!(clean_label("!@#$%^&*", 50), "");
        assert_eq!(clean_label("", 50), "");
    }

    #[test]
    fn new_record_captures_fixed_format_timestamp() {
        let classification = Classification {
            category: "Garbage".to_string(),
            confidence: 0.93,
            model_version: "v1".to_string(),
        };
        let record = ReportRecord::new(1, "t", "d", &classification);
        assert_eq!(record.created_at.len(), 19);
        assert_eq!(&record.created_at[4..5], "-");
        assert_eq!(&record.created_at[10..11], " ");
        assert_eq!(&record.created_at[13..14], ":");
    }
}
