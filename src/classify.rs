//! Client for the external AI classification service
//!
//! The classifier maps free text to `{category, confidence, model_version}`
//! over a JSON exchange. Any non-2xx response or a body missing `category`
//! is surfaced as an error, never silently defaulted.

use serde_json::Value;
use tracing::debug;

use crate::domain::{clean_label, Classification, MAX_LABEL_LEN};
use crate::infra::{AnchorError, Result};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/classify";

/// Classifier endpoint configuration
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub endpoint: String,
}

impl ClassifierConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("AI_CLASSIFIER_URL")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
        }
    }
}

/// HTTP client for the classification endpoint
pub struct ClassifierClient {
    http: reqwest::Client,
    config: ClassifierConfig,
}

impl ClassifierClient {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Classify free text into a category/confidence/model-version result.
    pub async fn classify(&self, text: &str) -> Result<Classification> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| AnchorError::Classification(format!("request failed: {e}")))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| AnchorError::Classification(format!("invalid JSON body: {e}")))?;

        debug!(%status, "classifier responded");
        parse_classification(status.as_u16(), &body)
    }
}

/// Check the status and shape of a classifier response.
fn parse_classification(status: u16, body: &Value) -> Result<Classification> {
    if !(200..300).contains(&status) {
        return Err(AnchorError::Classification(format!(
            "classifier returned HTTP {status}: {body}"
        )));
    }

    let category = body
        .get("category")
        .and_then(Value::as_str)
        .map(|c| clean_label(c, MAX_LABEL_LEN))
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            AnchorError::Classification(format!("response is missing a usable category: {body}"))
        })?;

    let confidence = body
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let model_version = body
        .get("model_version")
        .and_then(Value::as_str)
        .map(|v| clean_label(v, MAX_LABEL_LEN))
        .unwrap_or_default();

    Ok(Classification {
        category,
        confidence,
        model_version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_response_parses() {
        let body = json!({
            "category": "Garbage",
            "confidence": 0.93,
            "model_version": "v1",
        });
        let classification = parse_classification(200, &body).unwrap();
        assert_eq!(classification.category, "Garbage");
        assert_eq!(classification.confidence, 0.93);
        assert_eq!(classification.model_version, "v1");
    }

    #[test]
    fn non_2xx_is_an_error_even_with_a_valid_body() {
        let body = json!({ "category": "Garbage" });
        assert!(matches!(
            parse_classification(500, &body),
            Err(AnchorError::Classification(_))
        ));
    }

    #[test]
    fn missing_category_is_an_error() {
        let body = json!({ "confidence": 0.8 });
        match parse_classification(200, &body) {
            Err(AnchorError::Classification(message)) => {
                assert!(message.contains("category"))
            }
            other => panic!("expected Classification error, got {other:?}"),
        }
    }

    #[test]
    fn category_that_sanitizes_to_empty_is_an_error() {
        let body = json!({ "category": "!!!" });
        assert!(matches!(
            parse_classification(200, &body),
            Err(AnchorError::Classification(_))
        ));
    }

    #[test]
    fn labels_are_cleaned() {
        let body = json!({ "category": "  Water   Leak; x ", "model_version": "v1|evil" });
        let classification = parse_classification(200, &body).unwrap();
        assert_eq!(classification.category, "Water Leak x");
        assert_eq!(classification.model_version, "v1evil");
    }

    #[test]
    fn missing_optional_fields_default() {
        let body = json!({ "category": "Roads" });
        let classification = parse_classification(200, &body).unwrap();
        assert_eq!(classification.confidence, 0.0);
        assert_eq!(classification.model_version, "");
    }
}
