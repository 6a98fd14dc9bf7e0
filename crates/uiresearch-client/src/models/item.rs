//! Search result records and response envelopes.

use serde::{Deserialize, Serialize};

/// One academic reference returned by the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(default)]
    pub title: String,

    /// Authors as a single display string (`"Ada Lovelace; Alan Turing"`).
    #[serde(default)]
    pub authors: String,

    #[serde(default)]
    pub journal: String,

    #[serde(default)]
    pub year: Option<i32>,

    /// Landing page for the DOI.
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub doi: String,

    #[serde(default)]
    pub r#abstract: String,
}

/// Successful search response: `{items: [...], count: N}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<ResultItem>,

    #[serde(default)]
    pub count: u64,
}

/// Structured error body: `{error: {code, message}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<ApiErrorBody>,

    /// Auth endpoints report failures as `{detail: "..."}`.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u16>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Extract the human-readable message from an error response body.
///
/// Non-string `detail` values (validation error lists) are ignored.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;

    if let Some(message) = envelope.error.and_then(|e| e.message) {
        return Some(message);
    }

    match envelope.detail {
        Some(serde_json::Value::String(detail)) => Some(detail),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_item_optional_year() {
        let item: ResultItem = serde_json::from_str(
            r#"{"title": "T", "authors": "A", "journal": "J", "url": "u", "doi": "d", "abstract": "x"}"#,
        )
        .unwrap();
        assert_eq!(item.year, None);
        assert_eq!(item.r#abstract, "x");
    }

    #[test]
    fn test_error_message_envelopes() {
        assert_eq!(
            error_message(r#"{"error": {"code": 400, "message": "Query too short"}}"#),
            Some("Query too short".to_string())
        );
        assert_eq!(
            error_message(r#"{"detail": "Email already registered"}"#),
            Some("Email already registered".to_string())
        );
        assert_eq!(error_message(r#"{"detail": [{"loc": ["body"], "msg": "x"}]}"#), None);
        assert_eq!(error_message("Internal Server Error"), None);
        assert_eq!(error_message(r#"{"error": {}}"#), None);
    }
}
