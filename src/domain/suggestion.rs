//! Repair suggestions handed back to the calling audit.

use serde::{Deserialize, Serialize};

/// Kind of repair a suggestion proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionType {
    /// The path exists but is not published.
    Publish,
    /// The same content exists under another locale.
    Locale,
    /// A near-identical path exists.
    Similar,
    /// A misspelled folder was found higher up the tree.
    ParentFolder,
    /// No rule produced a fix.
    NotFound,
}

/// A proposed fix for one broken content-fragment reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub requested_path: String,
    pub suggested_path: Option<String>,
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Suggestion {
    fn fix(
        suggestion_type: SuggestionType,
        requested: impl Into<String>,
        suggested: impl Into<String>,
    ) -> Self {
        Self {
            requested_path: requested.into(),
            suggested_path: Some(suggested.into()),
            suggestion_type,
            rule: None,
            reason: None,
        }
    }

    pub fn publish(requested: impl Into<String>, suggested: impl Into<String>) -> Self {
        Self::fix(SuggestionType::Publish, requested, suggested)
    }

    pub fn locale(requested: impl Into<String>, suggested: impl Into<String>) -> Self {
        Self::fix(SuggestionType::Locale, requested, suggested)
    }

    pub fn similar(requested: impl Into<String>, suggested: impl Into<String>) -> Self {
        Self::fix(SuggestionType::Similar, requested, suggested)
    }

    pub fn parent_folder(requested: impl Into<String>, suggested: impl Into<String>) -> Self {
        Self::fix(SuggestionType::ParentFolder, requested, suggested)
    }

    pub fn not_found(requested: impl Into<String>) -> Self {
        Self {
            requested_path: requested.into(),
            suggested_path: None,
            suggestion_type: SuggestionType::NotFound,
            rule: None,
            reason: None,
        }
    }

    /// Tag the suggestion with the rule that produced it.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn is_fix(&self) -> bool {
        self.suggestion_type != SuggestionType::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_a_fix() {
        let s = Suggestion::not_found("/content/dam/x.jpg");
        assert!(!s.is_fix());
        assert_eq!(s.suggested_path, None);
    }

    #[test]
    fn test_serialize_shape() {
        let s = Suggestion::similar("/a/missing.jpg", "/a/a.jpg")
            .with_rule("SimilarPathRule")
            .with_reason("levenshtein distance 7");
        let v = serde_json::to_value(&s).expect("serialize");
        assert_eq!(
            v,
            serde_json::json!({
                "requestedPath": "/a/missing.jpg",
                "suggestedPath": "/a/a.jpg",
                "type": "SIMILAR",
                "rule": "SimilarPathRule",
                "reason": "levenshtein distance 7"
            })
        );
    }

    #[test]
    fn test_not_found_serializes_null_suggestion() {
        let v = serde_json::to_value(Suggestion::not_found("/x")).expect("serialize");
        assert!(v["suggestedPath"].is_null());
        assert_eq!(v["type"], "NOT_FOUND");
        assert!(v.get("rule").is_none());
    }
}
