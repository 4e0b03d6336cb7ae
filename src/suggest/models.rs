//! Request and result types of the suggestion action

use crate::error::{QUERY_EXECUTION_FAILED, TERM_NOT_STRING};
use crate::search::SuggestionOption;
use serde::{Deserialize, Serialize};

/// One suggestion request as received from the front-end widget
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub context_node_identifier: String,
    /// JSON-serialized dimension combination
    #[serde(default)]
    pub dimension_combination: String,
    /// Raw term; anything but a JSON string fails validation
    #[serde(default)]
    pub term: serde_json::Value,
}

impl SuggestionRequest {
    pub fn new(
        context_node_identifier: impl Into<String>,
        dimension_combination: impl Into<String>,
        term: impl Into<String>,
    ) -> Self {
        Self {
            context_node_identifier: context_node_identifier.into(),
            dimension_combination: dimension_combination.into(),
            term: serde_json::Value::String(term.into()),
        }
    }

    /// The term, if it is a string
    pub fn term(&self) -> Option<&str> {
        self.term.as_str()
    }
}

/// Completions and suggestions extracted for one request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionResult {
    pub completions: Vec<String>,
    pub suggestions: Vec<SuggestionOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl SuggestionResult {
    /// An empty result carrying a single error message
    pub fn failed(message: &str) -> Self {
        Self {
            errors: Some(vec![message.to_string()]),
            ..Default::default()
        }
    }

    pub fn term_not_string() -> Self {
        Self::failed(TERM_NOT_STRING)
    }

    pub fn query_failed() -> Self {
        Self::failed(QUERY_EXECUTION_FAILED)
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().map_or(false, |errors| !errors.is_empty())
    }

    /// Flatten into display strings.
    ///
    /// Completions win whenever there are any; suggestions are only used as a
    /// fallback. Blank entries are dropped, order is kept.
    pub fn options(&self) -> Vec<String> {
        if !self.completions.is_empty() {
            return self
                .completions
                .iter()
                .map(String::as_str)
                .filter(|completion| is_displayable(completion))
                .map(String::from)
                .collect();
        }

        self.suggestions
            .iter()
            .map(SuggestionOption::text)
            .filter(|text| is_displayable(text))
            .map(String::from)
            .collect()
    }
}

/// The widget treats `""` and `"0"` as falsy and never shows them
fn is_displayable(option: &str) -> bool {
    !option.is_empty() && option != "0"
}

/// Response body of the suggestion action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SuggestOutcome {
    /// Flattened display strings
    Options(Vec<String>),
    /// Empty result plus error messages
    Failed(SuggestionResult),
}

impl SuggestOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn annotated(text: &str) -> SuggestionOption {
        SuggestionOption::Annotated {
            text: text.to_string(),
            metadata: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_completions_take_precedence() {
        let result = SuggestionResult {
            completions: vec!["cat".to_string(), "car".to_string()],
            suggestions: vec![annotated("dog")],
            errors: None,
        };
        assert_eq!(result.options(), vec!["cat", "car"]);
    }

    #[test]
    fn test_suggestions_fallback_drops_empty() {
        let result = SuggestionResult {
            suggestions: vec![
                annotated("dog"),
                annotated(""),
                SuggestionOption::PlainText("doge".to_string()),
            ],
            ..Default::default()
        };
        assert_eq!(result.options(), vec!["dog", "doge"]);
    }

    #[test]
    fn test_zero_completion_is_dropped() {
        let result = SuggestionResult {
            completions: vec!["0".to_string(), "cat".to_string()],
            suggestions: vec![annotated("dog")],
            errors: None,
        };
        assert_eq!(result.options(), vec!["cat"]);
    }

    #[test]
    fn test_zero_suggestion_is_dropped() {
        let result = SuggestionResult {
            suggestions: vec![
                annotated("0"),
                SuggestionOption::PlainText("0".to_string()),
                annotated("dog"),
            ],
            ..Default::default()
        };
        assert_eq!(result.options(), vec!["dog"]);

        // "00" and "0.0" are ordinary strings
        let result = SuggestionResult {
            completions: vec!["00".to_string(), "0.0".to_string()],
            ..Default::default()
        };
        assert_eq!(result.options(), vec!["00", "0.0"]);
    }

    #[test]
    fn test_failed_serialization() {
        let outcome = SuggestOutcome::Failed(SuggestionResult::term_not_string());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({ "completions": [], "suggestions": [], "errors": ["term has to be a string"] })
        );
    }

    #[test]
    fn test_options_serialize_as_array() {
        let outcome = SuggestOutcome::Options(vec!["cat".to_string()]);
        assert_eq!(serde_json::to_value(&outcome).unwrap(), json!(["cat"]));
    }

    #[test]
    fn test_request_from_json() {
        let request: SuggestionRequest = serde_json::from_value(json!({
            "contextNodeIdentifier": "home",
            "dimensionCombination": "{\"language\":[\"en\"]}",
            "term": ["array"]
        }))
        .unwrap();
        assert_eq!(request.context_node_identifier, "home");
        assert_eq!(request.term(), None);

        let request: SuggestionRequest =
            serde_json::from_value(json!({ "contextNodeIdentifier": "home" })).unwrap();
        assert_eq!(request.term(), None);
        assert_eq!(request.dimension_combination, "");
    }
}
