//! Search response types and suggestion extraction

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the terms aggregation carrying completions
pub const AUTOCOMPLETE_AGGREGATION: &str = "autocomplete";

/// Name of the completion suggester
pub const SUGGESTER_NAME: &str = "suggestions";

/// The parts of a search response the suggestion action reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub aggregations: HashMap<String, TermsAggregation>,
    #[serde(default)]
    pub suggest: HashMap<String, Vec<SuggestEntry>>,
}

impl SearchResponse {
    /// Read a response from the parsed response body
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// A terms aggregation result
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermsAggregation {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub key: String,
}

/// One entry of a suggester result
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestEntry {
    #[serde(default)]
    pub options: Vec<SuggestionOption>,
}

/// A suggester option: either bare text or an object with `text` and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestionOption {
    PlainText(String),
    Annotated {
        #[serde(default)]
        text: String,
        #[serde(flatten)]
        metadata: serde_json::Map<String, serde_json::Value>,
    },
}

impl SuggestionOption {
    /// Display text of the option
    pub fn text(&self) -> &str {
        match self {
            Self::PlainText(text) => text,
            Self::Annotated { text, .. } => text,
        }
    }
}

/// Completion terms from the autocomplete aggregation, in engine order
pub fn extract_completions(response: &SearchResponse) -> Vec<String> {
    response
        .aggregations
        .get(AUTOCOMPLETE_AGGREGATION)
        .map(|aggregation| {
            aggregation
                .buckets
                .iter()
                .map(|bucket| bucket.key.clone())
                .collect()
        })
        .unwrap_or_default()
}

/// Options of the first suggester entry, verbatim
pub fn extract_suggestions(response: &SearchResponse) -> Vec<SuggestionOption> {
    response
        .suggest
        .get(SUGGESTER_NAME)
        .and_then(|entries| entries.first())
        .map(|entry| entry.options.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SearchResponse {
        SearchResponse::from_value(value).unwrap()
    }

    #[test]
    fn test_completions_keep_engine_order() {
        let response = parse(json!({
            "hits": { "hits": [] },
            "aggregations": {
                "autocomplete": {
                    "buckets": [
                        { "key": "cat", "doc_count": 5 },
                        { "key": "car", "doc_count": 2 }
                    ]
                }
            }
        }));
        assert_eq!(extract_completions(&response), vec!["cat", "car"]);
        assert!(extract_suggestions(&response).is_empty());
    }

    #[test]
    fn test_missing_blocks_are_empty() {
        let response = parse(json!({ "took": 3 }));
        assert!(extract_completions(&response).is_empty());
        assert!(extract_suggestions(&response).is_empty());

        let response = parse(json!({ "suggest": { "suggestions": [] } }));
        assert!(extract_suggestions(&response).is_empty());
    }

    #[test]
    fn test_suggestion_options() {
        let response = parse(json!({
            "suggest": {
                "suggestions": [
                    {
                        "text": "dgo",
                        "offset": 0,
                        "length": 3,
                        "options": [
                            { "text": "dog", "score": 1.0, "payload": { "id": 7 } },
                            "cat"
                        ]
                    },
                    { "text": "ignored", "options": [{ "text": "never" }] }
                ]
            }
        }));

        let options = extract_suggestions(&response);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].text(), "dog");
        assert_eq!(options[1], SuggestionOption::PlainText("cat".to_string()));
        match &options[0] {
            SuggestionOption::Annotated { metadata, .. } => {
                assert_eq!(metadata["score"], 1.0);
                assert!(!metadata.contains_key("text"));
            }
            other => panic!("expected annotated option, got {:?}", other),
        }
    }

    #[test]
    fn test_option_without_text() {
        let option: SuggestionOption = serde_json::from_value(json!({ "score": 2 })).unwrap();
        assert_eq!(option.text(), "");
    }
}
