//! Content repository access
//!
//! The suggestion action only needs to resolve a node inside a workspace and
//! dimension context. The repository itself lives elsewhere; this module holds
//! the narrow interface plus an in-memory implementation.

mod memory;

pub use memory::{InMemoryContentRepository, NodeRecord};

use crate::cache::md5_hex;
use crate::error::{Result, SuggestError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Workspace every suggestion query runs against
pub const LIVE_WORKSPACE: &str = "live";

/// Content dimension values, keyed by dimension name (e.g. `language`).
///
/// Backed by a `BTreeMap` so serialization, and every hash derived from it,
/// is independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimensions(BTreeMap<String, Vec<String>>);

impl Dimensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dimension with its ordered values
    pub fn with(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.0.insert(name.into(), values);
        self
    }

    /// Values for a dimension
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode a serialized dimension combination as sent by the front-end.
    ///
    /// Accepts a JSON object whose values are strings or string lists. An empty
    /// string or `null` means no dimensions.
    pub fn from_combination(combination: &str) -> Result<Self> {
        if combination.trim().is_empty() {
            return Ok(Self::new());
        }

        let value: serde_json::Value = serde_json::from_str(combination).map_err(|e| {
            SuggestError::query_building(format!("malformed dimension combination: {}", e))
        })?;

        let object = match value {
            serde_json::Value::Null => return Ok(Self::new()),
            serde_json::Value::Object(object) => object,
            other => {
                return Err(SuggestError::query_building(format!(
                    "dimension combination must be an object, got {}",
                    other
                )))
            }
        };

        let mut dimensions = BTreeMap::new();
        for (name, value) in object {
            let values = match value {
                serde_json::Value::String(s) => vec![s],
                serde_json::Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => Ok(s),
                        other => Err(SuggestError::query_building(format!(
                            "dimension '{}' has a non-string value {}",
                            name, other
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?,
                other => {
                    return Err(SuggestError::query_building(format!(
                        "dimension '{}' has an unsupported value {}",
                        name, other
                    )))
                }
            };
            dimensions.insert(name, values);
        }

        Ok(Self(dimensions))
    }

    /// Hash identifying this dimension set in the search index
    pub fn combination_hash(&self) -> String {
        // Serializing a map of strings cannot fail
        let json = serde_json::to_string(&self.0).unwrap_or_default();
        md5_hex(json)
    }
}

/// A content node as seen from a resolved context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub identifier: String,
    pub path: String,
    /// Dimensions of the context the node was resolved in
    pub context_dimensions: Dimensions,
}

impl Node {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn context_dimensions(&self) -> &Dimensions {
        &self.context_dimensions
    }
}

/// A workspace plus dimension view onto the content repository
pub trait ContentContext: Send + Sync {
    fn workspace_name(&self) -> &str;

    /// Look up a node visible in this context
    fn node_by_identifier(&self, identifier: &str) -> Option<Node>;
}

/// Creates content contexts
pub trait ContentContextResolver: Send + Sync {
    fn resolve_context(
        &self,
        workspace_name: &str,
        dimensions: &Dimensions,
    ) -> Result<Box<dyn ContentContext>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_combination() {
        let dims = Dimensions::from_combination(r#"{"language":["de","en"],"country":"at"}"#)
            .unwrap();
        assert_eq!(dims.get("language").unwrap(), ["de", "en"]);
        assert_eq!(dims.get("country").unwrap(), ["at"]);
    }

    #[test]
    fn test_empty_combination() {
        assert!(Dimensions::from_combination("").unwrap().is_empty());
        assert!(Dimensions::from_combination("null").unwrap().is_empty());
        assert!(Dimensions::from_combination("{}").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_combination() {
        for input in ["{not json", "[\"en\"]", r#"{"language":[1]}"#, r#"{"language":true}"#] {
            let err = Dimensions::from_combination(input).unwrap_err();
            assert!(err.is_query_building(), "{} should fail", input);
        }
    }

    #[test]
    fn test_combination_hash_ignores_key_order() {
        let a = Dimensions::from_combination(r#"{"language":["en"],"country":["us"]}"#).unwrap();
        let b = Dimensions::from_combination(r#"{"country":["us"],"language":["en"]}"#).unwrap();
        assert_eq!(a.combination_hash(), b.combination_hash());
        assert_ne!(a.combination_hash(), Dimensions::new().combination_hash());
    }
}
