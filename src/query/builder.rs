//! Elasticsearch request document builder for content-repository queries

use crate::content::Node;
use crate::error::Result;
use serde_json::{json, Map, Value};

/// Builds a search request restricted to the subtree of a context node.
///
/// The base document already filters on the node's path, the workspace and
/// the node's dimension hash; further clauses are layered on top.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    request: Value,
}

impl QueryBuilder {
    /// Start a query below `node` in `workspace_name`
    pub fn for_node(node: &Node, workspace_name: &str) -> Self {
        let request = json!({
            "query": {
                "bool": {
                    "must": [{ "match_all": {} }],
                    "filter": {
                        "bool": {
                            "must": [
                                { "term": { "__parentPath": node.path() } },
                                { "terms": { "__workspace": [workspace_name] } },
                                {
                                    "term": {
                                        "__dimensionCombinationHash":
                                            node.context_dimensions().combination_hash()
                                    }
                                }
                            ],
                            "should": [],
                            "must_not": [{ "term": { "_hidden": true } }]
                        }
                    }
                }
            },
            "_source": ["__path"]
        });

        Self { request }
    }

    /// Add a filter clause, e.g. `prefix` or `term`
    pub fn query_filter(mut self, filter_type: &str, options: Value) -> Self {
        if let Some(Value::Array(must)) = self.request.pointer_mut("/query/bool/filter/bool/must") {
            let mut clause = Map::new();
            clause.insert(filter_type.to_string(), options);
            must.push(Value::Object(clause));
        }
        self
    }

    /// Limit the number of returned documents
    pub fn limit(mut self, size: usize) -> Self {
        self.request["size"] = json!(size);
        self
    }

    /// Add a named aggregation
    pub fn aggregation(mut self, name: &str, definition: Value) -> Self {
        self.request["aggs"][name] = definition;
        self
    }

    /// Add a named suggester
    pub fn suggestions(mut self, name: &str, definition: Value) -> Self {
        self.request["suggest"][name] = definition;
        self
    }

    /// The request document built so far
    pub fn request(&self) -> &Value {
        &self.request
    }

    /// Serialize the request document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.request)?)
    }
}
