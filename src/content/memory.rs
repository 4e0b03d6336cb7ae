//! In-memory content repository loaded from YAML

use super::{ContentContext, ContentContextResolver, Dimensions, Node};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A stored node variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub identifier: String,
    pub path: String,
    #[serde(default = "default_workspace")]
    pub workspace: String,
    /// Dimension values of this variant; a dimension not listed here does
    /// not restrict visibility
    #[serde(default)]
    pub dimensions: Dimensions,
}

fn default_workspace() -> String {
    super::LIVE_WORKSPACE.to_string()
}

impl NodeRecord {
    pub fn new(identifier: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            path: path.into(),
            workspace: default_workspace(),
            dimensions: Dimensions::new(),
        }
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// A variant is visible when every one of its dimension values is among
    /// the values requested for that dimension
    fn visible_in(&self, workspace_name: &str, dimensions: &Dimensions) -> bool {
        if self.workspace != workspace_name {
            return false;
        }
        self.dimensions.iter().all(|(name, values)| {
            dimensions
                .get(name)
                .map(|requested| values.iter().all(|v| requested.contains(v)))
                .unwrap_or(false)
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct NodesFile {
    #[serde(default)]
    nodes: Vec<NodeRecord>,
}

/// Content repository held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentRepository {
    nodes: Arc<Vec<NodeRecord>>,
}

impl InMemoryContentRepository {
    pub fn new(nodes: Vec<NodeRecord>) -> Self {
        Self {
            nodes: Arc::new(nodes),
        }
    }

    /// Load node records from a YAML file with a top-level `nodes` list
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: NodesFile = serde_yaml::from_str(&content)?;
        Ok(Self::new(file.nodes))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ContentContextResolver for InMemoryContentRepository {
    fn resolve_context(
        &self,
        workspace_name: &str,
        dimensions: &Dimensions,
    ) -> Result<Box<dyn ContentContext>> {
        Ok(Box::new(InMemoryContext {
            workspace_name: workspace_name.to_string(),
            dimensions: dimensions.clone(),
            nodes: self.nodes.clone(),
        }))
    }
}

struct InMemoryContext {
    workspace_name: String,
    dimensions: Dimensions,
    nodes: Arc<Vec<NodeRecord>>,
}

impl ContentContext for InMemoryContext {
    fn workspace_name(&self) -> &str {
        &self.workspace_name
    }

    fn node_by_identifier(&self, identifier: &str) -> Option<Node> {
        self.nodes
            .iter()
            .find(|record| {
                record.identifier == identifier
                    && record.visible_in(&self.workspace_name, &self.dimensions)
            })
            .map(|record| Node {
                identifier: record.identifier.clone(),
                path: record.path.clone(),
                context_dimensions: self.dimensions.clone(),
            })
    }
}
