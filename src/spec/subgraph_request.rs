//! The subgraph request: a distinct entry point, independent of
//! [`super::SearchSpec`], taking a list of nodes instead of a source/target
//! pair.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{GraphError, Result};

/// One requested node, identified by name and/or `(namespace, identifier)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubgraphNodeRef {
    pub name: String,
    pub namespace: String,
    pub identifier: String,
}

/// A validated request for the edges induced by a set of nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubgraphRequest {
    pub nodes: Vec<SubgraphNodeRef>,
}

impl SubgraphRequest {
    pub fn new(nodes: Vec<SubgraphNodeRef>, config: &Config) -> Result<Self> {
        if nodes.is_empty() || nodes.len() > config.max_subgraph_nodes {
            return Err(GraphError::Validation(format!(
                "subgraph request must have between 1 and {} nodes",
                config.max_subgraph_nodes
            )));
        }
        Ok(Self { nodes })
    }
}
