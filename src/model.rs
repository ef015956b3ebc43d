//! Data model shared by every algorithm family and the response assembler.
//!
//! Every type here is produced fresh per request and discarded once the
//! [`Response`] has been returned to the caller; only the graph store
//! outlives a request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A graph vertex.
///
/// `(namespace, identifier)` uniquely identifies a node; `name` is the
/// display handle used for adjacency lookups and is not guaranteed unique
/// across namespaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub namespace: String,
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup: Option<String>,
    /// 0 = up-regulation, 1 = down-regulation. Present only when this node
    /// was drawn from the signed-node graph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<u8>,
}

impl Node {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            identifier: identifier.into(),
            lookup: None,
            sign: None,
        }
    }

    pub fn with_sign(mut self, sign: u8) -> Self {
        self.sign = Some(sign);
        self
    }

    pub fn with_lookup(mut self, lookup: Option<String>) -> Self {
        self.lookup = lookup;
        self
    }
}

/// A `(name, sign)` pair used whenever the signed-node graph is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignedNodeRef<'a> {
    pub name: &'a str,
    pub sign: u8,
}

impl<'a> SignedNodeRef<'a> {
    pub fn new(name: &'a str, sign: u8) -> Self {
        Self { name, sign }
    }
}

/// One supporting statement for an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StmtData {
    pub stmt_type: String,
    pub evidence_count: u32,
    pub stmt_hash: i64,
    pub source_counts: BTreeMap<String, u32>,
    pub belief: f64,
    pub curated: bool,
    pub english: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_sign: Option<u8>,
    pub url: String,
}

/// One directed edge, with its surviving statements grouped by statement
/// type.
///
/// Invariant: `statements` is never empty for an edge handed back to a
/// caller — an edge whose statements are all filtered out is dropped by
/// the result manager before it reaches a [`Path`] or [`EdgeDataByHash`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub source: Node,
    pub target: Node,
    pub statements: BTreeMap<String, Vec<StmtData>>,
    pub belief: f64,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_weight: Option<f64>,
    pub url: String,
}

impl EdgeData {
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.source.name, &self.target.name)
    }
}

/// A subgraph-query edge, keyed by statement hash instead of statement
/// type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDataByHash {
    pub source: Node,
    pub target: Node,
    pub statements: BTreeMap<i64, StmtData>,
    pub belief: f64,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_weight: Option<f64>,
    pub url: String,
}

/// An ordered sequence of nodes of length *k* paired with *k − 1* edges,
/// positionally co-indexed: `edges[i]` connects `nodes[i]` to `nodes[i+1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub nodes: Vec<Node>,
    pub edges: Vec<EdgeData>,
}

impl Path {
    /// Number of nodes in the path (`edges.len() + 1`).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The result of one directed path query (SSP, BFS, or Dijkstra), grouped
/// by node count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathResultData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Node>,
    pub paths: BTreeMap<usize, Vec<Path>>,
}

impl PathResultData {
    pub fn total_paths(&self) -> usize {
        self.paths.values().map(Vec::len).sum()
    }
}

/// Shared-downstream-target or shared-upstream-regulator results: two
/// parallel, co-ordered edge sequences where entry *i* on each side
/// corresponds to the same shared neighbor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharedInteractorsResults {
    pub source_data: Vec<EdgeData>,
    pub target_data: Vec<EdgeData>,
    /// `true` for shared targets, `false` for shared regulators.
    pub downstream: bool,
}

/// Shared-ontological-parent results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologyResults {
    pub source: Node,
    pub target: Node,
    /// Sorted by `(name, namespace, identifier)`.
    pub parents: Vec<Node>,
}

/// The induced-subgraph query's results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubgraphResults {
    pub requested: Vec<String>,
    pub resolved: Vec<Node>,
    pub not_in_graph: Vec<String>,
    pub edges: Vec<EdgeDataByHash>,
}

/// The top-level response for a single search specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub query_hash: String,
    pub time_limit: f64,
    pub timed_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward: Option<PathResultData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<PathResultData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ontology: Option<OntologyResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_targets: Option<SharedInteractorsResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_regulators: Option<SharedInteractorsResults>,
}

impl Response {
    pub fn empty(query_hash: String, time_limit: f64) -> Self {
        Self {
            query_hash,
            time_limit,
            timed_out: false,
            forward: None,
            reverse: None,
            ontology: None,
            shared_targets: None,
            shared_regulators: None,
        }
    }
}
