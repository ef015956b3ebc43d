//! The unsigned causal graph: read-only adjacency, node attributes, and
//! edge attributes.
//!
//! Loading from an upstream dump is out of scope; this module only
//! specifies the read surface the query pipeline relies on, plus a plain
//! in-memory builder used by tests and the demonstration CLI.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::model::StmtData;

/// A node's graph-identity attributes. `name` is the adjacency key and is
/// carried separately (as the map key in [`GraphStore`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeAttrs {
    pub namespace: String,
    pub identifier: String,
}

/// One directed edge's raw attributes, as read from the graph (before
/// result-manager filtering decorates it into an [`crate::model::EdgeData`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub statements: Vec<StmtData>,
    pub belief: f64,
    pub weight: f64,
    pub context_weight: Option<f64>,
    /// The edge's own relation sign (0 = activating, 1 = inhibiting),
    /// precomputed offline from its statement types. Absent for edges with
    /// no clear polarity (e.g. `Complex`).
    pub sign: Option<u8>,
}

/// The in-memory, read-only causal graph.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: AHashMap<String, NodeAttrs>,
    by_ns_id: AHashMap<(String, String), String>,
    edges: AHashMap<(String, String), EdgeRecord>,
    succ: AHashMap<String, Vec<String>>,
    pred: AHashMap<String, Vec<String>>,
}

impl GraphStore {
    pub fn builder() -> GraphStoreBuilder {
        GraphStoreBuilder::default()
    }

    /// `attrs(n) → {namespace, identifier, …}`, absent if `n` is unknown.
    pub fn attrs(&self, name: &str) -> Option<&NodeAttrs> {
        self.nodes.get(name)
    }

    /// The by-`(ns, id)` reverse index.
    pub fn node_by_ns_id(&self, namespace: &str, identifier: &str) -> Option<&str> {
        self.by_ns_id
            .get(&(namespace.to_string(), identifier.to_string()))
            .map(String::as_str)
    }

    /// `edge_attrs(u, v)`, absent if there is no edge.
    pub fn edge_attrs(&self, u: &str, v: &str) -> Option<&EdgeRecord> {
        self.edges.get(&(u.to_string(), v.to_string()))
    }

    /// Forward adjacency.
    pub fn succ(&self, name: &str) -> &[String] {
        self.succ.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Reverse adjacency.
    pub fn pred(&self, name: &str) -> &[String] {
        self.pred.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Degree used for node-culling: total in- plus out-degree, unweighted.
    /// Weighted degree is not needed there — culling is about
    /// connectivity, not cost.
    pub fn degree(&self, name: &str) -> usize {
        self.succ(name).len() + self.pred(name).len()
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = (&str, &str, &EdgeRecord)> {
        self.edges
            .iter()
            .map(|((u, v), rec)| (u.as_str(), v.as_str(), rec))
    }

    /// Loads a graph from the small JSON fixture format used by the
    /// demonstration binary and integration tests — not a wire protocol,
    /// just a flat `{nodes, edges}` document with [`NodeAttrs`]/[`EdgeRecord`]
    /// shapes. This is only ever a hand-built or test-generated file, never
    /// a dump from an upstream source.
    ///
    /// A malformed node or edge envelope (missing `source`/`belief`/...) is a
    /// structural error and aborts the whole load. A malformed *statement*
    /// inside an otherwise well-formed edge is not: it's logged at `warn` and
    /// dropped, and the edge loads with whatever statements did validate.
    pub fn from_fixture_json(json: &str) -> crate::error::Result<Self> {
        let fixture: GraphFixture = serde_json::from_str(json)?;
        let mut builder = Self::builder();
        for n in fixture.nodes {
            builder = builder.node(n.name, n.namespace, n.identifier);
        }
        for e in fixture.edges {
            let statements = e
                .statements
                .into_iter()
                .filter_map(|raw| match serde_json::from_value::<StmtData>(raw) {
                    Ok(stmt) => Some(stmt),
                    Err(err) => {
                        tracing::warn!(
                            source = %e.source,
                            target = %e.target,
                            error = %err,
                            "dropping malformed statement"
                        );
                        None
                    }
                })
                .collect();
            let record = EdgeRecord {
                statements,
                belief: e.belief,
                weight: e.weight,
                context_weight: e.context_weight,
                sign: e.sign,
            };
            builder = builder.edge(e.source, e.target, record);
        }
        Ok(builder.build())
    }
}

#[derive(Debug, Deserialize)]
struct GraphFixture {
    nodes: Vec<FixtureNode>,
    #[serde(default)]
    edges: Vec<FixtureEdge>,
}

#[derive(Debug, Deserialize)]
struct FixtureNode {
    name: String,
    namespace: String,
    identifier: String,
}

/// An edge envelope whose structural fields (`source`/`target`/`belief`/...)
/// deserialize strictly, but whose `statements` are captured as raw JSON and
/// validated one at a time in [`GraphStore::from_fixture_json`] instead of
/// failing the whole edge.
#[derive(Debug, Deserialize)]
struct FixtureEdge {
    source: String,
    target: String,
    belief: f64,
    weight: f64,
    #[serde(default)]
    context_weight: Option<f64>,
    #[serde(default)]
    sign: Option<u8>,
    #[serde(default)]
    statements: Vec<serde_json::Value>,
}

/// Builds a [`GraphStore`] by inserting nodes and edges, maintaining the
/// adjacency indices as it goes.
#[derive(Debug, Default)]
pub struct GraphStoreBuilder {
    inner: GraphStore,
}

impl GraphStoreBuilder {
    pub fn node(mut self, name: impl Into<String>, namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        let name = name.into();
        let namespace = namespace.into();
        let identifier = identifier.into();
        self.inner.by_ns_id.insert((namespace.clone(), identifier.clone()), name.clone());
        self.inner.nodes.insert(name, NodeAttrs { namespace, identifier });
        self
    }

    pub fn edge(mut self, u: impl Into<String>, v: impl Into<String>, record: EdgeRecord) -> Self {
        let u = u.into();
        let v = v.into();
        self.inner.succ.entry(u.clone()).or_default().push(v.clone());
        self.inner.pred.entry(v.clone()).or_default().push(u.clone());
        self.inner.edges.insert((u, v), record);
        self
    }

    pub fn build(self) -> GraphStore {
        self.inner
    }
}
