//! The in-memory graph store and its signed-node variant.

mod signed;
mod store;

pub use signed::{SignedGraph, SignedNode};
pub use store::{EdgeRecord, GraphStore};

/// Common adjacency surface the path-finding algorithms run against,
/// implemented once for the unsigned graph (`Node = String`) and once for
/// the signed-node graph (`Node = (String, u8)`), so `algorithms::*` does
/// not need to be duplicated per graph kind.
pub trait Adjacency {
    type Node: Clone + Eq + std::hash::Hash + Ord + std::fmt::Debug;

    fn succ(&self, n: &Self::Node) -> Vec<Self::Node>;
    fn pred(&self, n: &Self::Node) -> Vec<Self::Node>;
    /// The display name carried by a node handle (identical to the handle
    /// itself for the unsigned graph, the first element of the pair for
    /// the signed graph).
    fn name_of<'a>(&self, n: &'a Self::Node) -> &'a str;
}

impl Adjacency for GraphStore {
    type Node = String;

    fn succ(&self, n: &String) -> Vec<String> {
        GraphStore::succ(self, n).to_vec()
    }

    fn pred(&self, n: &String) -> Vec<String> {
        GraphStore::pred(self, n).to_vec()
    }

    fn name_of<'a>(&self, n: &'a String) -> &'a str {
        n.as_str()
    }
}

impl Adjacency for SignedGraph {
    type Node = SignedNode;

    fn succ(&self, n: &SignedNode) -> Vec<SignedNode> {
        SignedGraph::succ(self, n).to_vec()
    }

    fn pred(&self, n: &SignedNode) -> Vec<SignedNode> {
        SignedGraph::pred(self, n).to_vec()
    }

    fn name_of<'a>(&self, n: &'a SignedNode) -> &'a str {
        n.0.as_str()
    }
}
