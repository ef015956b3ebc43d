//! SubgraphEdges: the edges incident to a requested set of nodes — each
//! node's in-edges and out-edges, unioned and deduplicated by endpoint
//! pair.

use ahash::AHashSet;

use crate::graph::Adjacency;

/// Returns every distinct `(u, v)` edge incident to any node in
/// `resolved_nodes` (as a source or a target), in discovery order.
pub fn incident_edges<G: Adjacency>(graph: &G, resolved_nodes: &[G::Node]) -> Vec<(G::Node, G::Node)> {
    let mut seen = AHashSet::new();
    let mut edges = Vec::new();
    for node in resolved_nodes {
        for v in graph.succ(node) {
            if seen.insert((node.clone(), v.clone())) {
                edges.push((node.clone(), v));
            }
        }
        for u in graph.pred(node) {
            if seen.insert((u.clone(), node.clone())) {
                edges.push((u, node.clone()));
            }
        }
    }
    edges
}
