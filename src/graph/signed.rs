//! The signed-node graph: node identity is a `(name, sign)` pair,
//! constructed offline from the unsigned graph via a doubling transform.
//! The core never re-derives a sign from statement types at query time —
//! it only reads the `sign` each [`crate::graph::EdgeRecord`] already
//! carries.

use ahash::AHashMap;

use super::GraphStore;

/// A signed node handle: a display name plus 0 (up) or 1 (down).
pub type SignedNode = (String, u8);

/// The signed-node graph, built once from an unsigned [`GraphStore`].
///
/// For every unsigned edge `u -> v` with relation sign `s` (0 = activating,
/// 1 = inhibiting; edges with no polarity are treated as activating), the
/// doubling transform adds two signed edges: `(u,0) -> (v,s)` and
/// `(u,1) -> (v,1-s)`. A signed edge's own `sign` is the XOR of its two
/// endpoint signs, which by construction always equals `s`.
#[derive(Debug, Clone, Default)]
pub struct SignedGraph {
    succ: AHashMap<SignedNode, Vec<SignedNode>>,
    pred: AHashMap<SignedNode, Vec<SignedNode>>,
}

impl SignedGraph {
    pub fn from_unsigned(store: &GraphStore) -> Self {
        let mut succ: AHashMap<SignedNode, Vec<SignedNode>> = AHashMap::new();
        let mut pred: AHashMap<SignedNode, Vec<SignedNode>> = AHashMap::new();

        for (u, v, record) in store.edge_iter() {
            let relation_sign = record.sign.unwrap_or(0);
            for su in 0u8..=1 {
                let sv = su ^ relation_sign;
                let from = (u.to_string(), su);
                let to = (v.to_string(), sv);
                succ.entry(from.clone()).or_default().push(to.clone());
                pred.entry(to).or_default().push(from);
            }
        }

        Self { succ, pred }
    }

    pub fn succ(&self, node: &SignedNode) -> &[SignedNode] {
        self.succ.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pred(&self, node: &SignedNode) -> &[SignedNode] {
        self.pred.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Derived edge sign: XOR of the two endpoints' signs.
    pub fn edge_sign(from: &SignedNode, to: &SignedNode) -> u8 {
        from.1 ^ to.1
    }
}
