//! Open-ended Dijkstra: single-source shortest paths from one start node
//! to every node it can reach, yielded in nondecreasing weight order as
//! each is finalized.
//!
//! Implemented here as a plain O(V²) Dijkstra relaxation, which is
//! adequate at the graph sizes this crate targets and avoids pulling in a
//! binary-heap ordering wrapper for `f64`.

use ahash::{AHashMap, AHashSet};

use crate::graph::Adjacency;

use super::feedback::PathStream;

pub struct Dijkstra<'g, G: Adjacency> {
    graph: &'g G,
    start: G::Node,
    reverse: bool,
    ignore_nodes: AHashSet<G::Node>,
    ignore_edges: AHashSet<(G::Node, G::Node)>,
    terminal_ns: Vec<String>,
    namespace_of: Box<dyn Fn(&str) -> Option<String> + 'g>,
    weight: Box<dyn Fn(&G::Node, &G::Node) -> f64 + 'g>,
    emitted: AHashSet<Vec<G::Node>>,
    cache: Vec<Vec<G::Node>>,
    cursor: usize,
}

#[allow(clippy::too_many_arguments)]
impl<'g, G: Adjacency> Dijkstra<'g, G> {
    pub fn new(
        graph: &'g G,
        start: G::Node,
        reverse: bool,
        ignore_nodes: impl IntoIterator<Item = G::Node>,
        ignore_edges: impl IntoIterator<Item = (G::Node, G::Node)>,
        terminal_ns: Vec<String>,
        namespace_of: Box<dyn Fn(&str) -> Option<String> + 'g>,
        weight: Box<dyn Fn(&G::Node, &G::Node) -> f64 + 'g>,
    ) -> Self {
        let mut this = Self {
            graph,
            start,
            reverse,
            ignore_nodes: ignore_nodes.into_iter().collect(),
            ignore_edges: ignore_edges.into_iter().collect(),
            terminal_ns,
            namespace_of,
            weight,
            emitted: AHashSet::new(),
            cache: Vec::new(),
            cursor: 0,
        };
        this.recompute();
        this
    }

    fn in_terminal_ns(&self, name: &str) -> bool {
        if self.terminal_ns.is_empty() {
            return false;
        }
        match (self.namespace_of)(name) {
            Some(ns) => self.terminal_ns.iter().any(|t| t.eq_ignore_ascii_case(&ns)),
            None => false,
        }
    }

    fn recompute(&mut self) {
        let mut dist: AHashMap<G::Node, f64> = AHashMap::new();
        let mut prev: AHashMap<G::Node, G::Node> = AHashMap::new();
        let mut finalized: AHashSet<G::Node> = AHashSet::new();
        dist.insert(self.start.clone(), 0.0);
        let mut order: Vec<G::Node> = Vec::new();

        loop {
            let mut best: Option<(G::Node, f64)> = None;
            for (n, d) in dist.iter() {
                if finalized.contains(n) {
                    continue;
                }
                if best.as_ref().map(|(_, bd)| *d < *bd).unwrap_or(true) {
                    best = Some((n.clone(), *d));
                }
            }
            let Some((u, du)) = best else { break };
            finalized.insert(u.clone());
            order.push(u.clone());

            let u_name = self.graph.name_of(&u).to_string();
            if self.in_terminal_ns(&u_name) {
                continue;
            }
            let neighbors = if self.reverse {
                self.graph.pred(&u)
            } else {
                self.graph.succ(&u)
            };
            for v in neighbors {
                if finalized.contains(&v) || self.ignore_nodes.contains(&v) {
                    continue;
                }
                if self.ignore_edges.contains(&(u.clone(), v.clone())) {
                    continue;
                }
                let nd = du + (self.weight)(&u, &v);
                let better = dist.get(&v).map(|d| nd < *d).unwrap_or(true);
                if better {
                    dist.insert(v.clone(), nd);
                    prev.insert(v.clone(), u.clone());
                }
            }
        }

        let mut results = Vec::new();
        for n in &order {
            if *n == self.start {
                continue;
            }
            let mut path = vec![n.clone()];
            let mut cur = n.clone();
            while let Some(p) = prev.get(&cur) {
                path.push(p.clone());
                cur = p.clone();
            }
            path.reverse();
            results.push(path);
        }
        self.cache = results;
        self.cursor = 0;
    }
}

impl<'g, G: Adjacency> PathStream for Dijkstra<'g, G> {
    type Node = G::Node;

    fn next_path(&mut self) -> Option<Vec<G::Node>> {
        loop {
            if self.cursor >= self.cache.len() {
                return None;
            }
            let candidate = self.cache[self.cursor].clone();
            self.cursor += 1;
            if !self.emitted.contains(&candidate) {
                self.emitted.insert(candidate.clone());
                return Some(candidate);
            }
        }
    }

    fn add_ignored_nodes(&mut self, nodes: &[G::Node]) {
        self.ignore_nodes.extend(nodes.iter().cloned());
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeRecord, GraphStore};

    #[test]
    fn yields_nondecreasing_distance_order() {
        let g = GraphStore::builder()
            .node("A", "HGNC", "1")
            .node("B", "HGNC", "2")
            .node("C", "HGNC", "3")
            .edge("A", "B", EdgeRecord::default())
            .edge("B", "C", EdgeRecord::default())
            .edge("A", "C", EdgeRecord::default())
            .build();
        let mut dij = Dijkstra::new(
            &g,
            "A".to_string(),
            false,
            [],
            [],
            Vec::new(),
            Box::new(|_| None),
            Box::new(|_, _| 1.0),
        );
        let first = dij.next_path().unwrap();
        assert_eq!(first.len(), 2);
    }
}
