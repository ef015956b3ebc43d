//! BFS: a breadth-first discovery tree from one start node, bounded by edge
//! depth and per-node fan-out.
//!
//! Unlike [`super::ssp::ShortestSimplePaths`], a node is only ever
//! discovered once — a node reached through more than one immediate
//! predecessor in the frontier keeps its first discovery path and is not
//! revisited through any other ("visited once" tree semantics, not "all
//! simple paths").

use std::collections::VecDeque;

use ahash::AHashSet;

use crate::graph::Adjacency;

use super::feedback::PathStream;

/// Open breadth-first search from `start`, honoring the node-filter and
/// per-edge predicate this family enforces internally rather than leaving
/// to its result manager.
pub struct Bfs<'g, G: Adjacency> {
    graph: &'g G,
    start: G::Node,
    reverse: bool,
    depth_limit: u32,
    max_per_node: Option<u32>,
    allowed_ns: Vec<String>,
    node_blacklist: AHashSet<String>,
    terminal_ns: Vec<String>,
    namespace_of: Box<dyn Fn(&str) -> Option<String> + 'g>,
    predicate: Option<Box<dyn Fn(&G::Node, &G::Node) -> bool + 'g>>,
    ignored: AHashSet<G::Node>,
    emitted: AHashSet<Vec<G::Node>>,
    cache: Vec<Vec<G::Node>>,
    cursor: usize,
}

#[allow(clippy::too_many_arguments)]
impl<'g, G: Adjacency> Bfs<'g, G> {
    pub fn new(
        graph: &'g G,
        start: G::Node,
        reverse: bool,
        depth_limit: u32,
        max_per_node: Option<u32>,
        allowed_ns: Vec<String>,
        node_blacklist: impl IntoIterator<Item = String>,
        terminal_ns: Vec<String>,
        namespace_of: Box<dyn Fn(&str) -> Option<String> + 'g>,
        predicate: Option<Box<dyn Fn(&G::Node, &G::Node) -> bool + 'g>>,
    ) -> Self {
        let mut this = Self {
            graph,
            start,
            reverse,
            depth_limit,
            max_per_node,
            allowed_ns,
            node_blacklist: node_blacklist.into_iter().collect(),
            terminal_ns,
            namespace_of,
            predicate,
            ignored: AHashSet::new(),
            emitted: AHashSet::new(),
            cache: Vec::new(),
            cursor: 0,
        };
        this.recompute();
        this
    }

    fn recompute(&mut self) {
        let mut visited = AHashSet::new();
        visited.insert(self.start.clone());
        let mut queue = VecDeque::new();
        queue.push_back(vec![self.start.clone()]);
        let mut results = Vec::new();

        while let Some(path) = queue.pop_front() {
            let depth = path.len() as u32 - 1;
            if depth >= self.depth_limit {
                continue;
            }
            let last = path.last().unwrap().clone();
            let last_name = self.graph.name_of(&last).to_string();
            if self.in_terminal_ns(&last_name) {
                continue;
            }
            let neighbors = if self.reverse {
                self.graph.pred(&last)
            } else {
                self.graph.succ(&last)
            };
            let mut added = 0u32;
            for next in neighbors {
                if let Some(cap) = self.max_per_node {
                    if added >= cap {
                        break;
                    }
                }
                if visited.contains(&next) || self.ignored.contains(&next) {
                    continue;
                }
                let next_name = self.graph.name_of(&next).to_string();
                if self.node_blacklist.contains(&next_name) {
                    continue;
                }
                if !self.allowed_ns.is_empty() && !self.in_allowed_ns(&next_name) {
                    continue;
                }
                if let Some(pred) = &self.predicate {
                    if !pred(&last, &next) {
                        continue;
                    }
                }
                visited.insert(next.clone());
                added += 1;
                let mut extended = path.clone();
                extended.push(next.clone());
                results.push(extended.clone());
                queue.push_back(extended);
            }
        }

        self.cache = results;
        self.cursor = 0;
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

    fn in_allowed_ns(&self, name: &str) -> bool {
        match (self.namespace_of)(name) {
            Some(ns) => self.allowed_ns.iter().any(|a| a.eq_ignore_ascii_case(&ns)),
            None => false,
        }
    }
}

impl<'g, G: Adjacency> PathStream for Bfs<'g, G> {
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
        self.ignored.extend(nodes.iter().cloned());
        self.recompute();
    }
}
