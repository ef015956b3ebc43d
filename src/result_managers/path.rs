//! Path result manager: the shared consumer behind SSP, BFS, and
//! Dijkstra. Wraps a [`PathStream`], enforces the deadline and result cap,
//! drives node culling, and assembles [`PathResultData`].

use std::time::{Duration, Instant};

use crate::algorithms::PathStream;
use crate::external::IdentifierUrlService;
use crate::graph::GraphStore;
use crate::model::{Node, Path, PathResultData};
use crate::spec::FilterSet;

use super::common::{assemble_edge, lookup_node};

/// Drives one path stream to completion under a time and count budget.
///
/// `extract` pulls `(name, sign)` out of the stream's node handle type
/// (identity for the unsigned graph, first/second tuple element for the
/// signed graph); `to_ignore` builds the node handle(s) to hand back to
/// the stream for a culled node name (one handle for the unsigned graph,
/// both signed variants for the signed graph, since culling drops a node
/// from the search regardless of which sign it was reached at).
pub struct PathResultManager<'a, S: PathStream> {
    stream: S,
    graph: &'a GraphStore,
    filters: FilterSet,
    timeout: Duration,
    reverse_output: bool,
    extract: Box<dyn Fn(&S::Node) -> (String, Option<u8>) + 'a>,
    to_ignore: Box<dyn Fn(&str) -> Vec<S::Node> + 'a>,
    url_service: &'a dyn IdentifierUrlService,
}

/// Outcome of running a [`PathResultManager`] to completion.
pub struct PathRunResult {
    pub data: PathResultData,
    pub timed_out: bool,
}

impl<'a, S: PathStream> PathResultManager<'a, S> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stream: S,
        graph: &'a GraphStore,
        filters: FilterSet,
        timeout: Duration,
        reverse_output: bool,
        extract: Box<dyn Fn(&S::Node) -> (String, Option<u8>) + 'a>,
        to_ignore: Box<dyn Fn(&str) -> Vec<S::Node> + 'a>,
        url_service: &'a dyn IdentifierUrlService,
    ) -> Self {
        Self {
            stream,
            graph,
            filters,
            timeout,
            reverse_output,
            extract,
            to_ignore,
            url_service,
        }
    }

    pub fn run(mut self, source: Option<Node>, target: Option<Node>) -> PathRunResult {
        let start = Instant::now();
        let mut data = PathResultData {
            source,
            target,
            paths: Default::default(),
        };
        let mut timed_out = false;
        let mut total = 0usize;
        let mut since_cull = 0u32;
        let mut prev_names: Option<Vec<String>> = None;

        loop {
            if start.elapsed() >= self.timeout {
                timed_out = true;
                break;
            }
            if total >= self.filters.max_paths {
                break;
            }

            if let Some(cull_every) = self.filters.cull_best_node {
                if since_cull >= cull_every {
                    if let Some(prev) = &prev_names {
                        if prev.len() >= 3 {
                            if let Some(best) = prev[1..prev.len() - 1]
                                .iter()
                                .max_by_key(|n| self.graph.degree(n))
                            {
                                let handles = (self.to_ignore)(best);
                                self.stream.add_ignored_nodes(&handles);
                            }
                        }
                    }
                    since_cull = 0;
                }
            }

            let Some(mut raw) = self.stream.next_path() else {
                break;
            };
            if self.reverse_output {
                raw.reverse();
            }

            let endpoints: Vec<(String, Option<u8>)> = raw.iter().map(|n| (self.extract)(n)).collect();
            let names: Vec<String> = endpoints.iter().map(|(n, _)| n.clone()).collect();

            if let Some(expected_len) = self.filters.path_length {
                if !self.filters.overall_weighted {
                    let expected_len = expected_len as usize;
                    if names.len() < expected_len {
                        continue;
                    }
                    if names.len() > expected_len {
                        break;
                    }
                }
            }

            if !self.filters.allowed_ns.is_empty() && names.len() > 2 {
                let interior_ok = names[1..names.len() - 1].iter().all(|n| {
                    self.graph
                        .attrs(n)
                        .map(|a| {
                            self.filters
                                .allowed_ns
                                .iter()
                                .any(|ns| ns.eq_ignore_ascii_case(&a.namespace))
                        })
                        .unwrap_or(false)
                });
                if !interior_ok {
                    prev_names = Some(names);
                    continue;
                }
            }

            let mut edges = Vec::with_capacity(endpoints.len().saturating_sub(1));
            let mut ok = true;
            for pair in endpoints.windows(2) {
                let (a_name, a_sign) = &pair[0];
                let (b_name, b_sign) = &pair[1];
                match assemble_edge(self.graph, a_name, *a_sign, b_name, *b_sign, &self.filters, self.url_service) {
                    Some(edge) => edges.push(edge),
                    None => {
                        ok = false;
                        break;
                    }
                }
            }
            if !ok {
                prev_names = Some(names);
                continue;
            }

            let nodes: Option<Vec<Node>> = endpoints
                .iter()
                .map(|(n, s)| lookup_node(self.graph, n, *s, self.url_service))
                .collect();
            let Some(nodes) = nodes else {
                prev_names = Some(names);
                continue;
            };

            let path = Path { nodes, edges };
            let len = path.len();
            data.paths.entry(len).or_default().push(path);
            total += 1;
            since_cull += 1;
            prev_names = Some(names);
        }

        PathRunResult { data, timed_out }
    }
}
