//! Shared-interactors result manager.

use std::time::{Duration, Instant};

use crate::external::IdentifierUrlService;
use crate::graph::GraphStore;
use crate::model::SharedInteractorsResults;
use crate::spec::FilterSet;

use super::common::assemble_edge;

pub struct SharedInteractorsRunResult {
    pub data: SharedInteractorsResults,
    pub timed_out: bool,
}

/// Consumes `(source_name, target_name, shared_neighbor_name)` triples
/// (already coarsely admitted by [`crate::algorithms::shared_interactors::run`]),
/// rebuilds each side's `EdgeData` with the exact per-statement filter,
/// and emits the pair only if both sides still survive.
pub fn run(
    graph: &GraphStore,
    filters: &FilterSet,
    timeout: Duration,
    downstream: bool,
    candidates: Vec<(String, String, String)>,
    url_service: &dyn IdentifierUrlService,
) -> SharedInteractorsRunResult {
    let start = Instant::now();
    let mut data = SharedInteractorsResults {
        source_data: Vec::new(),
        target_data: Vec::new(),
        downstream,
    };
    let mut timed_out = false;

    for (source, target, x) in candidates {
        if start.elapsed() >= timeout {
            timed_out = true;
            break;
        }
        if data.source_data.len() >= filters.max_paths {
            break;
        }
        let (source_edge, target_edge) = if downstream {
            (
                assemble_edge(graph, &source, None, &x, None, filters, url_service),
                assemble_edge(graph, &target, None, &x, None, filters, url_service),
            )
        } else {
            (
                assemble_edge(graph, &x, None, &source, None, filters, url_service),
                assemble_edge(graph, &x, None, &target, None, filters, url_service),
            )
        };
        if let (Some(s), Some(t)) = (source_edge, target_edge) {
            data.source_data.push(s);
            data.target_data.push(t);
        }
    }

    SharedInteractorsRunResult { data, timed_out }
}
