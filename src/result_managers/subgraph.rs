//! Subgraph result manager: resolves the requested node list against the
//! graph, then streams and dedups the induced edges.

use std::collections::BTreeMap;

use crate::algorithms::subgraph::incident_edges;
use crate::external::{db_url_edge, IdentifierUrlService};
use crate::graph::GraphStore;
use crate::model::{EdgeDataByHash, Node, StmtData, SubgraphResults};
use crate::spec::SubgraphNodeRef;

/// Statement type treated as ontology-hierarchy scaffolding rather than
/// causal evidence; edges whose sole statement type is this sentinel are
/// dropped from subgraph edge output.
const FPLX_SENTINEL: &str = "fplx";

fn classify(store: &GraphStore, requested: &SubgraphNodeRef) -> Option<String> {
    // (a) resolvable by (namespace, identifier) -> canonical graph handle.
    if let Some(name) = store.node_by_ns_id(&requested.namespace, &requested.identifier) {
        return Some(name.to_string());
    }
    // (b) resolvable by name, with possibly corrected namespace/identifier.
    if store.contains_node(&requested.name) {
        return Some(requested.name.clone());
    }
    None
}

pub fn run(store: &GraphStore, requested: &[SubgraphNodeRef], url_service: &dyn IdentifierUrlService) -> SubgraphResults {
    let mut resolved_names = Vec::new();
    let mut resolved_nodes = Vec::new();
    let mut not_in_graph = Vec::new();

    for req in requested {
        match classify(store, req) {
            Some(name) => {
                if let Some(attrs) = store.attrs(&name) {
                    resolved_nodes.push(Node::new(name.clone(), attrs.namespace.clone(), attrs.identifier.clone()));
                    resolved_names.push(name);
                } else {
                    not_in_graph.push(req.name.clone());
                }
            }
            None => not_in_graph.push(req.name.clone()),
        }
    }

    let mut by_pair: BTreeMap<(String, String), EdgeDataByHash> = BTreeMap::new();
    for (u, v) in incident_edges(store, &resolved_names) {
        let key = (u.clone(), v.clone());
        if by_pair.contains_key(&key) {
            continue;
        }
        let Some(record) = store.edge_attrs(&u, &v) else { continue };

        let sole_type_is_fplx = !record.statements.is_empty()
            && record
                .statements
                .iter()
                .all(|s| s.stmt_type.eq_ignore_ascii_case(FPLX_SENTINEL));
        if sole_type_is_fplx {
            continue;
        }

        let Some(source_attrs) = store.attrs(&u) else { continue };
        let Some(target_attrs) = store.attrs(&v) else { continue };
        let source = Node::new(u.clone(), source_attrs.namespace.clone(), source_attrs.identifier.clone())
            .with_lookup(url_service.url(&source_attrs.namespace, &source_attrs.identifier));
        let target = Node::new(v.clone(), target_attrs.namespace.clone(), target_attrs.identifier.clone())
            .with_lookup(url_service.url(&target_attrs.namespace, &target_attrs.identifier));

        let mut statements: BTreeMap<i64, StmtData> = BTreeMap::new();
        for stmt in &record.statements {
            statements.insert(stmt.stmt_hash, stmt.clone());
        }
        let url = db_url_edge(&source.namespace, &source.identifier, &target.namespace, &target.identifier);

        by_pair.insert(
            key,
            EdgeDataByHash {
                source,
                target,
                statements,
                belief: record.belief,
                weight: record.weight,
                sign: record.sign,
                context_weight: record.context_weight,
                url,
            },
        );
    }

    SubgraphResults {
        requested: requested.iter().map(|n| n.name.clone()).collect(),
        resolved: resolved_nodes,
        not_in_graph,
        edges: by_pair.into_values().collect(),
    }
}
