//! Shared decoration helpers used by every result manager: node
//! lookup, statement filtering, and edge assembly.

use std::collections::BTreeMap;

use crate::external::{db_url_edge, IdentifierUrlService};
use crate::graph::GraphStore;
use crate::model::{EdgeData, Node, StmtData};
use crate::spec::FilterSet;

/// Builds a [`Node`] from the graph's attributes for `name`, carrying
/// `sign` through if the caller is addressing the signed graph. Returns
/// `None` if `name` is not in the graph.
pub fn lookup_node(
    store: &GraphStore,
    name: &str,
    sign: Option<u8>,
    url_service: &dyn IdentifierUrlService,
) -> Option<Node> {
    let attrs = store.attrs(name)?;
    let lookup = url_service.url(&attrs.namespace, &attrs.identifier);
    let mut node = Node::new(name, attrs.namespace.clone(), attrs.identifier.clone()).with_lookup(lookup);
    if let Some(s) = sign {
        node = node.with_sign(s);
    }
    Some(node)
}

/// Applies the filter set's statement-level predicates in cheapest-first
/// order: type inclusion, belief cutoff, curated flag, hash blacklist.
pub fn statement_passes(stmt: &StmtData, filters: &FilterSet) -> bool {
    if !filters.exclude_stmts.is_empty()
        && !filters.exclude_stmts.contains(&stmt.stmt_type.to_lowercase())
    {
        return false;
    }
    if let Some(cutoff) = filters.belief_cutoff {
        if stmt.belief <= cutoff {
            return false;
        }
    }
    if filters.curated_db_only && !stmt.curated {
        return false;
    }
    if filters.hash_blacklist.contains(&stmt.stmt_hash) {
        return false;
    }
    true
}

/// Fetches `(a, b)`'s raw edge attributes, filters its statements, groups
/// survivors by statement type, and returns `None` if the edge has no
/// surviving statements or either endpoint is not in the graph.
pub fn assemble_edge(
    store: &GraphStore,
    a_name: &str,
    a_sign: Option<u8>,
    b_name: &str,
    b_sign: Option<u8>,
    filters: &FilterSet,
    url_service: &dyn IdentifierUrlService,
) -> Option<EdgeData> {
    let record = store.edge_attrs(a_name, b_name)?;

    let mut grouped: BTreeMap<String, Vec<StmtData>> = BTreeMap::new();
    for stmt in &record.statements {
        if statement_passes(stmt, filters) {
            grouped.entry(stmt.stmt_type.clone()).or_default().push(stmt.clone());
        }
    }
    if grouped.is_empty() {
        return None;
    }

    let source = lookup_node(store, a_name, a_sign, url_service)?;
    let target = lookup_node(store, b_name, b_sign, url_service)?;
    let sign = match (a_sign, b_sign) {
        (Some(x), Some(y)) => Some(x ^ y),
        _ => record.sign,
    };
    let url = db_url_edge(&source.namespace, &source.identifier, &target.namespace, &target.identifier);

    Some(EdgeData {
        source,
        target,
        statements: grouped,
        belief: record.belief,
        weight: record.weight,
        sign,
        context_weight: record.context_weight,
        url,
    })
}
