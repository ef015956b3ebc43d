//! SharedInteractors: common downstream targets or upstream regulators of
//! two nodes.
//!
//! Filtering here is coarse and neighbor-scoped: a candidate neighbor
//! survives a filter if *any* supporting statement of the relevant edge
//! passes it. The exact, per-statement drop rule used for path results is
//! applied later by the result manager when it assembles the final
//! `EdgeData` for an admitted pair.

use ahash::AHashSet;

use crate::graph::Adjacency;
use crate::model::StmtData;

fn stmt_passes(
    stmt: &StmtData,
    stmt_types: &[String],
    hash_blacklist: &[i64],
    belief_cutoff: Option<f64>,
    curated_only: bool,
) -> bool {
    if !stmt_types.is_empty() && !stmt_types.contains(&stmt.stmt_type.to_lowercase()) {
        return false;
    }
    if hash_blacklist.contains(&stmt.stmt_hash) {
        return false;
    }
    if let Some(cutoff) = belief_cutoff {
        if stmt.belief <= cutoff {
            return false;
        }
    }
    if curated_only && !stmt.curated {
        return false;
    }
    true
}

fn side_survives(
    stmts: &[StmtData],
    stmt_types: &[String],
    hash_blacklist: &[i64],
    belief_cutoff: Option<f64>,
    curated_only: bool,
) -> bool {
    stmts
        .iter()
        .any(|s| stmt_passes(s, stmt_types, hash_blacklist, belief_cutoff, curated_only))
}

fn max_belief(stmts: &[StmtData]) -> f64 {
    stmts.iter().map(|s| s.belief).fold(0.0, f64::max)
}

/// Parameters for one shared-interactors invocation. Constructed by
/// [`crate::algorithms::shared_interactors::run`]'s caller (the planner)
/// from a validated spec.
#[allow(clippy::too_many_arguments)]
pub fn run<G: Adjacency>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    downstream: bool,
    max_results: usize,
    allowed_ns: &[String],
    stmt_types: &[String],
    node_blacklist: &AHashSet<String>,
    hash_blacklist: &[i64],
    belief_cutoff: Option<f64>,
    curated_only: bool,
    namespace_of: impl Fn(&str) -> Option<String>,
    edge_stmts: impl Fn(&G::Node, &G::Node) -> Vec<StmtData>,
) -> Vec<(G::Node, G::Node, G::Node)> {
    let source_neighbors: AHashSet<G::Node> = if downstream {
        graph.succ(source).into_iter().collect()
    } else {
        graph.pred(source).into_iter().collect()
    };
    let target_neighbors: AHashSet<G::Node> = if downstream {
        graph.succ(target).into_iter().collect()
    } else {
        graph.pred(target).into_iter().collect()
    };

    let mut candidates: Vec<(G::Node, f64)> = Vec::new();
    for x in source_neighbors.intersection(&target_neighbors) {
        let x_name = graph.name_of(x).to_string();
        if node_blacklist.contains(&x_name) {
            continue;
        }
        if !allowed_ns.is_empty() {
            let ok = namespace_of(&x_name)
                .map(|ns| allowed_ns.iter().any(|a| a.eq_ignore_ascii_case(&ns)))
                .unwrap_or(false);
            if !ok {
                continue;
            }
        }
        let (source_stmts, target_stmts) = if downstream {
            (edge_stmts(source, x), edge_stmts(target, x))
        } else {
            (edge_stmts(x, source), edge_stmts(x, target))
        };
        if !side_survives(&source_stmts, stmt_types, hash_blacklist, belief_cutoff, curated_only)
            || !side_survives(&target_stmts, stmt_types, hash_blacklist, belief_cutoff, curated_only)
        {
            continue;
        }
        let key = max_belief(&source_stmts).min(max_belief(&target_stmts));
        candidates.push((x.clone(), key));
    }

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(max_results);
    candidates
        .into_iter()
        .map(|(x, _)| (source.clone(), target.clone(), x))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeRecord, GraphStore};

    fn stmt(belief: f64) -> StmtData {
        StmtData {
            stmt_type: "Activation".into(),
            evidence_count: 1,
            stmt_hash: 1,
            source_counts: Default::default(),
            belief,
            curated: true,
            english: "x activates y".into(),
            weight: None,
            residue: None,
            position: None,
            initial_sign: None,
            url: String::new(),
        }
    }

    #[test]
    fn finds_common_downstream_target() {
        let g = GraphStore::builder()
            .node("BRCA1", "HGNC", "1")
            .node("BRCA2", "HGNC", "2")
            .node("CHEK1", "HGNC", "3")
            .edge("BRCA1", "CHEK1", EdgeRecord::default())
            .edge("BRCA2", "CHEK1", EdgeRecord::default())
            .build();
        let results = run(
            &g,
            &"BRCA1".to_string(),
            &"BRCA2".to_string(),
            true,
            50,
            &[],
            &[],
            &AHashSet::new(),
            &[],
            None,
            false,
            |_| None,
            |_, _| vec![stmt(0.9)],
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].2, "CHEK1".to_string());
    }
}
