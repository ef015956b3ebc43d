//! The derived filter set: a projection of [`super::SearchSpec`] consumed by
//! result managers, independent of the fields that only the planner and
//! algorithm adapters care about (`source`, `target`, `depth_limit`,
//! `mesh_ids`, ...).

use super::SearchSpec;

/// Statement/node/path filtering knobs, derived once per query and then
/// narrowed per algorithm family so a result manager never re-applies a
/// filter its algorithm already honors.
#[derive(Debug, Clone)]
pub struct FilterSet {
    /// Allowed statement types (case-folded); empty means "all types
    /// allowed". Named for this projection's role, not for the direction of
    /// the check — a statement survives only if its type is in this set
    /// when the set is non-empty.
    pub exclude_stmts: Vec<String>,
    pub hash_blacklist: Vec<i64>,
    pub allowed_ns: Vec<String>,
    pub node_blacklist: Vec<String>,
    pub path_length: Option<u32>,
    pub belief_cutoff: Option<f64>,
    pub curated_db_only: bool,
    pub max_paths: usize,
    pub cull_best_node: Option<u32>,
    pub weighted: bool,
    pub context_weighted: bool,
    pub overall_weighted: bool,
}

impl From<&SearchSpec> for FilterSet {
    fn from(spec: &SearchSpec) -> Self {
        Self {
            exclude_stmts: spec.stmt_filter.clone(),
            hash_blacklist: spec.edge_hash_blacklist.clone(),
            allowed_ns: spec.allowed_ns.clone(),
            node_blacklist: spec.node_blacklist.clone(),
            path_length: spec.path_length,
            belief_cutoff: spec.belief_cutoff,
            curated_db_only: spec.curated_db_only,
            max_paths: spec.k_shortest,
            cull_best_node: spec.cull_best_node,
            weighted: spec.weighted,
            context_weighted: spec.context_weighted(),
            overall_weighted: spec.overall_weighted(),
        }
    }
}

impl FilterSet {
    /// No filtering at all would change the result: every predicate is at
    /// its permissive default.
    pub fn no_filters(&self) -> bool {
        self.no_stmt_filters() && self.no_node_filters() && self.path_length.is_none()
    }

    /// No statement-level predicate would drop anything.
    pub fn no_stmt_filters(&self) -> bool {
        self.exclude_stmts.is_empty()
            && self.hash_blacklist.is_empty()
            && self.belief_cutoff.is_none()
            && !self.curated_db_only
    }

    /// No node-level predicate would drop anything.
    pub fn no_node_filters(&self) -> bool {
        self.allowed_ns.is_empty() && self.node_blacklist.is_empty()
    }

}
