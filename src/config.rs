//! Process-wide defaults that the search specification leaves unspecified.
//!
//! None of this is per-query state — it is the knobs an operator would tune
//! when standing the pipeline up.

use std::time::Duration;

/// Process-wide defaults for fields a [`crate::spec::SearchSpec`] may omit,
/// plus hard ceilings that are not part of the wire protocol at all.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default BFS edge-depth limit when a request omits `depth_limit`.
    pub default_depth_limit: u32,
    /// Default result cap when a request omits `k_shortest`.
    pub default_k_shortest: usize,
    /// Default per-query time budget, in seconds, when a request omits
    /// `user_timeout`.
    pub default_user_timeout_secs: u64,
    /// Floor enforced on `max_per_node` regardless of what the caller asked
    /// for (a value below this is a validation error, not a clamp).
    pub min_max_per_node: u32,
    /// Ceiling on the number of nodes accepted by a subgraph request.
    pub max_subgraph_nodes: usize,
    /// Capacity of the mesh ref-count cache the external mesh service may
    /// keep warm across requests.
    pub mesh_ref_count_cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_depth_limit: 2,
            default_k_shortest: 50,
            default_user_timeout_secs: 30,
            min_max_per_node: 1,
            max_subgraph_nodes: 100,
            mesh_ref_count_cache_capacity: 10_000,
        }
    }
}

impl Config {
    /// Shorter timeouts for deterministic, fast tests; everything else
    /// matches [`Config::default`].
    pub fn testing() -> Self {
        Self {
            default_user_timeout_secs: 2,
            ..Self::default()
        }
    }

    /// The default timeout as a [`Duration`].
    pub fn default_user_timeout(&self) -> Duration {
        Duration::from_secs(self.default_user_timeout_secs)
    }
}
