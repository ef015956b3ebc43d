//! The search specification: the validated, user-facing description of a
//! query over the causal graph.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::hash::query_hash;

/// Requested net effect on a signed search. `"+"` = up-regulation,
/// `"-"` = down-regulation. Case-sensitive on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Sign {
    /// `0` for up-regulation, `1` for down-regulation — the encoding used
    /// by the signed graph's node identity.
    pub fn as_u8(self) -> u8 {
        match self {
            Sign::Plus => 0,
            Sign::Minus => 1,
        }
    }
}

/// A validated, immutable user-facing search specification.
///
/// Construct via [`SearchSpec::from_json`] or [`SearchSpec::new`] — both
/// validate before returning. There is no public mutation after
/// construction; [`SearchSpec::reverse`] returns a new value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchSpec {
    pub source: Option<String>,
    pub target: Option<String>,
    #[serde(default)]
    pub stmt_filter: Vec<String>,
    #[serde(default)]
    pub edge_hash_blacklist: Vec<i64>,
    #[serde(default)]
    pub allowed_ns: Vec<String>,
    #[serde(default)]
    pub node_blacklist: Vec<String>,
    pub path_length: Option<u32>,
    #[serde(default = "default_depth_limit")]
    pub depth_limit: u32,
    pub sign: Option<Sign>,
    #[serde(default)]
    pub weighted: bool,
    pub belief_cutoff: Option<f64>,
    #[serde(default)]
    pub curated_db_only: bool,
    #[serde(default = "default_k_shortest")]
    pub k_shortest: usize,
    pub max_per_node: Option<u32>,
    pub cull_best_node: Option<u32>,
    #[serde(default)]
    pub mesh_ids: Vec<String>,
    #[serde(default)]
    pub strict_mesh_id_filtering: bool,
    #[serde(default = "default_const_c")]
    pub const_c: i64,
    #[serde(default = "default_const_tk")]
    pub const_tk: i64,
    pub user_timeout: Option<f64>,
    #[serde(default)]
    pub two_way: bool,
    #[serde(default)]
    pub shared_regulators: bool,
    #[serde(default)]
    pub terminal_ns: Vec<String>,
    pub format: Option<String>,
}

fn default_depth_limit() -> u32 {
    2
}

fn default_k_shortest() -> usize {
    50
}

fn default_const_c() -> i64 {
    1
}

fn default_const_tk() -> i64 {
    10
}

impl SearchSpec {
    /// Builds a minimal two-endpoint spec with every other field at its
    /// wire default, then validates it. Convenience for tests and the
    /// demonstration CLI.
    pub fn new(source: Option<String>, target: Option<String>) -> Result<Self> {
        let spec = Self {
            source,
            target,
            stmt_filter: Vec::new(),
            edge_hash_blacklist: Vec::new(),
            allowed_ns: Vec::new(),
            node_blacklist: Vec::new(),
            path_length: None,
            depth_limit: default_depth_limit(),
            sign: None,
            weighted: false,
            belief_cutoff: None,
            curated_db_only: false,
            k_shortest: default_k_shortest(),
            max_per_node: None,
            cull_best_node: None,
            mesh_ids: Vec::new(),
            strict_mesh_id_filtering: false,
            const_c: default_const_c(),
            const_tk: default_const_tk(),
            user_timeout: None,
            two_way: false,
            shared_regulators: false,
            terminal_ns: Vec::new(),
            format: None,
        };
        spec.validate()?;
        Ok(spec.normalized())
    }

    /// Parses and validates a spec from its wire JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec.normalized())
    }

    fn validate(&self) -> Result<()> {
        if self.source.is_none() && self.target.is_none() {
            return Err(GraphError::Validation(
                "at least one of source or target is required".into(),
            ));
        }
        if let Some(pl) = self.path_length {
            if pl < 1 {
                return Err(GraphError::Validation("path_length must be >= 1".into()));
            }
        }
        if let Some(mpn) = self.max_per_node {
            if mpn < 1 {
                return Err(GraphError::Validation("max_per_node must be >= 1".into()));
            }
        }
        if let Some(cbn) = self.cull_best_node {
            if cbn < 2 {
                return Err(GraphError::Validation("cull_best_node must be >= 2".into()));
            }
        }
        if let Some(bc) = self.belief_cutoff {
            if !(0.0..=1.0).contains(&bc) {
                return Err(GraphError::Validation(
                    "belief_cutoff must be in [0, 1]".into(),
                ));
            }
        }
        Ok(())
    }

    /// Case-folds `stmt_filter`/`allowed_ns`. The fold happens here, at
    /// construction, not at data-ingest time — edge statement-type labels
    /// are stored as given.
    fn normalized(mut self) -> Self {
        for s in &mut self.stmt_filter {
            *s = s.to_lowercase();
        }
        for s in &mut self.allowed_ns {
            *s = s.to_lowercase();
        }
        self
    }

    /// Returns a new spec with `source` and `target` swapped; everything
    /// else is a deep copy, unchanged.
    pub fn reverse(&self) -> Self {
        let mut copy = self.clone();
        copy.target = self.source.clone();
        copy.source = self.target.clone();
        copy
    }

    /// ⇔ mesh ids provided ∧ ¬strict_mesh_id_filtering.
    pub fn context_weighted(&self) -> bool {
        !self.mesh_ids.is_empty() && !self.strict_mesh_id_filtering
    }

    /// ⇔ `weighted` ∨ context-weighted.
    pub fn overall_weighted(&self) -> bool {
        self.weighted || self.context_weighted()
    }

    /// Effective per-query time budget. A numeric `user_timeout` of `0`
    /// still yields a zero duration (the deadline is already past on the
    /// first check); an absent `user_timeout` is "no timeout" and is
    /// represented internally as [`std::time::Duration::MAX`].
    pub fn timeout(&self) -> std::time::Duration {
        match self.user_timeout {
            Some(secs) if secs.is_finite() && secs >= 0.0 => {
                std::time::Duration::from_secs_f64(secs)
            }
            Some(_) => std::time::Duration::MAX,
            None => std::time::Duration::MAX,
        }
    }

    /// Stable 32-bit FNV-1a hash over the canonical-sorted JSON of this
    /// spec, excluding `format`.
    pub fn hash(&self) -> u32 {
        let value = serde_json::to_value(self).expect("SearchSpec always serializes");
        query_hash(&value, &["format"])
    }
}
