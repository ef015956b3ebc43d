//! SharedParents: shared ontological ancestors of two nodes, delegated
//! entirely to the external ontology service — this algorithm family has
//! no graph-traversal component of its own.

use crate::external::{OntologyParent, OntologyService};

#[allow(clippy::too_many_arguments)]
pub fn run(
    ontology: &dyn OntologyService,
    src_ns: &str,
    src_id: &str,
    tgt_ns: &str,
    tgt_id: &str,
    immediate_only: bool,
    label_allow_set: Option<&[String]>,
    max: usize,
) -> Vec<OntologyParent> {
    ontology.shared_parents(src_ns, src_id, tgt_ns, tgt_id, immediate_only, label_allow_set, max)
}
