//! Ontology result manager: no additional filtering, just converts the
//! ontology service's tuples into [`Node`]s.

use crate::external::OntologyParent;
use crate::model::{Node, OntologyResults};

pub fn run(source: Node, target: Node, parents: Vec<OntologyParent>) -> OntologyResults {
    let parents = parents
        .into_iter()
        .map(|p| Node::new(p.name, p.namespace, p.identifier).with_lookup(Some(p.url)))
        .collect();
    OntologyResults { source, target, parents }
}
