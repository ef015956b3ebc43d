//! Result managers: the consumers that sit between an algorithm's
//! raw output and the [`crate::model::Response`] handed back to the
//! caller. Every family shares the statement-level filtering and edge
//! assembly in [`common`]; the rest is specific to what the algorithm
//! produces (a path stream, a candidate list, a tuple of endpoints, or a
//! resolved node set).

mod common;
mod ontology;
mod path;
mod shared_interactors;
mod subgraph;

pub use common::{assemble_edge, lookup_node, statement_passes};
pub use ontology::run as assemble_ontology;
pub use path::{PathResultManager, PathRunResult};
pub use shared_interactors::{run as run_shared_interactors, SharedInteractorsRunResult};
pub use subgraph::run as run_subgraph;
