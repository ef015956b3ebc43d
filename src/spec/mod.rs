//! The user-facing search specification and its derived filter set.

mod filter_set;
mod search_spec;
mod subgraph_request;

pub use filter_set::FilterSet;
pub use search_spec::{Sign, SearchSpec};
pub use subgraph_request::{SubgraphNodeRef, SubgraphRequest};
