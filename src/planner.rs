//! The query planner: maps one validated [`SearchSpec`] to a primary path
//! query plus zero-or-more auxiliary queries.
//!
//! Modeled as a tagged-variant [`Query`] enum rather than a class
//! hierarchy, since the set of query families is closed and each family
//! needs a different subset of [`SearchSpec`]'s fields.

use ahash::AHashMap;

use crate::spec::SearchSpec;

/// The role a planned query plays in the response assembler's orchestration
/// — used as the map key so the assembler knows where to file each result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,
    Reverse,
    SharedTargets,
    SharedRegulators,
    Ontology,
}

/// One planned algorithm invocation, carrying the (already validated)
/// spec it was derived from plus whatever per-invocation flags
/// distinguish it from a sibling invocation of the same family (direction,
/// shared-targets-vs-regulators).
#[derive(Debug, Clone)]
pub enum Query {
    ShortestSimplePaths { spec: SearchSpec },
    Bfs { spec: SearchSpec, reverse_traversal: bool },
    Dijkstra { spec: SearchSpec, reverse_traversal: bool },
    SharedInteractors { spec: SearchSpec, downstream: bool },
    SharedParents { spec: SearchSpec },
}

/// Produces the `{role → Query}` map for a two-endpoint-or-open search
/// spec. Subgraph requests are a distinct entry point and do not go
/// through this planner — see
/// [`crate::response_assembler::ResponseAssembler::assemble_subgraph`].
pub fn plan(spec: &SearchSpec) -> AHashMap<Role, Query> {
    let mut queries = AHashMap::new();

    match (spec.source.is_some(), spec.target.is_some()) {
        (true, true) => {
            queries.insert(Role::Primary, Query::ShortestSimplePaths { spec: spec.clone() });
            queries.insert(
                Role::SharedTargets,
                Query::SharedInteractors { spec: spec.clone(), downstream: true },
            );
            queries.insert(Role::Ontology, Query::SharedParents { spec: spec.clone() });
            if spec.shared_regulators {
                queries.insert(
                    Role::SharedRegulators,
                    Query::SharedInteractors { spec: spec.clone(), downstream: false },
                );
            }
            if spec.two_way {
                queries.insert(
                    Role::Reverse,
                    Query::ShortestSimplePaths { spec: spec.reverse() },
                );
            }
        }
        (source_set, _) => {
            // Exactly one of source/target is set (SearchSpec::validate
            // rejects the case where neither is set).
            let reverse_traversal = !source_set;
            let primary = if spec.overall_weighted() {
                Query::Dijkstra { spec: spec.clone(), reverse_traversal }
            } else {
                Query::Bfs { spec: spec.clone(), reverse_traversal }
            };
            queries.insert(Role::Primary, primary);
            if spec.two_way {
                let reverse = if spec.overall_weighted() {
                    Query::Dijkstra { spec: spec.clone(), reverse_traversal: !reverse_traversal }
                } else {
                    Query::Bfs { spec: spec.clone(), reverse_traversal: !reverse_traversal }
                };
                queries.insert(Role::Reverse, reverse);
            }
        }
    }

    queries
}
