//! Orchestrates one validated [`SearchSpec`] into a full [`Response`]: plans
//! the query set, runs every auxiliary result manager first, the primary
//! path query last (and its reverse, if requested), and aggregates
//! `timed_out` across all of them.

use ahash::{AHashMap, AHashSet};

use crate::algorithms::{shared_interactors, shared_parents, Bfs, Dijkstra, ShortestSimplePaths};
use crate::config::Config;
use crate::error::{GraphError, Result};
use crate::external::{
    IdentifierUrlService, MeshRefCount, MeshRefCountService, OntologyService,
};
use crate::graph::{GraphStore, SignedGraph};
use crate::model::{Response, StmtData};
use crate::planner::{plan, Query, Role};
use crate::result_managers::{
    assemble_ontology, lookup_node, run_shared_interactors, run_subgraph, statement_passes, PathResultManager,
    PathRunResult, SharedInteractorsRunResult,
};
use crate::spec::{FilterSet, SearchSpec, SubgraphRequest};

/// Ties the read-only graph and its external collaborators together for the
/// lifetime of a batch of queries. Cheap to construct per request if the
/// signed graph is rebuilt each time is too expensive for the caller's
/// traffic — callers that serve many signed queries should build one
/// [`ResponseAssembler`] and reuse it.
pub struct ResponseAssembler<'a> {
    store: &'a GraphStore,
    signed: SignedGraph,
    ontology: &'a dyn OntologyService,
    url_service: &'a dyn IdentifierUrlService,
    mesh: &'a dyn MeshRefCountService,
    config: &'a Config,
}

impl<'a> ResponseAssembler<'a> {
    pub fn new(
        store: &'a GraphStore,
        ontology: &'a dyn OntologyService,
        url_service: &'a dyn IdentifierUrlService,
        mesh: &'a dyn MeshRefCountService,
        config: &'a Config,
    ) -> Self {
        Self {
            store,
            signed: SignedGraph::from_unsigned(store),
            ontology,
            url_service,
            mesh,
            config,
        }
    }

    /// Runs every query [`crate::planner::plan`] derives from `spec` and
    /// assembles the combined [`Response`]. Auxiliaries (ontology, shared
    /// targets, shared regulators) run before the primary path query, which
    /// runs before its reverse.
    pub fn assemble(&self, spec: &SearchSpec) -> Result<Response> {
        let query_hash = format!("{:08x}", spec.hash());
        let time_limit = spec.user_timeout.unwrap_or(self.config.default_user_timeout_secs as f64);
        let mut response = Response::empty(query_hash, time_limit);
        let queries = plan(spec);

        if let Some(Query::SharedParents { spec }) = queries.get(&Role::Ontology) {
            response.ontology = self.run_ontology(spec, &FilterSet::from(spec));
        }
        if let Some(Query::SharedInteractors { spec, downstream }) = queries.get(&Role::SharedTargets) {
            let result = self.run_shared(spec, FilterSet::from(spec), *downstream)?;
            response.timed_out |= result.timed_out;
            response.shared_targets = Some(result.data);
        }
        if let Some(Query::SharedInteractors { spec, downstream }) = queries.get(&Role::SharedRegulators) {
            let result = self.run_shared(spec, FilterSet::from(spec), *downstream)?;
            response.timed_out |= result.timed_out;
            response.shared_regulators = Some(result.data);
        }
        if let Some(query) = queries.get(&Role::Primary) {
            let result = self.run_path(query)?;
            response.timed_out |= result.timed_out;
            response.forward = Some(result.data);
        }
        if let Some(query) = queries.get(&Role::Reverse) {
            let result = self.run_path(query)?;
            response.timed_out |= result.timed_out;
            response.reverse = Some(result.data);
        }

        Ok(response)
    }

    /// The subgraph entry point — independent of [`plan`], since it has no
    /// source/target pair to route through the planner.
    pub fn assemble_subgraph(&self, request: &SubgraphRequest) -> crate::model::SubgraphResults {
        run_subgraph(self.store, &request.nodes, self.url_service)
    }

    fn run_path(&self, query: &Query) -> Result<PathRunResult> {
        match query {
            Query::ShortestSimplePaths { spec } => self.run_ssp(spec, FilterSet::from(spec)),
            Query::Bfs { spec, reverse_traversal } => {
                self.run_open(spec, FilterSet::from(spec), *reverse_traversal, false)
            }
            Query::Dijkstra { spec, reverse_traversal } => {
                self.run_open(spec, FilterSet::from(spec), *reverse_traversal, true)
            }
            Query::SharedInteractors { .. } | Query::SharedParents { .. } => {
                unreachable!("run_path is only called for Role::Primary/Reverse, which the planner only ever fills with a path query")
            }
        }
    }

    /// Closed two-endpoint search. Dispatches to the signed graph when the
    /// spec asks for a net-effect sign: the source is pinned at sign 0
    /// (up-regulated), and the search target is `(target, spec.sign)` — the
    /// question "does perturbing source end up regulating target the
    /// requested way".
    fn run_ssp(&self, spec: &SearchSpec, filters: FilterSet) -> Result<PathRunResult> {
        let timeout = spec.timeout();
        let source_name = spec.source.as_deref().ok_or(GraphError::MissingParameters("source"))?;
        let target_name = spec.target.as_deref().ok_or(GraphError::MissingParameters("target"))?;
        let ref_counts = self.ref_counts_for(spec);

        if let Some(sign) = spec.sign {
            let source_handle = (source_name.to_string(), 0u8);
            let target_handle = (target_name.to_string(), sign.as_u8());
            let ignore_nodes: Vec<(String, u8)> = filters
                .node_blacklist
                .iter()
                .flat_map(|n| [(n.clone(), 0u8), (n.clone(), 1u8)])
                .collect();
            let weight = self.weight_fn_signed(spec, ref_counts);
            let stream =
                ShortestSimplePaths::new(&self.signed, source_handle, target_handle, ignore_nodes, [], weight);
            let extract = Box::new(|n: &(String, u8)| (n.0.clone(), Some(n.1)));
            let to_ignore = Box::new(|name: &str| vec![(name.to_string(), 0u8), (name.to_string(), 1u8)]);
            let source_node = lookup_node(self.store, source_name, Some(0), self.url_service);
            let target_node = lookup_node(self.store, target_name, Some(sign.as_u8()), self.url_service);
            let manager = PathResultManager::new(stream, self.store, filters, timeout, false, extract, to_ignore, self.url_service);
            Ok(manager.run(source_node, target_node))
        } else {
            let ignore_nodes: Vec<String> = filters.node_blacklist.clone();
            let weight = self.weight_fn_unsigned(spec, ref_counts);
            let stream = ShortestSimplePaths::new(
                self.store,
                source_name.to_string(),
                target_name.to_string(),
                ignore_nodes,
                [],
                weight,
            );
            let extract = Box::new(|n: &String| (n.clone(), None));
            let to_ignore = Box::new(|name: &str| vec![name.to_string()]);
            let source_node = lookup_node(self.store, source_name, None, self.url_service);
            let target_node = lookup_node(self.store, target_name, None, self.url_service);
            let manager = PathResultManager::new(stream, self.store, filters, timeout, false, extract, to_ignore, self.url_service);
            Ok(manager.run(source_node, target_node))
        }
    }

    /// Open single-endpoint search. `reverse_traversal` is also the output
    /// orientation: a target-only search walks the graph backward from
    /// `target`, so each yielded path is reversed before display to read in
    /// forward causal order.
    ///
    /// The signed graph is not used here — an open search has no fixed
    /// second endpoint to anchor a requested net-effect sign against, so
    /// `spec.sign` is ignored for BFS/Dijkstra.
    fn run_open(&self, spec: &SearchSpec, mut filters: FilterSet, reverse_traversal: bool, weighted: bool) -> Result<PathRunResult> {
        let timeout = spec.timeout();
        let start_name = if reverse_traversal { spec.target.as_deref() } else { spec.source.as_deref() }
            .ok_or(GraphError::MissingParameters("source/target"))?;
        let start_node = lookup_node(self.store, start_name, None, self.url_service);
        let extract = Box::new(|n: &String| (n.clone(), None));
        let to_ignore = Box::new(|name: &str| vec![name.to_string()]);

        if weighted {
            let ignore_nodes: Vec<String> = filters.node_blacklist.clone();
            let ignore_edges = self.stmt_filtered_edges(&filters);
            let ref_counts = self.ref_counts_for(spec);
            let weight = self.weight_fn_unsigned(spec, ref_counts).ok_or_else(|| {
                GraphError::InvalidParameters("weighted open search planned against a spec that is not overall_weighted".into())
            })?;
            let namespace_of = {
                let store = self.store;
                Box::new(move |name: &str| store.attrs(name).map(|a| a.namespace.clone()))
            };
            let stream = Dijkstra::new(
                self.store,
                start_name.to_string(),
                reverse_traversal,
                ignore_nodes,
                ignore_edges,
                spec.terminal_ns.clone(),
                namespace_of,
                weight,
            );
            // Dijkstra enforces neither node_blacklist nor allowed_ns itself
            // (translated into ignore_nodes/a precomputed ignore-edge set
            // above) — allowed_ns is left in place so the result manager's
            // interior-node check still applies it.
            filters.node_blacklist.clear();
            let manager =
                PathResultManager::new(stream, self.store, filters, timeout, reverse_traversal, extract, to_ignore, self.url_service);
            Ok(manager.run(start_node, None))
        } else {
            let predicate = self.stmt_filter_predicate(&filters);
            let namespace_of = {
                let store = self.store;
                Box::new(move |name: &str| store.attrs(name).map(|a| a.namespace.clone()))
            };
            let stream = Bfs::new(
                self.store,
                start_name.to_string(),
                reverse_traversal,
                spec.depth_limit,
                spec.max_per_node,
                filters.allowed_ns.clone(),
                filters.node_blacklist.clone(),
                spec.terminal_ns.clone(),
                namespace_of,
                predicate,
            );
            // BFS enforces allowed_ns, node_blacklist, and the per-edge
            // statement predicate itself — clear them here so the result
            // manager does not re-apply the same checks.
            filters.allowed_ns.clear();
            filters.node_blacklist.clear();
            let manager =
                PathResultManager::new(stream, self.store, filters, timeout, reverse_traversal, extract, to_ignore, self.url_service);
            Ok(manager.run(start_node, None))
        }
    }

    fn run_shared(&self, spec: &SearchSpec, filters: FilterSet, downstream: bool) -> Result<SharedInteractorsRunResult> {
        let timeout = spec.timeout();
        let source_name = spec.source.clone().ok_or(GraphError::MissingParameters("source"))?;
        let target_name = spec.target.clone().ok_or(GraphError::MissingParameters("target"))?;
        let node_blacklist: AHashSet<String> = filters.node_blacklist.iter().cloned().collect();
        let store = self.store;
        let namespace_of = move |name: &str| store.attrs(name).map(|a| a.namespace.clone());
        let edge_stmts = move |a: &String, b: &String| store.edge_attrs(a, b).map(|r| r.statements.clone()).unwrap_or_default();

        let candidates = shared_interactors::run(
            self.store,
            &source_name,
            &target_name,
            downstream,
            filters.max_paths,
            &filters.allowed_ns,
            &filters.exclude_stmts,
            &node_blacklist,
            &filters.hash_blacklist,
            filters.belief_cutoff,
            filters.curated_db_only,
            namespace_of,
            edge_stmts,
        );
        Ok(run_shared_interactors(self.store, &filters, timeout, downstream, candidates, self.url_service))
    }

    fn run_ontology(&self, spec: &SearchSpec, filters: &FilterSet) -> Option<crate::model::OntologyResults> {
        let source_name = spec.source.as_deref()?;
        let target_name = spec.target.as_deref()?;
        let source_attrs = self.store.attrs(source_name)?;
        let target_attrs = self.store.attrs(target_name)?;
        let parents = shared_parents::run(
            self.ontology,
            &source_attrs.namespace,
            &source_attrs.identifier,
            &target_attrs.namespace,
            &target_attrs.identifier,
            false,
            None,
            filters.max_paths,
        );
        let source_node = lookup_node(self.store, source_name, None, self.url_service)?;
        let target_node = lookup_node(self.store, target_name, None, self.url_service)?;
        Some(assemble_ontology(source_node, target_node, parents))
    }

    /// Edges with no statement surviving the exact per-statement filter,
    /// used to build Dijkstra's `ignore_edges` set up front since it has no
    /// per-edge predicate hook (unlike [`Bfs`]). Skipped entirely when the
    /// filter set has nothing to enforce.
    fn stmt_filtered_edges(&self, filters: &FilterSet) -> Vec<(String, String)> {
        if filters.no_stmt_filters() {
            return Vec::new();
        }
        self.store
            .edge_iter()
            .filter(|(_, _, record)| !record.statements.iter().any(|s| statement_passes(s, filters)))
            .map(|(u, v, _)| (u.to_string(), v.to_string()))
            .collect()
    }

    fn stmt_filter_predicate(&self, filters: &FilterSet) -> Option<Box<dyn Fn(&String, &String) -> bool + 'a>> {
        if filters.no_stmt_filters() {
            return None;
        }
        let store = self.store;
        let filters = filters.clone();
        Some(Box::new(move |a: &String, b: &String| {
            store.edge_attrs(a, b).map(|r| r.statements.iter().any(|s| statement_passes(s, &filters))).unwrap_or(false)
        }))
    }

    /// Queries the mesh-ref-count service for `spec.mesh_ids` whenever the
    /// spec is context-weighted, so the weight closures below can fold
    /// per-hash reference counts into traversal cost. Empty (and the
    /// service left unconsulted) otherwise.
    fn ref_counts_for(&self, spec: &SearchSpec) -> AHashMap<i64, MeshRefCount> {
        if spec.context_weighted() {
            self.mesh.ref_counts(&spec.mesh_ids)
        } else {
            AHashMap::new()
        }
    }

    fn weight_fn_unsigned(&self, spec: &SearchSpec, ref_counts: AHashMap<i64, MeshRefCount>) -> Option<Box<dyn Fn(&String, &String) -> f64 + 'a>> {
        if !spec.overall_weighted() {
            return None;
        }
        let store = self.store;
        let context_weighted = spec.context_weighted();
        let const_c = spec.const_c;
        let const_tk = spec.const_tk;
        Some(Box::new(move |a: &String, b: &String| {
            let record = store.edge_attrs(a, b);
            let base = record.map(|r| r.weight).unwrap_or(1.0);
            if context_weighted {
                let statements = record.map(|r| r.statements.as_slice()).unwrap_or(&[]);
                mesh_context_weight(base, statements, &ref_counts, const_c, const_tk)
            } else {
                base
            }
        }))
    }

    fn weight_fn_signed(&self, spec: &SearchSpec, ref_counts: AHashMap<i64, MeshRefCount>) -> Option<Box<dyn Fn(&(String, u8), &(String, u8)) -> f64 + 'a>> {
        if !spec.overall_weighted() {
            return None;
        }
        let store = self.store;
        let context_weighted = spec.context_weighted();
        let const_c = spec.const_c;
        let const_tk = spec.const_tk;
        Some(Box::new(move |a: &(String, u8), b: &(String, u8)| {
            let record = store.edge_attrs(&a.0, &b.0);
            let base = record.map(|r| r.weight).unwrap_or(1.0);
            if context_weighted {
                let statements = record.map(|r| r.statements.as_slice()).unwrap_or(&[]);
                mesh_context_weight(base, statements, &ref_counts, const_c, const_tk)
            } else {
                base
            }
        }))
    }
}

/// Folds per-statement mesh reference counts into an edge's traversal cost.
///
/// For each surviving statement, looks up its hash in `ref_counts`: present
/// hashes contribute their summed source counts and `total`; absent hashes
/// contribute `0` to the reference count and `1` to the total, mirroring
/// the default used when a statement's hash has no mesh association at all.
/// The aggregate ratio `ref_count_sum / total` is then folded into `base`
/// as `base / (const_c + const_tk * ratio)`: an edge whose statements carry
/// no mesh support at all (`ratio == 0`) keeps its base weight, and each
/// step up in mesh relevance makes the edge proportionally cheaper to
/// traverse, so shortest-path search favors mesh-supported edges.
fn mesh_context_weight(base: f64, statements: &[StmtData], ref_counts: &AHashMap<i64, MeshRefCount>, const_c: i64, const_tk: i64) -> f64 {
    if statements.is_empty() {
        return base;
    }
    let mut ref_count_sum = 0u32;
    let mut total = 0u32;
    for stmt in statements {
        match ref_counts.get(&stmt.stmt_hash) {
            Some(counts) => {
                ref_count_sum += counts.by_source.values().sum::<u32>();
                total += counts.total;
            }
            None => total += 1,
        }
    }
    let total = total.max(1) as f64;
    base / (const_c as f64 + const_tk as f64 * (ref_count_sum as f64 / total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{NullIdentifierUrlService, NullMeshRefCountService, NullOntologyService};
    use crate::graph::EdgeRecord;

    fn brca_graph() -> GraphStore {
        let mut b = GraphStore::builder()
            .node("BRCA1", "HGNC", "1100")
            .node("BRCA2", "HGNC", "1101")
            .node("CHEK1", "HGNC", "1925")
            .node("AR", "HGNC", "644");
        b = b
            .edge("BRCA1", "AR", EdgeRecord::default())
            .edge("AR", "CHEK1", EdgeRecord::default())
            .edge("CHEK1", "BRCA2", EdgeRecord::default());
        b.build()
    }

    #[test]
    fn assembles_forward_paths_for_closed_search() {
        let store = brca_graph();
        let config = Config::testing();
        let ontology = NullOntologyService;
        let url_service = NullIdentifierUrlService;
        let mesh = NullMeshRefCountService;
        let assembler = ResponseAssembler::new(&store, &ontology, &url_service, &mesh, &config);
        let spec = SearchSpec::new(Some("BRCA1".into()), Some("BRCA2".into())).unwrap();
        let response = assembler.assemble(&spec).unwrap();
        let forward = response.forward.expect("closed search always plans a primary path query");
        assert_eq!(forward.total_paths(), 1);
    }

    #[test]
    fn assembles_open_search_without_aux_queries() {
        let store = brca_graph();
        let config = Config::testing();
        let ontology = NullOntologyService;
        let url_service = NullIdentifierUrlService;
        let mesh = NullMeshRefCountService;
        let assembler = ResponseAssembler::new(&store, &ontology, &url_service, &mesh, &config);
        let spec = SearchSpec::new(Some("BRCA1".into()), None).unwrap();
        let response = assembler.assemble(&spec).unwrap();
        assert!(response.forward.is_some());
        assert!(response.ontology.is_none());
        assert!(response.shared_targets.is_none());
    }

    struct StubMeshRefCountService(AHashMap<i64, MeshRefCount>);

    impl MeshRefCountService for StubMeshRefCountService {
        fn ref_counts(&self, _mesh_ids: &[String]) -> AHashMap<i64, MeshRefCount> {
            self.0.clone()
        }
    }

    fn stmt_with_hash(hash: i64) -> StmtData {
        StmtData {
            stmt_type: "Activation".into(),
            evidence_count: 1,
            stmt_hash: hash,
            source_counts: Default::default(),
            belief: 0.9,
            curated: true,
            english: String::new(),
            weight: None,
            residue: None,
            position: None,
            initial_sign: None,
            url: String::new(),
        }
    }

    /// Two same-length routes (SRC->MIDA->TGT, SRC->MIDB->TGT) with equal
    /// static edge weights; only MIDA's leg carries statements with mesh
    /// reference counts. A context-weighted search must rank the
    /// mesh-supported route ahead of the unsupported one, which it can
    /// only do by actually consulting the mesh-ref-count service per edge.
    #[test]
    fn context_weighted_search_ranks_mesh_supported_route_first() {
        let store = GraphStore::builder()
            .node("SRC", "HGNC", "1")
            .node("MIDA", "HGNC", "2")
            .node("MIDB", "HGNC", "3")
            .node("TGT", "HGNC", "4")
            .edge("SRC", "MIDA", EdgeRecord { statements: vec![stmt_with_hash(1)], belief: 0.9, weight: 1.0, context_weight: None, sign: None })
            .edge("MIDA", "TGT", EdgeRecord { statements: vec![stmt_with_hash(2)], belief: 0.9, weight: 1.0, context_weight: None, sign: None })
            .edge("SRC", "MIDB", EdgeRecord { statements: vec![stmt_with_hash(3)], belief: 0.9, weight: 1.0, context_weight: None, sign: None })
            .edge("MIDB", "TGT", EdgeRecord { statements: vec![stmt_with_hash(4)], belief: 0.9, weight: 1.0, context_weight: None, sign: None })
            .build();

        let mut counts = AHashMap::new();
        let mut by_source = AHashMap::new();
        by_source.insert("db".to_string(), 10u32);
        counts.insert(1, MeshRefCount { by_source: by_source.clone(), total: 10 });
        counts.insert(2, MeshRefCount { by_source, total: 10 });
        let mesh = StubMeshRefCountService(counts);

        let config = Config::testing();
        let ontology = NullOntologyService;
        let url_service = NullIdentifierUrlService;
        let assembler = ResponseAssembler::new(&store, &ontology, &url_service, &mesh, &config);

        let mut spec = SearchSpec::new(Some("SRC".into()), Some("TGT".into())).unwrap();
        spec.mesh_ids = vec!["D000544".into()];
        assert!(spec.context_weighted());

        let response = assembler.assemble(&spec).unwrap();
        let forward = response.forward.expect("closed search always plans a primary path query");
        let length_three = forward.paths.get(&3).expect("two length-3 routes");
        assert_eq!(length_three.len(), 2);
        assert_eq!(length_three[0].nodes[1].name, "MIDA");
        assert_eq!(length_three[1].nodes[1].name, "MIDB");
    }

    #[test]
    fn mesh_context_weight_discounts_proportionally_to_ref_count_ratio() {
        let mut counts = AHashMap::new();
        let mut by_source = AHashMap::new();
        by_source.insert("db".to_string(), 9u32);
        counts.insert(1, MeshRefCount { by_source, total: 9 });

        // ratio == 1 (ref_count_sum == total): weight / (const_c + const_tk).
        let discounted = mesh_context_weight(2.0, &[stmt_with_hash(1)], &counts, 1, 10);
        assert!((discounted - 2.0 / 11.0).abs() < 1e-9);

        // Unknown hash: ratio == 0, weight is unchanged.
        let unchanged = mesh_context_weight(2.0, &[stmt_with_hash(999)], &counts, 1, 10);
        assert_eq!(unchanged, 2.0);
    }

    /// `run_ssp`/`run_shared` are always reached through `plan()`, which
    /// never builds their queries from a source-only (or target-only) spec
    /// — but the adapter layer is still responsible for rejecting that
    /// case itself rather than trusting the planner, per the documented
    /// `MissingParameters` contract.
    #[test]
    fn run_ssp_reports_missing_parameters_instead_of_panicking_on_an_endpoint_only_spec() {
        let store = brca_graph();
        let config = Config::testing();
        let ontology = NullOntologyService;
        let url_service = NullIdentifierUrlService;
        let mesh = NullMeshRefCountService;
        let assembler = ResponseAssembler::new(&store, &ontology, &url_service, &mesh, &config);
        let spec = SearchSpec::new(Some("BRCA1".into()), None).unwrap();

        let err = assembler.run_ssp(&spec, FilterSet::from(&spec)).unwrap_err();
        assert!(matches!(err, GraphError::MissingParameters("target")));
    }

    #[test]
    fn run_shared_reports_missing_parameters_on_an_endpoint_only_spec() {
        let store = brca_graph();
        let config = Config::testing();
        let ontology = NullOntologyService;
        let url_service = NullIdentifierUrlService;
        let mesh = NullMeshRefCountService;
        let assembler = ResponseAssembler::new(&store, &ontology, &url_service, &mesh, &config);
        let spec = SearchSpec::new(Some("BRCA1".into()), None).unwrap();

        let err = assembler.run_shared(&spec, FilterSet::from(&spec), true).unwrap_err();
        assert!(matches!(err, GraphError::MissingParameters("target")));
    }

    #[test]
    fn run_open_reports_invalid_parameters_when_weighted_without_overall_weighted() {
        let store = brca_graph();
        let config = Config::testing();
        let ontology = NullOntologyService;
        let url_service = NullIdentifierUrlService;
        let mesh = NullMeshRefCountService;
        let assembler = ResponseAssembler::new(&store, &ontology, &url_service, &mesh, &config);
        let spec = SearchSpec::new(Some("BRCA1".into()), None).unwrap();
        assert!(!spec.overall_weighted());

        let err = assembler.run_open(&spec, FilterSet::from(&spec), false, true).unwrap_err();
        assert!(matches!(err, GraphError::InvalidParameters(_)));
    }
}
