//! End-to-end scenarios against a small fixed graph, run through the full
//! [`ResponseAssembler`] pipeline rather than against a single algorithm in
//! isolation.
//!
//! The graph mirrors the per-module unit fixtures in `ssp.rs`/`bfs.rs`
//! (same BRCA1/BRCA2/CHEK1/AR/testosterone/NR2C2/MBD2/PATZ1/NCOA shape),
//! extended with per-edge signs (closed signed search), per-edge statement
//! types (statement-type allowlist filtering), and two extra nodes
//! (HDAC3, H2AZ1) downstream of BRCA2 for the shared-interactors case.

use causal_path_search::external::{NullIdentifierUrlService, NullMeshRefCountService, NullOntologyService};
use causal_path_search::graph::{EdgeRecord, GraphStore};
use causal_path_search::model::StmtData;
use causal_path_search::{Config, ResponseAssembler, SearchSpec};

fn stmt(stmt_type: &str, hash: i64) -> StmtData {
    StmtData {
        stmt_type: stmt_type.into(),
        evidence_count: 3,
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

fn edge(stmt_type: &str, hash: i64, sign: u8) -> EdgeRecord {
    EdgeRecord {
        statements: vec![stmt(stmt_type, hash)],
        belief: 0.9,
        weight: 1.0,
        context_weight: None,
        sign: Some(sign),
    }
}

/// The fixed graph every scenario below runs against.
///
/// `testosterone` and `NR2C2` reach `CHEK1` only through a non-phosphorylation
/// statement (so scenario 3's allowlist drops those two branches) and only
/// through a sign-flipping (inhibiting) relation (so scenario 2's signed
/// search doesn't reach `(CHEK1, 0)` through them either).
fn full_graph() -> GraphStore {
    let mut b = GraphStore::builder()
        .node("BRCA1", "HGNC", "1100")
        .node("BRCA2", "HGNC", "1101")
        .node("CHEK1", "HGNC", "1925")
        .node("NCOA", "HGNC", "1")
        .node("AR", "HGNC", "644")
        .node("testosterone", "CHEBI", "1")
        .node("NR2C2", "HGNC", "2")
        .node("MBD2", "HGNC", "3")
        .node("PATZ1", "HGNC", "4")
        .node("HDAC3", "HGNC", "5")
        .node("H2AZ1", "HGNC", "6");

    let mut hash = 1;
    for mid in ["AR", "testosterone", "NR2C2", "MBD2", "PATZ1"] {
        hash += 1;
        // Every edge on a path that scenario 3 expects to survive its
        // phosphorylation allowlist has to carry a "Phosphorylation"
        // statement itself — the allowlist is per-edge, not per-path, so
        // the BRCA1->mid leg needs it too, not just the mid->CHEK1 leg.
        b = b.edge("BRCA1", mid, edge("Phosphorylation", hash, 0));
        hash += 1;
        // Statement type controls scenario 3 (stmt_filter allowlist);
        // relation sign controls scenario 2 (signed search) — kept
        // independent so neither scenario's fixture choice leaks into the
        // other's expected path count.
        let mid_stmt_type = match mid {
            "testosterone" | "NR2C2" => "Complex",
            _ => "Phosphorylation",
        };
        let mid_sign = if mid == "AR" { 0 } else { 1 };
        b = b.edge(mid, "CHEK1", edge(mid_stmt_type, hash, mid_sign));
    }

    b = b
        .edge("CHEK1", "BRCA2", edge("Phosphorylation", 100, 0))
        .edge("CHEK1", "NCOA", edge("Phosphorylation", 101, 0))
        .edge("NCOA", "BRCA2", edge("Phosphorylation", 102, 0))
        .edge("BRCA2", "HDAC3", edge("Activation", 103, 0))
        .edge("BRCA2", "H2AZ1", edge("Activation", 104, 0))
        .edge("CHEK1", "HDAC3", edge("Activation", 105, 0));

    b.build()
}

fn assemble(store: &GraphStore, spec: &SearchSpec) -> causal_path_search::Response {
    let config = Config::default();
    let ontology = NullOntologyService;
    let url_service = NullIdentifierUrlService;
    let mesh = NullMeshRefCountService;
    ResponseAssembler::new(store, &ontology, &url_service, &mesh, &config).assemble(spec).unwrap()
}

#[test]
fn scenario_1_unfiltered_forward_paths() {
    let g = full_graph();
    let spec = SearchSpec::new(Some("BRCA1".into()), Some("BRCA2".into())).unwrap();
    let response = assemble(&g, &spec);

    let forward = response.forward.expect("forward result present");
    assert_eq!(forward.paths.get(&4).map(Vec::len), Some(5));
    assert_eq!(forward.paths.get(&5).map(Vec::len), Some(5));

    for path in &forward.paths[&4] {
        let names: Vec<&str> = path.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names[0], "BRCA1");
        assert_eq!(names[2], "CHEK1");
        assert_eq!(names[3], "BRCA2");
    }
    for path in &forward.paths[&5] {
        let names: Vec<&str> = path.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names[2], "CHEK1");
        assert_eq!(names[3], "NCOA");
        assert_eq!(names[4], "BRCA2");
    }
}

#[test]
fn scenario_2_signed_search_only_ar_branch_reaches_sign_zero_at_length_four() {
    let g = full_graph();
    let mut spec = SearchSpec::new(Some("BRCA1".into()), Some("BRCA2".into())).unwrap();
    spec.sign = Some(causal_path_search::spec::Sign::Plus);
    let response = assemble(&g, &spec);

    let forward = response.forward.expect("forward result present");
    let length_four = forward.paths.get(&4).expect("one length-4 path");
    assert_eq!(length_four.len(), 1);

    let path = &length_four[0];
    let expected = [("BRCA1", 0u8), ("AR", 0), ("CHEK1", 0), ("BRCA2", 0)];
    for (node, (name, sign)) in path.nodes.iter().zip(expected) {
        assert_eq!(node.name, name);
        assert_eq!(node.sign, Some(sign));
    }
}

#[test]
fn scenario_3_stmt_filter_drops_testosterone_and_nr2c2_branches() {
    let g = full_graph();
    let mut spec = SearchSpec::new(Some("BRCA1".into()), Some("BRCA2".into())).unwrap();
    spec.stmt_filter = vec!["phosphorylation".into()];
    let response = assemble(&g, &spec);

    let forward = response.forward.expect("forward result present");
    assert_eq!(forward.paths.get(&4).map(Vec::len), Some(3));
    assert_eq!(forward.paths.get(&5).map(Vec::len), Some(3));

    let surviving_mids: std::collections::BTreeSet<&str> = forward.paths[&4]
        .iter()
        .map(|p| p.nodes[1].name.as_str())
        .collect();
    assert_eq!(
        surviving_mids,
        ["AR", "MBD2", "PATZ1"].into_iter().collect()
    );
}

#[test]
fn scenario_4_open_bfs_default_depth_limit() {
    let g = full_graph();
    let spec = SearchSpec::new(Some("BRCA1".into()), None).unwrap();
    let response = assemble(&g, &spec);

    let forward = response.forward.expect("forward result present");
    assert_eq!(forward.paths.get(&2).map(Vec::len), Some(5));
    assert_eq!(forward.paths.get(&3).map(Vec::len), Some(1));
    let length_three = &forward.paths[&3][0];
    assert_eq!(length_three.nodes[1].name, "AR");
    assert_eq!(length_three.nodes[2].name, "CHEK1");
}

#[test]
fn scenario_5_cull_best_node_stops_after_chek1_is_pruned() {
    let g = full_graph();
    let mut spec = SearchSpec::new(Some("BRCA1".into()), Some("BRCA2".into())).unwrap();
    spec.cull_best_node = Some(3);
    let response = assemble(&g, &spec);

    let forward = response.forward.expect("forward result present");
    assert_eq!(forward.total_paths(), 3);
}

#[test]
fn scenario_6_k_shortest_caps_total_paths() {
    let g = full_graph();
    let mut spec = SearchSpec::new(Some("BRCA1".into()), Some("BRCA2".into())).unwrap();
    spec.k_shortest = 4;
    let response = assemble(&g, &spec);

    let forward = response.forward.expect("forward result present");
    assert_eq!(forward.total_paths(), 4);
    assert_eq!(forward.paths.get(&4).map(Vec::len), Some(4));
}

#[test]
fn universal_invariant_node_blacklist_excludes_named_node_from_every_path() {
    let g = full_graph();
    let mut spec = SearchSpec::new(Some("BRCA1".into()), Some("BRCA2".into())).unwrap();
    spec.node_blacklist = vec!["AR".into()];
    let response = assemble(&g, &spec);

    let forward = response.forward.expect("forward result present");
    for paths in forward.paths.values() {
        for path in paths {
            assert!(path.nodes.iter().all(|n| n.name != "AR"));
        }
    }
}

#[test]
fn universal_invariant_curated_db_only_keeps_only_curated_statements() {
    // A small two-node graph whose only statement is uncurated, so the
    // filter has something to drop.
    let g = GraphStore::builder()
        .node("BRCA1", "HGNC", "1100")
        .node("AR", "HGNC", "644")
        .edge(
            "BRCA1",
            "AR",
            EdgeRecord {
                statements: vec![StmtData { curated: false, ..stmt("Activation", 900)}],
                belief: 0.9,
                weight: 1.0,
                ..Default::default()
            },
        )
        .build();
    let spec = SearchSpec::new(Some("BRCA1".into()), Some("AR".into())).unwrap();
    let mut curated_spec = spec.clone();
    curated_spec.curated_db_only = true;

    let response = assemble(&g, &curated_spec);
    let forward = response.forward.unwrap();
    assert_eq!(forward.total_paths(), 0);

    let response = assemble(&g, &spec);
    let forward = response.forward.unwrap();
    assert_eq!(forward.total_paths(), 1);
}

#[test]
fn universal_invariant_zero_timeout_returns_empty_well_formed_response() {
    let g = full_graph();
    let mut spec = SearchSpec::new(Some("BRCA1".into()), Some("BRCA2".into())).unwrap();
    spec.user_timeout = Some(0.0);
    let response = assemble(&g, &spec);

    assert!(response.timed_out);
    let forward = response.forward.unwrap();
    assert_eq!(forward.total_paths(), 0);
}

#[test]
fn subgraph_request_resolves_nodes_and_induced_edges() {
    let g = full_graph();
    let config = Config::default();
    let ontology = NullOntologyService;
    let url_service = NullIdentifierUrlService;
    let mesh = NullMeshRefCountService;
    let assembler = ResponseAssembler::new(&g, &ontology, &url_service, &mesh, &config);

    let request = causal_path_search::SubgraphRequest::new(
        vec![
            causal_path_search::spec::SubgraphNodeRef {
                name: "BRCA2".into(),
                namespace: "HGNC".into(),
                identifier: "1101".into(),
            },
            causal_path_search::spec::SubgraphNodeRef {
                name: "HDAC3".into(),
                namespace: "HGNC".into(),
                identifier: "5".into(),
            },
            causal_path_search::spec::SubgraphNodeRef {
                name: "H2AZ1".into(),
                namespace: "HGNC".into(),
                identifier: "6".into(),
            },
        ],
        &config,
    )
    .unwrap();

    // Subgraph edges are every edge *incident* to a resolved node, not just
    // edges whose both endpoints were requested — so CHEK1's and NCOA's
    // edges into BRCA2/HDAC3 show up too: (BRCA2,HDAC3), (BRCA2,H2AZ1),
    // (CHEK1,BRCA2), (NCOA,BRCA2), (CHEK1,HDAC3).
    let results = assembler.assemble_subgraph(&request);
    assert_eq!(results.resolved.len(), 3);
    assert!(results.not_in_graph.is_empty());
    assert_eq!(results.edges.len(), 5);
}
