//! External collaborators the core calls but does not implement:
//! ontology lookups, identifier-URL construction, and mesh reference
//! counts. Production implementations live outside this crate; tests use
//! the stubs below.

use ahash::AHashMap;

/// One shared-ancestor hit from the ontology service.
#[derive(Debug, Clone, PartialEq)]
pub struct OntologyParent {
    pub name: String,
    pub namespace: String,
    pub identifier: String,
    pub url: String,
}

/// `shared_parents(src_ns, src_id, tgt_ns, tgt_id, immediate_only, label_allow_set, max)`.
pub trait OntologyService {
    fn shared_parents(
        &self,
        src_ns: &str,
        src_id: &str,
        tgt_ns: &str,
        tgt_id: &str,
        immediate_only: bool,
        label_allow_set: Option<&[String]>,
        max: usize,
    ) -> Vec<OntologyParent>;
}

/// `url(ns, id) → string or absent`.
pub trait IdentifierUrlService {
    fn url(&self, namespace: &str, identifier: &str) -> Option<String>;
}

/// `ref_counts(mesh_ids) → mapping hash → {source → count, "total": count}`.
pub trait MeshRefCountService {
    /// Per-hash source/total reference counts for the given mesh ids.
    fn ref_counts(&self, mesh_ids: &[String]) -> AHashMap<i64, MeshRefCount>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshRefCount {
    pub by_source: AHashMap<String, u32>,
    pub total: u32,
}

const STATEMENT_BASE_URL: &str = "https://db.indra.bio/statements";

/// `DB_URL_HASH(stmt_hash) = "<base>/from_hash/<hash>?format=html"`.
pub fn db_url_hash(stmt_hash: i64) -> String {
    format!("{STATEMENT_BASE_URL}/from_hash/{stmt_hash}?format=html")
}

/// `DB_URL_EDGE(subj_ns, subj_id, obj_ns, obj_id) = "<base>/from_agents?subject=<subj_id>@<subj_ns>&object=<obj_id>@<obj_ns>&format=html"`.
pub fn db_url_edge(subj_ns: &str, subj_id: &str, obj_ns: &str, obj_id: &str) -> String {
    format!(
        "{STATEMENT_BASE_URL}/from_agents?subject={subj_id}@{subj_ns}&object={obj_id}@{obj_ns}&format=html"
    )
}

/// An [`IdentifierUrlService`] with no backing data; always returns `None`.
/// Used where the graph store already carries precomputed `lookup` URLs
/// and no live identifier service is wired up (tests, the demonstration
/// CLI's offline mode).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullIdentifierUrlService;

impl IdentifierUrlService for NullIdentifierUrlService {
    fn url(&self, _namespace: &str, _identifier: &str) -> Option<String> {
        None
    }
}

/// An [`OntologyService`] with no backing data; always returns no parents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOntologyService;

impl OntologyService for NullOntologyService {
    fn shared_parents(
        &self,
        _src_ns: &str,
        _src_id: &str,
        _tgt_ns: &str,
        _tgt_id: &str,
        _immediate_only: bool,
        _label_allow_set: Option<&[String]>,
        _max: usize,
    ) -> Vec<OntologyParent> {
        Vec::new()
    }
}

/// A [`MeshRefCountService`] with no backing data; every hash comes back
/// with no reference counts at all. Used where no live mesh-ref-count
/// lookup is wired up (tests, the demonstration CLI's offline mode) —
/// context-weighted searches still run, they just see every edge as
/// equally unsupported by the requested mesh ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMeshRefCountService;

impl MeshRefCountService for NullMeshRefCountService {
    fn ref_counts(&self, _mesh_ids: &[String]) -> AHashMap<i64, MeshRefCount> {
        AHashMap::new()
    }
}
