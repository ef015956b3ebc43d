//! A causal-influence-graph path-search query pipeline over the INDRA
//! statement network: given a search specification, finds and decorates
//! paths, shared interactors, ontological relatives, and induced subgraphs
//! between biomedical entities.
//!
//! ## Quick start
//!
//! ```rust
//! use causal_path_search::{Config, ResponseAssembler, SearchSpec};
//! use causal_path_search::external::{NullIdentifierUrlService, NullMeshRefCountService, NullOntologyService};
//! use causal_path_search::graph::GraphStore;
//!
//! let store = GraphStore::builder()
//!     .node("BRCA1", "HGNC", "1100")
//!     .node("CHEK1", "HGNC", "1925")
//!     .edge("BRCA1", "CHEK1", Default::default())
//!     .build();
//! let config = Config::default();
//! let ontology = NullOntologyService;
//! let url_service = NullIdentifierUrlService;
//! let mesh = NullMeshRefCountService;
//! let assembler = ResponseAssembler::new(&store, &ontology, &url_service, &mesh, &config);
//!
//! let spec = SearchSpec::new(Some("BRCA1".into()), Some("CHEK1".into()))?;
//! let response = assembler.assemble(&spec)?;
//! assert!(response.forward.is_some());
//! # Ok::<(), causal_path_search::GraphError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`spec`] — the wire-facing search specification and its derived filter
//!   projection
//! - [`graph`] — the read-only graph store and its signed-node variant
//! - [`algorithms`] — the five path-finding/interactor families
//! - [`planner`] — maps a spec to the set of algorithm invocations it needs
//! - [`result_managers`] — decorates raw algorithm output under the
//!   deadline/cap/filter contract
//! - [`response_assembler`] — orchestrates planner + result managers into a
//!   [`model::Response`]

pub mod algorithms;
pub mod config;
pub mod error;
pub mod external;
pub mod graph;
pub mod hash;
pub mod logging;
pub mod model;
pub mod planner;
pub mod result_managers;
pub mod response_assembler;
pub mod spec;

pub use crate::config::Config;
pub use crate::error::{GraphError, Result};
pub use crate::model::Response;
pub use crate::response_assembler::ResponseAssembler;
pub use crate::spec::{FilterSet, SearchSpec, SubgraphRequest};
