//! Error taxonomy for the query pipeline.
//!
//! [`GraphError::Validation`] aborts spec construction before a query is
//! even planned; [`GraphError::MissingParameters`] and
//! [`GraphError::InvalidParameters`] are raised by the adapter layer
//! ([`crate::response_assembler`]) when a planned query is missing an
//! endpoint or carries a contradictory combination of arguments. Everything
//! that happens while decorating a single statement or edge — a statement
//! dict that fails validation, say — is absorbed locally where it's found
//! (see [`crate::graph::GraphStore::from_fixture_json`]) and logged at
//! `warn`, not raised here.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors surfaced by the query pipeline.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The search specification violated a declared constraint (unknown
    /// field, `path_length < 1`, `max_per_node < 1`, `cull_best_node < 2`,
    /// a subgraph request with zero or more than 100 nodes, ...).
    #[error("invalid search specification: {0}")]
    Validation(String),

    /// An algorithm adapter was invoked without a field its algorithm
    /// requires. Always a programmer error in the planner/adapter, never
    /// caused by caller input.
    #[error("missing required parameter: {0}")]
    MissingParameters(&'static str),

    /// An algorithm invocation carried contradictory arguments (e.g. BFS
    /// with both a source and a target set).
    #[error("invalid algorithm parameters: {0}")]
    InvalidParameters(String),

    /// An internal lookup (node handle, mesh hash, ...) came back empty
    /// where the caller asserted it must be present.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Failure decoding or encoding the wire protocol.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
