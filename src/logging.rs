//! Structured logging init, shared by the library and the demonstration CLI.

use crate::error::{GraphError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes a global `tracing` subscriber filtered by `level` (e.g.
/// `"info"`, `"causal_path_search=debug"`). Safe to call once per process;
/// a second call returns an error rather than panicking.
pub fn init(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|e| GraphError::Validation(format!("invalid log level: {e}")))?,
        )
        .with_target(true)
        .try_init()
        .map_err(|_| GraphError::Validation("logging already initialized".into()))
}
