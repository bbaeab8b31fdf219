//! Synthesis errors

use stackgraph_config::ConfigError;
use stackgraph_core::GraphError;

/// Error of a whole synthesis run
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Raw input could not be resolved; no declaration was built
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The graph was rejected during construction
    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),
}

impl SynthError {
    /// True when the run failed before any declaration existed
    #[inline]
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
