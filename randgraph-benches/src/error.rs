//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of panicking
//! inside Criterion closures.

use randgraph_core::GraphError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Model construction, configuration or generation failed.
    #[error("graph setup failed: {0}")]
    Graph(#[from] GraphError),
}
