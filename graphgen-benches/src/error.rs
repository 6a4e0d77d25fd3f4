//! Benchmark setup error type.

use graphgen_core::GraphGenError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// The benchmark request was rejected or generation failed.
    #[error("graph generation failed: {0}")]
    Generate(#[from] GraphGenError),
    /// A node count did not fit the builder's signed bounds.
    #[error("node count {nodes} does not fit in an i64")]
    NodeCount {
        /// The offending node count.
        nodes: usize,
    },
    /// An edge count did not fit the builder's signed bounds.
    #[error("edge count {edges} does not fit in an i64")]
    EdgeCount {
        /// The offending edge count.
        edges: usize,
    },
}
