//! Benchmark support crate for graphgen.
//!
//! Provides the parameter grid and setup helpers shared by the Criterion
//! benchmarks of whole-graph generation and edge sampling.

pub mod error;
pub mod params;
