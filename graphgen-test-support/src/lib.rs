//! Shared test utilities used across graphgen crates.

pub mod graph;
pub mod payloads;
pub mod tracing;
