//! Command-line interface for sampling constrained random graphs.
//!
//! The `sample` command builds a generation request from flags, draws one
//! graph from a seeded source and renders it as text or JSON.

mod commands;

pub use commands::{
    Bound, Cli, CliError, Command, OutputFormat, SampleCommand, SampleSummary, VariantArg,
    render_summary, run_cli,
};

#[cfg(test)]
mod tests;
