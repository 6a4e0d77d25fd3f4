//! Command implementations and argument parsing for the graphgen CLI.

use std::{
    fmt,
    io::{self, Write},
    str::FromStr,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use graphgen_core::{
    Attributes, FixedAttributes, Generator, Graph, GraphBuilder, GraphGenError, GraphVariant, IntRange,
    RngSource, Value,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "graphgen", about = "Sample constrained random graphs.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Draw one graph from a seeded source and print it.
    Sample(SampleCommand),
}

/// Options accepted by the `sample` command.
#[derive(Debug, Args, Clone)]
pub struct SampleCommand {
    /// Seed of the pseudo-random draw source.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Smallest number of nodes.
    #[arg(long = "min-nodes", default_value_t = 0, allow_negative_numbers = true)]
    pub min_nodes: i64,

    /// Largest number of nodes, or `none` for no limit.
    #[arg(long = "max-nodes", default_value = "25", allow_negative_numbers = true)]
    pub max_nodes: Bound,

    /// Smallest number of edges.
    #[arg(long = "min-edges", default_value_t = 0, allow_negative_numbers = true)]
    pub min_edges: i64,

    /// Largest number of edges, or `none` for no limit.
    #[arg(long = "max-edges", default_value = "none", allow_negative_numbers = true)]
    pub max_edges: Bound,

    /// Graph variant to draw.
    #[arg(long, value_enum, default_value_t = VariantArg::Graph)]
    pub variant: VariantArg,

    /// Allow edges from a node to itself.
    #[arg(long = "self-loops")]
    pub self_loops: bool,

    /// Do not force the graph to be connected.
    #[arg(long)]
    pub disconnected: bool,

    /// Attach a drawn integer `weight` in `[1, 100]` to every edge.
    #[arg(long)]
    pub weighted: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Optional count bound accepting `none` for "no limit".
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bound(pub Option<i64>);

impl FromStr for Bound {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            return Ok(Self(None));
        }
        trimmed
            .parse::<i64>()
            .map(|value| Self(Some(value)))
            .map_err(|err| format!("expected an integer or `none`, got `{trimmed}`: {err}"))
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("none"),
        }
    }
}

/// Graph variants selectable on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum VariantArg {
    /// Undirected, simple.
    Graph,
    /// Directed, simple.
    Digraph,
    /// Undirected with parallel edges.
    Multigraph,
    /// Directed with parallel edges.
    Multidigraph,
}

impl From<VariantArg> for GraphVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Graph => Self::Graph,
            VariantArg::Digraph => Self::DiGraph,
            VariantArg::Multigraph => Self::MultiGraph,
            VariantArg::Multidigraph => Self::MultiDiGraph,
        }
    }
}

/// Rendering of a sampled graph.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// One line per node and edge.
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The request was rejected or generation failed.
    #[error(transparent)]
    Core(#[from] GraphGenError),
}

/// Outcome of the `sample` command.
#[derive(Debug, Clone)]
pub struct SampleSummary {
    /// Seed the graph was drawn from.
    pub seed: u64,
    /// Variant of the graph.
    pub variant: GraphVariant,
    /// Requested rendering.
    pub format: OutputFormat,
    /// The sampled graph.
    pub graph: Graph,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the request is infeasible or generation fails.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use graphgen_cli::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["graphgen", "sample", "--seed", "3", "--max-nodes", "6"]);
/// let summary = run_cli(cli)?;
/// assert!(summary.graph.node_count() <= 6);
/// # Ok::<(), graphgen_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<SampleSummary, CliError> {
    match cli.command {
        Command::Sample(sample) => {
            Span::current().record("command", field::display("sample"));
            sample_command(sample)
        }
    }
}

#[instrument(
    name = "cli.sample",
    err,
    skip(command),
    fields(seed = command.seed, variant = field::Empty),
)]
pub(super) fn sample_command(command: SampleCommand) -> Result<SampleSummary, CliError> {
    let variant = GraphVariant::from(command.variant);
    Span::current().record("variant", field::display(variant));

    let mut builder = GraphBuilder::new()
        .with_variant(variant)
        .with_min_nodes(command.min_nodes)
        .with_max_nodes(command.max_nodes.0)
        .with_min_edges(command.min_edges)
        .with_max_edges(command.max_edges.0)
        .with_self_loops(command.self_loops)
        .with_connected(!command.disconnected);
    if command.weighted {
        builder = builder.with_edge_attributes(
            FixedAttributes::empty().with_field("weight", IntRange::new(1, 100).map(Value::Int)),
        );
    }

    let graph = builder
        .build()?
        .generate(&mut RngSource::seeded(command.seed))?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph sampled"
    );
    Ok(SampleSummary {
        seed: command.seed,
        variant,
        format: command.format,
        graph,
    })
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    seed: u64,
    variant: String,
    graph: &'a Graph,
}

/// Renders `summary` to `writer` in its requested format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use graphgen_cli::cli::{OutputFormat, SampleSummary, render_summary};
/// use graphgen_core::{Attributes, Graph, GraphVariant};
///
/// let mut graph: Graph = Graph::new(false, false);
/// graph.add_edge(0, 1, Attributes::new());
/// let summary = SampleSummary {
///     seed: 1,
///     variant: GraphVariant::Graph,
///     format: OutputFormat::Text,
///     graph,
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer.into_inner()).expect("utf-8");
/// assert!(text.ends_with("0 -- 1\n"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_summary(summary: &SampleSummary, mut writer: impl Write) -> io::Result<()> {
    match summary.format {
        OutputFormat::Text => render_text(summary, &mut writer),
        OutputFormat::Json => {
            let document = JsonSummary {
                seed: summary.seed,
                variant: summary.variant.to_string(),
                graph: &summary.graph,
            };
            serde_json::to_writer_pretty(&mut writer, &document)?;
            writeln!(writer)
        }
    }
}

fn render_text(summary: &SampleSummary, writer: &mut impl Write) -> io::Result<()> {
    let graph = &summary.graph;
    writeln!(writer, "variant: {}", summary.variant)?;
    writeln!(writer, "seed: {}", summary.seed)?;
    writeln!(writer, "nodes: {}", graph.node_count())?;
    writeln!(writer, "edges: {}", graph.edge_count())?;
    for (node, attributes) in graph.nodes_with_attributes() {
        writeln!(writer, "{node}{}", AttributeList(attributes))?;
    }
    let arrow = if graph.is_directed() { "->" } else { "--" };
    for edge in graph.edges() {
        writeln!(
            writer,
            "{} {arrow} {}{}",
            edge.source,
            edge.target,
            AttributeList(edge.attributes)
        )?;
    }
    Ok(())
}

/// Renders a payload as ` {key: value, ...}`, or nothing when empty.
struct AttributeList<'a>(&'a Attributes);

impl fmt::Display for AttributeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        f.write_str(" {")?;
        for (index, (key, value)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}
