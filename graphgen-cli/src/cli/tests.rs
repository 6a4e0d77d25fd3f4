//! Unit tests for argument parsing, sampling and rendering.

use super::commands::sample_command;
use super::{
    Bound, Cli, CliError, Command, OutputFormat, SampleCommand, SampleSummary, VariantArg,
    render_summary, run_cli,
};

use clap::Parser;
use graphgen_core::{
    ConfigurationErrorCode, Graph, GraphVariant, Value, attributes,
};
use graphgen_test_support::tracing::RecordingLayer;
use rstest::{fixture, rstest};
use tracing_subscriber::layer::SubscriberExt;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[fixture]
fn command() -> SampleCommand {
    match Cli::parse_from(["graphgen", "sample"]).command {
        Command::Sample(sample) => sample,
    }
}

fn render(summary: &SampleSummary) -> Result<String, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    render_summary(summary, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[rstest]
fn defaults_mirror_the_builder(command: SampleCommand) {
    assert_eq!(command.seed, 0);
    assert_eq!(command.min_nodes, 0);
    assert_eq!(command.max_nodes, Bound(Some(25)));
    assert_eq!(command.min_edges, 0);
    assert_eq!(command.max_edges, Bound(None));
    assert_eq!(command.variant, VariantArg::Graph);
    assert!(!command.self_loops);
    assert!(!command.disconnected);
    assert_eq!(command.format, OutputFormat::Text);
}

#[rstest]
#[case::integer("7", Bound(Some(7)))]
#[case::negative("-1", Bound(Some(-1)))]
#[case::none("none", Bound(None))]
#[case::padded(" NONE ", Bound(None))]
fn bound_parses(#[case] raw: &str, #[case] expected: Bound) {
    assert_eq!(raw.parse::<Bound>(), Ok(expected));
}

#[test]
fn bound_rejects_garbage() {
    assert!("many".parse::<Bound>().is_err());
}

#[test]
fn flags_are_parsed() {
    let cli = Cli::parse_from([
        "graphgen",
        "sample",
        "--seed",
        "9",
        "--max-edges",
        "-1",
        "--variant",
        "multidigraph",
        "--self-loops",
        "--disconnected",
        "--format",
        "json",
    ]);
    let Command::Sample(sample) = cli.command;
    assert_eq!(sample.seed, 9);
    assert_eq!(sample.max_edges, Bound(Some(-1)));
    assert_eq!(GraphVariant::from(sample.variant), GraphVariant::MultiDiGraph);
    assert!(sample.self_loops);
    assert!(sample.disconnected);
    assert_eq!(sample.format, OutputFormat::Json);
}

#[rstest]
fn sampling_is_deterministic(command: SampleCommand) -> TestResult {
    let first = sample_command(command.clone())?;
    let second = sample_command(command)?;
    assert_eq!(first.graph, second.graph);
    assert!(first.graph.is_weakly_connected());
    Ok(())
}

#[rstest]
fn weighted_edges_carry_weights(mut command: SampleCommand) -> TestResult {
    command.min_nodes = 3;
    command.weighted = true;
    let summary = sample_command(command)?;
    assert!(summary.graph.edges().all(|edge| {
        matches!(
            edge.attributes.get(&Value::from("weight")),
            Some(Value::Int(weight)) if (1..=100).contains(weight)
        )
    }));
    Ok(())
}

#[rstest]
fn infeasible_requests_fail(mut command: SampleCommand) {
    command.max_nodes = Bound(Some(8));
    command.max_edges = Bound(Some(2));
    let cli = Cli {
        command: Command::Sample(command),
    };
    let err = run_cli(cli).expect_err("eight nodes need seven edges");
    let CliError::Core(core) = err;
    assert_eq!(
        core.configuration_code(),
        Some(ConfigurationErrorCode::ConnectedEdgeShortfall)
    );
}

#[test]
fn text_rendering_lists_nodes_and_edges() -> TestResult {
    let mut graph: Graph = Graph::new(true, false);
    graph.add_node(0, attributes([("color", "red")]));
    graph.add_edge(0, 1, attributes([("weight", 3)]));
    let summary = SampleSummary {
        seed: 4,
        variant: GraphVariant::DiGraph,
        format: OutputFormat::Text,
        graph,
    };
    assert_eq!(
        render(&summary)?,
        concat!(
            "variant: digraph\n",
            "seed: 4\n",
            "nodes: 2\n",
            "edges: 1\n",
            "0 {\"color\": \"red\"}\n",
            "1\n",
            "0 -> 1 {\"weight\": 3}\n",
        )
    );
    Ok(())
}

#[test]
fn json_rendering_is_parseable() -> TestResult {
    let mut graph: Graph = Graph::new(false, true);
    graph.add_edge(0, 1, attributes([("weight", 3)]));
    graph.add_edge(1, 0, attributes([("weight", 5)]));
    let summary = SampleSummary {
        seed: 2,
        variant: GraphVariant::MultiGraph,
        format: OutputFormat::Json,
        graph,
    };
    let document: serde_json::Value = serde_json::from_str(&render(&summary)?)?;
    assert_eq!(document["seed"], 2);
    assert_eq!(document["variant"], "multigraph");
    assert_eq!(document["graph"]["multi"], true);
    assert_eq!(document["graph"]["edges"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        document["graph"]["edges"][1]["attributes"],
        serde_json::json!([["weight", 5]])
    );
    Ok(())
}

#[rstest]
fn sample_span_records_request(mut command: SampleCommand) -> TestResult {
    command.seed = 5;
    command.variant = VariantArg::Digraph;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let cli = Cli {
        command: Command::Sample(command),
    };
    tracing::subscriber::with_default(subscriber, || run_cli(cli))?;

    let sample = layer.span("cli.sample").ok_or("cli.sample span must exist")?;
    assert_eq!(sample.parent.as_deref(), Some("cli.run"));
    assert_eq!(sample.fields.get("seed"), Some(&"5".to_owned()));
    assert_eq!(sample.fields.get("variant"), Some(&"digraph".to_owned()));
    let generate = layer.span("generate").ok_or("generate span must exist")?;
    assert_eq!(generate.parent.as_deref(), Some("cli.sample"));
    assert!(layer.has_message(tracing::Level::INFO, "graph sampled"));
    Ok(())
}
