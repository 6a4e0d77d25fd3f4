use graphgen_core::{
    ChoiceTape, GraphBuilder, GraphVariant, Recorder, RngSource, SizePolicy, TextOf,
};
use graphgen_test_support::payloads::weighted;
use rstest::rstest;

#[rstest]
fn recorded_choices_replay_the_same_graph(
    #[values(
        GraphVariant::Graph,
        GraphVariant::DiGraph,
        GraphVariant::MultiGraph,
        GraphVariant::MultiDiGraph
    )]
    variant: GraphVariant,
    #[values(0, 7, 99)] seed: u64,
) {
    let generator = GraphBuilder::new()
        .with_variant(variant)
        .with_max_nodes(None)
        .with_self_loops(true)
        .with_node_attributes(weighted())
        .with_edge_attributes(weighted())
        .build()
        .expect("valid configuration");

    let mut recorder = Recorder::new(RngSource::seeded(seed));
    let original = generator
        .generate(&mut recorder)
        .expect("rng sources never fail");
    let choices = recorder.into_choices();

    let mut tape = ChoiceTape::new(choices.clone()).with_limit(choices.len());
    let replayed = generator
        .generate(&mut tape)
        .expect("replay consumes exactly the recorded choices");
    assert_eq!(replayed, original);
    assert_eq!(tape.position(), choices.len());
}

#[test]
fn recorded_keys_replay_the_same_labels() {
    let generator = GraphBuilder::new()
        .with_min_nodes(3)
        .with_node_keys(TextOf::new("xyz", 1, Some(6)))
        .build()
        .expect("valid configuration");

    let mut recorder = Recorder::new(RngSource::seeded(12));
    let original = generator
        .generate(&mut recorder)
        .expect("six-letter strings over three characters are plentiful");
    let mut tape = ChoiceTape::new(recorder.into_choices());
    let replayed = generator.generate(&mut tape).expect("no limit");
    assert_eq!(replayed, original);
}

#[test]
fn size_policy_caps_unbounded_counts() {
    let generator = GraphBuilder::new()
        .with_variant(GraphVariant::MultiGraph)
        .with_min_nodes(2)
        .with_max_nodes(None)
        .build()
        .expect("valid configuration");
    for seed in 0..16 {
        let mut source = RngSource::seeded(seed).with_size_policy(SizePolicy::new(3));
        let graph = generator.generate(&mut source).expect("rng sources never fail");
        assert!(graph.node_count() <= 5);
        let spanning = graph.node_count() - 1;
        assert!(graph.edge_count() <= spanning + 3);
    }
}
