//! Bridge into proptest.
//!
//! Proptest shrinks the raw choice vector (fewer and smaller choices), and a
//! [`ChoiceTape`] maps smaller choices onto fewer nodes, fewer edges and
//! earlier spanning parents, so failing graphs minimise toward short paths.

use std::fmt;

use proptest::{collection, prelude::*};

use crate::{
    draw::ChoiceTape,
    graph::Graph,
    pipeline::{GraphGenerator, NodeLabels},
};

/// Longest choice vector handed to a single generation.
pub const MAX_CHOICES: usize = 512;

/// Builds a proptest [`Strategy`] producing graphs from `generator`.
///
/// Choice vectors whose replay fails (for example when unique node keys run
/// out) are rejected rather than reported as failures.
///
/// # Examples
/// ```
/// use graphgen_core::{GraphBuilder, graph_strategy};
/// use proptest::prelude::*;
///
/// let generator = GraphBuilder::new().with_max_nodes(Some(6)).build()?;
/// proptest!(|(graph in graph_strategy(generator.clone()))| {
///     prop_assert!(graph.node_count() <= 6);
///     prop_assert!(graph.is_weakly_connected());
/// });
/// # Ok::<(), graphgen_core::GraphGenError>(())
/// ```
pub fn graph_strategy<L>(generator: GraphGenerator<L>) -> impl Strategy<Value = Graph<L::Key>>
where
    L: NodeLabels,
    L::Key: fmt::Debug,
{
    collection::vec(any::<u64>(), 0..=MAX_CHOICES).prop_filter_map(
        "choice vector could not be replayed into a graph",
        move |choices| generator.generate(&mut ChoiceTape::new(choices)).ok(),
    )
}
