//! Final relabelling of the dense `0..n` node ids.

use std::hash::Hash;

use tracing::{debug, instrument};

use crate::{
    draw::{self, DrawSource},
    error::DrawError,
    generator::Generator,
    graph::Graph,
};

/// Maps a generated graph on dense integer ids onto its final node keys.
pub trait NodeLabels {
    /// Type of the final node keys.
    type Key: Clone + Eq + Hash;

    /// Relabels every node of `graph`, drawing from `source` if needed.
    ///
    /// # Errors
    /// Returns a [`DrawError`] when the keys cannot be drawn.
    fn relabel(
        &self,
        graph: Graph<usize>,
        source: &mut dyn DrawSource,
    ) -> Result<Graph<Self::Key>, DrawError>;
}

/// Keeps the dense ids `0..n` without drawing anything.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DenseLabels;

impl NodeLabels for DenseLabels {
    type Key = usize;

    fn relabel(
        &self,
        graph: Graph<usize>,
        _source: &mut dyn DrawSource,
    ) -> Result<Graph<usize>, DrawError> {
        Ok(graph)
    }
}

/// Draws one distinct key per node from a key generator.
///
/// Keys are assigned in draw order: node `i` receives the `i`-th distinct key.
///
/// # Examples
/// ```
/// use graphgen_core::{ChoiceTape, DrawnLabels, Graph, IntRange, NodeLabels};
///
/// let mut graph: Graph = Graph::new(false, false);
/// graph.add_edge(0, 1, Default::default());
/// let labels = DrawnLabels::new(IntRange::new(100, 200));
/// let relabelled = labels.relabel(graph, &mut ChoiceTape::new(vec![7, 3]))?;
/// assert!(relabelled.has_edge(&107, &103));
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DrawnLabels<G> {
    keys: G,
}

impl<G> DrawnLabels<G> {
    /// Wraps the generator that produces node keys.
    #[must_use]
    pub const fn new(keys: G) -> Self {
        Self { keys }
    }

    /// Returns the key generator.
    #[must_use]
    pub const fn keys(&self) -> &G {
        &self.keys
    }
}

impl<G> NodeLabels for DrawnLabels<G>
where
    G: Generator,
    G::Output: Clone + Eq + Hash,
{
    type Key = G::Output;

    #[instrument(name = "generate.relabel", err, skip_all, fields(nodes = graph.node_count()))]
    fn relabel(
        &self,
        graph: Graph<usize>,
        source: &mut dyn DrawSource,
    ) -> Result<Graph<G::Output>, DrawError> {
        let requested = graph.node_count();
        let keys = draw::draw_unique(source, &self.keys, requested)?;
        debug!(keys = keys.len(), "drew node keys");
        // `draw_unique` only returns distinct keys of the requested length.
        graph.relabel(keys).ok_or(DrawError::Exhausted {
            requested,
            produced: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        draw::ChoiceTape,
        generator::{IntRange, SampledFrom},
        value::Attributes,
    };

    fn pair() -> Graph {
        let mut graph = Graph::new(true, false);
        graph.add_edge(0, 1, Attributes::new());
        graph.add_node(2, Attributes::new());
        graph
    }

    #[test]
    fn dense_labels_keep_the_graph() {
        let graph = pair();
        let mut tape = ChoiceTape::new(Vec::new()).with_limit(0);
        let relabelled = DenseLabels
            .relabel(graph.clone(), &mut tape)
            .expect("no draws are needed");
        assert_eq!(relabelled, graph);
    }

    #[test]
    fn drawn_labels_follow_draw_order() {
        let labels = DrawnLabels::new(SampledFrom::new(vec!["a", "b", "c", "d"]));
        // 3 -> "d", 3 again is a duplicate and is redrawn, then "a", then "c".
        let mut tape = ChoiceTape::new(vec![3, 3, 0, 2]);
        let relabelled = labels.relabel(pair(), &mut tape).expect("no limit");
        assert_eq!(relabelled.nodes().copied().collect::<Vec<_>>(), vec!["d", "a", "c"]);
        assert!(relabelled.has_edge(&"d", &"a"));
        assert!(!relabelled.has_edge(&"a", &"d"));
    }

    #[test]
    fn too_few_distinct_keys_exhaust() {
        let labels = DrawnLabels::new(IntRange::new(0, 1));
        let mut tape = ChoiceTape::new(Vec::new());
        let err = labels
            .relabel(pair(), &mut tape)
            .expect_err("an exhausted tape only yields zero");
        assert_eq!(
            err,
            DrawError::Exhausted {
                requested: 3,
                produced: 1
            }
        );
    }
}
