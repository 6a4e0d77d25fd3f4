//! Drawing the node set and its payloads.

use tracing::{Span, field, instrument};

use super::validate::NodeBounds;
use crate::{
    draw::DrawSource, error::DrawError, generator::Generator, graph::Graph, value::Attributes,
};

/// Draws a node count within `bounds` and one payload per node, then adds
/// the nodes to `graph` as `0..count` in order.
///
/// Returns the number of nodes added.
#[instrument(
    name = "generate.nodes",
    err,
    skip(graph, bounds, attributes, source),
    fields(min = bounds.min, max = field::Empty, drawn = field::Empty),
)]
pub(crate) fn sample_nodes(
    graph: &mut Graph,
    bounds: NodeBounds,
    attributes: &dyn Generator<Output = Attributes>,
    source: &mut dyn DrawSource,
) -> Result<usize, DrawError> {
    let span = Span::current();
    if let Some(max) = bounds.max {
        span.record("max", max);
    }

    let count = source.draw_size(bounds.min, bounds.max)?;
    let payloads = (0..count)
        .map(|_| attributes.draw(source))
        .collect::<Result<Vec<_>, _>>()?;
    for (id, payload) in payloads.into_iter().enumerate() {
        graph.add_node(id, payload);
    }

    span.record("drawn", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        draw::ChoiceTape,
        generator::{FixedAttributes, IntRange},
        value::{Value, attributes},
    };

    #[test]
    fn nodes_are_dense_and_carry_their_payloads() {
        let mut graph: Graph = Graph::new(false, false);
        let payload = FixedAttributes::empty().with_field("n", IntRange::new(0, 9).map(Value::Int));
        // Count 3 (min 1, max 4), then one value per node.
        let mut tape = ChoiceTape::new(vec![2, 7, 8, 9]);
        let bounds = NodeBounds {
            min: 1,
            max: Some(4),
        };
        let count = sample_nodes(&mut graph, bounds, &payload, &mut tape).expect("no limit");
        assert_eq!(count, 3);
        assert_eq!(graph.nodes().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(graph.node_attributes(&2), Some(&attributes([("n", 9)])));
    }

    #[test]
    fn failing_payload_leaves_graph_untouched() {
        let mut graph: Graph = Graph::new(false, false);
        let payload = FixedAttributes::empty().with_field("n", IntRange::new(0, 9).map(Value::Int));
        let mut tape = ChoiceTape::new(vec![2, 1]).with_limit(2);
        let bounds = NodeBounds { min: 2, max: None };
        let err = sample_nodes(&mut graph, bounds, &payload, &mut tape)
            .expect_err("second payload overruns");
        assert_eq!(err, DrawError::Overrun { limit: 2 });
        assert!(graph.is_empty());
    }
}
