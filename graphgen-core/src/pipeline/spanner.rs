//! Connectivity skeleton: one edge per node back into the nodes before it.
//!
//! After node `k` is linked to some node with a smaller index, nodes
//! `0..=k` form a single (weakly) connected component, so the whole graph is
//! connected once every node has been linked.

use tracing::{Span, field, instrument};

use crate::{
    draw::DrawSource, error::DrawError, generator::Generator, graph::Graph, value::Attributes,
};

/// Adds `n - 1` spanning edges to the `n` nodes of `graph`.
///
/// The parent of node `k` is drawn as an offset back from `k - 1`, so the
/// minimal choice links each node to its immediate predecessor and shrinking
/// converges on a path graph rather than a star. Directed edges point from
/// the parent to the new node. Returns the number of edges added.
#[instrument(
    name = "generate.span",
    err,
    skip(graph, attributes, source),
    fields(nodes = graph.node_count(), edges = field::Empty),
)]
pub(crate) fn span_nodes(
    graph: &mut Graph,
    attributes: &dyn Generator<Output = Attributes>,
    source: &mut dyn DrawSource,
) -> Result<usize, DrawError> {
    let nodes = graph.node_count();
    let mut added = 0;
    for node in 1..nodes {
        let predecessor = node - 1;
        let back = source.draw_range(0, predecessor)?;
        let parent = predecessor - back;
        let payload = attributes.draw(source)?;
        graph.add_edge(parent, node, payload);
        added += 1;
    }
    Span::current().record("edges", added);
    Ok(added)
}
