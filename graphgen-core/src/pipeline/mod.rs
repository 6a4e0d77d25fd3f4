//! The generation pipeline.
//!
//! Stages run strictly in order against a single draw source: node sampling,
//! the connectivity skeleton, capacity resolution with edge sampling, and
//! finally relabelling. Validation has already happened when a
//! [`GraphGenerator`] exists.

mod capacity;
mod edges;
mod labels;
mod nodes;
mod spanner;
mod validate;

use std::fmt;

use tracing::{Span, field, instrument};

pub use capacity::{Capacity, capacity, pair_capacity};
pub use labels::{DenseLabels, DrawnLabels, NodeLabels};

pub(crate) use capacity::EdgeRequest;
pub(crate) use validate::{NodeBounds, RequestedBounds, validate};

use self::capacity::EdgeBand;
use crate::{Result, draw::DrawSource, generator::AttributeGenerator, graph::Graph};

/// Variant flags and per-element payload generators shared by every stage.
#[derive(Clone)]
pub(crate) struct Shape {
    pub directed: bool,
    pub multi: bool,
    pub self_loops: bool,
    pub connected: bool,
    pub node_attributes: AttributeGenerator,
    pub edge_attributes: AttributeGenerator,
}

/// A validated generation request.
///
/// Built by [`crate::GraphBuilder::build`]. Each call to
/// [`GraphGenerator::generate`] produces one graph from the given source;
/// the generator itself is never mutated, so it can be shared and reused.
#[derive(Clone)]
pub struct GraphGenerator<L = DenseLabels> {
    nodes: NodeBounds,
    edges: EdgeRequest,
    shape: Shape,
    labels: L,
}

impl<L: fmt::Debug> fmt::Debug for GraphGenerator<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphGenerator")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .field("directed", &self.shape.directed)
            .field("multi", &self.shape.multi)
            .field("self_loops", &self.shape.self_loops)
            .field("connected", &self.shape.connected)
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}

impl<L: NodeLabels> GraphGenerator<L> {
    pub(crate) fn new(nodes: NodeBounds, edges: EdgeRequest, shape: Shape, labels: L) -> Self {
        Self {
            nodes,
            edges,
            shape,
            labels,
        }
    }

    /// Returns whether generated graphs are directed.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.shape.directed
    }

    /// Returns whether generated graphs allow parallel edges.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.shape.multi
    }

    /// Generates one graph, drawing every choice from `source`.
    ///
    /// # Errors
    /// Returns [`crate::GraphGenError::Draw`] when the source or a payload
    /// generator fails; no partial graph is returned.
    ///
    /// # Examples
    /// ```
    /// use graphgen_core::{GraphBuilder, RngSource};
    ///
    /// let generator = GraphBuilder::new()
    ///     .with_min_nodes(3)
    ///     .with_max_nodes(Some(8))
    ///     .build()?;
    /// let graph = generator.generate(&mut RngSource::seeded(11))?;
    /// assert!((3..=8).contains(&graph.node_count()));
    /// assert!(graph.is_weakly_connected());
    /// # Ok::<(), graphgen_core::GraphGenError>(())
    /// ```
    #[instrument(
        name = "generate",
        err,
        skip(self, source),
        fields(
            directed = self.shape.directed,
            multi = self.shape.multi,
            connected = self.shape.connected,
            nodes = field::Empty,
            edges = field::Empty,
        ),
    )]
    pub fn generate(&self, source: &mut dyn DrawSource) -> Result<Graph<L::Key>> {
        let shape = &self.shape;
        let span = Span::current();

        let mut graph = Graph::new(shape.directed, shape.multi);
        let nodes = nodes::sample_nodes(
            &mut graph,
            self.nodes,
            shape.node_attributes.as_ref(),
            source,
        )?;
        span.record("nodes", nodes);
        if nodes == 0 {
            span.record("edges", 0);
            record_graph(0, 0);
            return Ok(Graph::new(shape.directed, shape.multi));
        }

        if shape.connected {
            spanner::span_nodes(&mut graph, shape.edge_attributes.as_ref(), source)?;
        }

        let present = graph.edge_count();
        let ceiling = capacity(
            nodes,
            present,
            shape.directed,
            shape.multi,
            shape.self_loops,
        );
        let band = EdgeBand::resolve(self.edges, present, ceiling);
        edges::sample_edges(
            &mut graph,
            band,
            shape.self_loops,
            shape.edge_attributes.as_ref(),
            source,
        )?;

        let edge_count = graph.edge_count();
        let graph = self.labels.relabel(graph, source)?;
        span.record("edges", edge_count);
        record_graph(nodes, edge_count);
        Ok(graph)
    }
}

#[cfg(feature = "metrics")]
fn record_graph(nodes: usize, edges: usize) {
    metrics::counter!("graphgen_graphs_generated").increment(1);
    metrics::counter!("graphgen_nodes_generated").increment(nodes as u64);
    metrics::counter!("graphgen_edges_generated").increment(edges as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_graph(_nodes: usize, _edges: usize) {}
