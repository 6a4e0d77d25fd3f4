//! Builder for generation requests.
//!
//! [`GraphBuilder`] collects the bounds, variant flags and payload generators
//! of a request and validates them in [`GraphBuilder::build`] before any
//! value is drawn.

use std::{fmt, sync::Arc};

use crate::{
    Result,
    draw::DrawSource,
    generator::{AttributeGenerator, FixedAttributes, Generator},
    graph::Graph,
    pipeline::{
        DenseLabels, DrawnLabels, EdgeRequest, GraphGenerator, NodeLabels, RequestedBounds,
        Shape, validate,
    },
    value::Attributes,
};

/// The four graph variants expressed by the `directed` and `multi` flags.
///
/// # Examples
/// ```
/// use graphgen_core::GraphVariant;
///
/// assert_eq!(GraphVariant::from_flags(true, false), GraphVariant::DiGraph);
/// assert!(GraphVariant::MultiDiGraph.is_multi());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum GraphVariant {
    /// Undirected, at most one edge per pair.
    #[default]
    Graph,
    /// Directed, at most one edge per ordered pair.
    DiGraph,
    /// Undirected with parallel edges.
    MultiGraph,
    /// Directed with parallel edges.
    MultiDiGraph,
}

impl GraphVariant {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Graph,
        Self::DiGraph,
        Self::MultiGraph,
        Self::MultiDiGraph,
    ];

    /// Names the variant with the given flags.
    #[must_use]
    pub const fn from_flags(directed: bool, multi: bool) -> Self {
        match (directed, multi) {
            (false, false) => Self::Graph,
            (true, false) => Self::DiGraph,
            (false, true) => Self::MultiGraph,
            (true, true) => Self::MultiDiGraph,
        }
    }

    /// Returns whether edges have a direction.
    #[must_use]
    pub const fn is_directed(self) -> bool {
        matches!(self, Self::DiGraph | Self::MultiDiGraph)
    }

    /// Returns whether parallel edges are allowed.
    #[must_use]
    pub const fn is_multi(self) -> bool {
        matches!(self, Self::MultiGraph | Self::MultiDiGraph)
    }
}

impl fmt::Display for GraphVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Graph => "graph",
            Self::DiGraph => "digraph",
            Self::MultiGraph => "multigraph",
            Self::MultiDiGraph => "multidigraph",
        };
        f.write_str(name)
    }
}

/// Configures and validates a graph generation request.
///
/// Defaults: between 0 and 25 nodes, any number of edges, connected,
/// undirected, no self-loops or parallel edges, empty payloads and dense
/// `usize` node ids.
///
/// # Examples
/// ```
/// use graphgen_core::{GraphBuilder, GraphVariant, RngSource};
///
/// let graph = GraphBuilder::new()
///     .with_variant(GraphVariant::DiGraph)
///     .with_min_nodes(4)
///     .with_max_nodes(Some(4))
///     .with_max_edges(Some(6))
///     .build()?
///     .generate(&mut RngSource::seeded(5))?;
/// assert_eq!(graph.node_count(), 4);
/// assert!((3..=6).contains(&graph.edge_count()));
/// # Ok::<(), graphgen_core::GraphGenError>(())
/// ```
#[derive(Clone)]
pub struct GraphBuilder<L = DenseLabels> {
    min_nodes: i64,
    max_nodes: Option<i64>,
    min_edges: i64,
    max_edges: Option<i64>,
    self_loops: bool,
    connected: bool,
    directed: bool,
    multi: bool,
    node_attributes: AttributeGenerator,
    edge_attributes: AttributeGenerator,
    labels: L,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            min_nodes: 0,
            max_nodes: Some(25),
            min_edges: 0,
            max_edges: None,
            self_loops: false,
            connected: true,
            directed: false,
            multi: false,
            node_attributes: Arc::new(FixedAttributes::empty()),
            edge_attributes: Arc::new(FixedAttributes::empty()),
            labels: DenseLabels,
        }
    }
}

impl<L: fmt::Debug> fmt::Debug for GraphBuilder<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphBuilder")
            .field("min_nodes", &self.min_nodes)
            .field("max_nodes", &self.max_nodes)
            .field("min_edges", &self.min_edges)
            .field("max_edges", &self.max_edges)
            .field("self_loops", &self.self_loops)
            .field("connected", &self.connected)
            .field("directed", &self.directed)
            .field("multi", &self.multi)
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}

impl GraphBuilder {
    /// Creates a builder populated with the default request.
    ///
    /// # Examples
    /// ```
    /// use graphgen_core::GraphBuilder;
    ///
    /// let builder = GraphBuilder::new();
    /// assert_eq!(builder.max_nodes(), Some(25));
    /// assert!(builder.connected());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L> GraphBuilder<L> {
    /// Sets the smallest node count. Negative values fail validation.
    #[must_use]
    pub fn with_min_nodes(mut self, min_nodes: i64) -> Self {
        self.min_nodes = min_nodes;
        self
    }

    /// Sets the largest node count; `None` defers to the draw source.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: Option<i64>) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Sets the smallest edge count. It is truncated when the realised graph
    /// cannot hold that many edges.
    #[must_use]
    pub fn with_min_edges(mut self, min_edges: i64) -> Self {
        self.min_edges = min_edges;
        self
    }

    /// Sets the largest edge count; negative values allow no drawn edges and
    /// `None` lifts the limit.
    #[must_use]
    pub fn with_max_edges(mut self, max_edges: Option<i64>) -> Self {
        self.max_edges = max_edges;
        self
    }

    /// Allows or forbids edges from a node to itself.
    #[must_use]
    pub fn with_self_loops(mut self, self_loops: bool) -> Self {
        self.self_loops = self_loops;
        self
    }

    /// Requires the graph to be (weakly) connected.
    #[must_use]
    pub fn with_connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    /// Makes edges directed.
    #[must_use]
    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// Allows parallel edges.
    #[must_use]
    pub fn with_multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    /// Sets the `directed` and `multi` flags from a named variant.
    ///
    /// # Examples
    /// ```
    /// use graphgen_core::{GraphBuilder, GraphVariant};
    ///
    /// let builder = GraphBuilder::new().with_variant(GraphVariant::MultiGraph);
    /// assert!(builder.multi());
    /// assert!(!builder.directed());
    /// ```
    #[must_use]
    pub fn with_variant(mut self, variant: GraphVariant) -> Self {
        self.directed = variant.is_directed();
        self.multi = variant.is_multi();
        self
    }

    /// Sets the generator of per-node payloads.
    #[must_use]
    pub fn with_node_attributes<G>(mut self, generator: G) -> Self
    where
        G: Generator<Output = Attributes> + Send + Sync + 'static,
    {
        self.node_attributes = Arc::new(generator);
        self
    }

    /// Sets the generator of per-edge payloads.
    #[must_use]
    pub fn with_edge_attributes<G>(mut self, generator: G) -> Self
    where
        G: Generator<Output = Attributes> + Send + Sync + 'static,
    {
        self.edge_attributes = Arc::new(generator);
        self
    }

    /// Replaces the dense node ids with distinct keys drawn from `keys`.
    ///
    /// # Examples
    /// ```
    /// use graphgen_core::{GraphBuilder, RngSource, TextOf};
    ///
    /// let graph = GraphBuilder::new()
    ///     .with_min_nodes(3)
    ///     .with_max_nodes(Some(3))
    ///     .with_node_keys(TextOf::new("abcdef", 2, Some(4)))
    ///     .build()?
    ///     .generate(&mut RngSource::seeded(2))?;
    /// assert!(graph.nodes().all(|key| (2..=4).contains(&key.chars().count())));
    /// # Ok::<(), graphgen_core::GraphGenError>(())
    /// ```
    #[must_use]
    pub fn with_node_keys<G>(self, keys: G) -> GraphBuilder<DrawnLabels<G>> {
        GraphBuilder {
            min_nodes: self.min_nodes,
            max_nodes: self.max_nodes,
            min_edges: self.min_edges,
            max_edges: self.max_edges,
            self_loops: self.self_loops,
            connected: self.connected,
            directed: self.directed,
            multi: self.multi,
            node_attributes: self.node_attributes,
            edge_attributes: self.edge_attributes,
            labels: DrawnLabels::new(keys),
        }
    }

    /// Returns the configured smallest node count.
    #[must_use]
    pub fn min_nodes(&self) -> i64 {
        self.min_nodes
    }

    /// Returns the configured largest node count.
    #[must_use]
    pub fn max_nodes(&self) -> Option<i64> {
        self.max_nodes
    }

    /// Returns the configured smallest edge count.
    #[must_use]
    pub fn min_edges(&self) -> i64 {
        self.min_edges
    }

    /// Returns the configured largest edge count.
    #[must_use]
    pub fn max_edges(&self) -> Option<i64> {
        self.max_edges
    }

    /// Returns whether self-loops are allowed.
    #[must_use]
    pub fn self_loops(&self) -> bool {
        self.self_loops
    }

    /// Returns whether the graph must be connected.
    #[must_use]
    pub fn connected(&self) -> bool {
        self.connected
    }

    /// Returns whether edges are directed.
    #[must_use]
    pub fn directed(&self) -> bool {
        self.directed
    }

    /// Returns whether parallel edges are allowed.
    #[must_use]
    pub fn multi(&self) -> bool {
        self.multi
    }

    /// Returns the variant named by the `directed` and `multi` flags.
    #[must_use]
    pub fn variant(&self) -> GraphVariant {
        GraphVariant::from_flags(self.directed, self.multi)
    }
}

impl<L: NodeLabels> GraphBuilder<L> {
    /// Validates the request and constructs a [`GraphGenerator`].
    ///
    /// # Errors
    /// Returns [`crate::GraphGenError::Configuration`] when `min_nodes` is
    /// negative, when `max_nodes` is below `min_nodes`, or when a connected
    /// graph is requested with bounded `max_edges` below `max_nodes - 1`.
    ///
    /// # Examples
    /// ```
    /// use graphgen_core::{ConfigurationErrorCode, GraphBuilder};
    ///
    /// let err = GraphBuilder::new()
    ///     .with_max_nodes(Some(6))
    ///     .with_max_edges(Some(4))
    ///     .build()
    ///     .unwrap_err();
    /// assert_eq!(
    ///     err.configuration_code(),
    ///     Some(ConfigurationErrorCode::ConnectedEdgeShortfall),
    /// );
    /// ```
    pub fn build(self) -> Result<GraphGenerator<L>> {
        let requested = RequestedBounds {
            min_nodes: self.min_nodes,
            max_nodes: self.max_nodes,
            max_edges: self.max_edges,
        };
        let nodes = validate(&requested, self.connected)?;
        let edges = EdgeRequest {
            min: self.min_edges,
            max: self.max_edges,
        };
        let shape = Shape {
            directed: self.directed,
            multi: self.multi,
            self_loops: self.self_loops,
            connected: self.connected,
            node_attributes: self.node_attributes,
            edge_attributes: self.edge_attributes,
        };
        Ok(GraphGenerator::new(nodes, edges, shape, self.labels))
    }
}

/// Validates `builder` and generates one graph from `source`.
///
/// # Errors
/// Fails with a configuration error before drawing anything, or with a draw
/// error when the source or a payload generator fails.
///
/// # Examples
/// ```
/// use graphgen_core::{GraphBuilder, RngSource, generate};
///
/// let builder = GraphBuilder::new().with_min_nodes(0).with_max_nodes(Some(0));
/// let graph = generate(builder, &mut RngSource::seeded(0))?;
/// assert!(graph.is_empty());
/// # Ok::<(), graphgen_core::GraphGenError>(())
/// ```
pub fn generate<L: NodeLabels>(
    builder: GraphBuilder<L>,
    source: &mut dyn DrawSource,
) -> Result<Graph<L::Key>> {
    builder.build()?.generate(source)
}
