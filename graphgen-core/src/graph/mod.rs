//! Attributed graph store produced by the generator.
//!
//! [`Graph`] covers all four graph variants through two flags: `directed`
//! and `multi`. Nodes keep their insertion order, which the connectivity
//! skeleton relies on, and every node and edge carries an [`Attributes`]
//! payload.

#[cfg(feature = "serde")]
mod serialize;
mod union_find;

use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

use crate::value::Attributes;

use self::union_find::DisjointSet;

#[derive(Clone, Debug, PartialEq)]
struct NodeEntry<N> {
    id: N,
    attributes: Attributes,
}

#[derive(Clone, Debug, PartialEq)]
struct EdgeEntry {
    source: usize,
    target: usize,
    attributes: Attributes,
}

/// Borrowed view of one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeView<'a, N> {
    /// Node the edge starts at (either endpoint for undirected graphs).
    pub source: &'a N,
    /// Node the edge ends at.
    pub target: &'a N,
    /// Payload attached to the edge.
    pub attributes: &'a Attributes,
}

/// Mutable graph with attributed nodes and edges.
///
/// For simple graphs, adding an edge between an already connected pair
/// replaces that edge's attributes instead of duplicating it. Adding an edge
/// whose endpoints are unknown inserts them with empty attributes.
///
/// # Examples
/// ```
/// use graphgen_core::{Graph, attributes};
///
/// let mut graph: Graph<&str> = Graph::new(false, false);
/// graph.add_node("a", attributes([("color", "red")]));
/// graph.add_edge("a", "b", attributes([("weight", 2)]));
/// assert!(graph.has_edge(&"b", &"a"));
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Graph<N = usize> {
    directed: bool,
    multi: bool,
    nodes: Vec<NodeEntry<N>>,
    positions: HashMap<N, usize>,
    edges: Vec<EdgeEntry>,
    pairs: HashMap<(usize, usize), Vec<usize>>,
    adjacency: Vec<Vec<usize>>,
}

/// Two graphs are equal when they have the same variant and the same nodes,
/// edges and payloads in the same insertion order.
impl<N: PartialEq> PartialEq for Graph<N> {
    fn eq(&self, other: &Self) -> bool {
        self.directed == other.directed
            && self.multi == other.multi
            && self.nodes == other.nodes
            && self.edges == other.edges
    }
}

impl<N> Graph<N> {
    /// Creates an empty graph of the given variant.
    #[must_use]
    pub fn new(directed: bool, multi: bool) -> Self {
        Self {
            directed,
            multi,
            nodes: Vec::new(),
            positions: HashMap::new(),
            edges: Vec::new(),
            pairs: HashMap::new(),
            adjacency: Vec::new(),
        }
    }

    /// Returns whether edges have a direction.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns whether parallel edges are allowed.
    #[must_use]
    pub const fn is_multi(&self) -> bool {
        self.multi
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges, counting parallel edges separately.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of edges whose endpoints coincide.
    #[must_use]
    pub fn self_loop_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|edge| edge.source == edge.target)
            .count()
    }

    /// Iterates node identifiers in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter().map(|entry| &entry.id)
    }

    /// Iterates nodes with their payloads in insertion order.
    pub fn nodes_with_attributes(&self) -> impl Iterator<Item = (&N, &Attributes)> {
        self.nodes.iter().map(|entry| (&entry.id, &entry.attributes))
    }

    /// Iterates edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_, N>> {
        self.edges.iter().filter_map(|edge| {
            let source = self.nodes.get(edge.source)?;
            let target = self.nodes.get(edge.target)?;
            Some(EdgeView {
                source: &source.id,
                target: &target.id,
                attributes: &edge.attributes,
            })
        })
    }

    /// Returns whether every node can reach every other node when edge
    /// direction is ignored. The empty graph counts as connected.
    #[must_use]
    pub fn is_weakly_connected(&self) -> bool {
        let mut components = DisjointSet::new(self.nodes.len());
        for edge in &self.edges {
            components.union(edge.source, edge.target);
        }
        components.components() <= 1
    }

    fn pair_key(&self, source: usize, target: usize) -> (usize, usize) {
        if self.directed || source <= target {
            (source, target)
        } else {
            (target, source)
        }
    }
}

impl<N: Clone + Eq + Hash> Graph<N> {
    /// Adds a node, or replaces the payload of an existing one.
    pub fn add_node(&mut self, id: N, attributes: Attributes) {
        if let Some(&position) = self.positions.get(&id) {
            if let Some(entry) = self.nodes.get_mut(position) {
                entry.attributes = attributes;
            }
            return;
        }
        self.insert_node(id, attributes);
    }

    /// Adds an edge from `source` to `target`.
    pub fn add_edge(&mut self, source: N, target: N, attributes: Attributes) {
        let source = self.position_or_insert(source);
        let target = self.position_or_insert(target);
        let key = self.pair_key(source, target);

        if !self.multi
            && let Some(&existing) = self.pairs.get(&key).and_then(|indices| indices.first())
        {
            if let Some(edge) = self.edges.get_mut(existing) {
                edge.attributes = attributes;
            }
            return;
        }

        let index = self.edges.len();
        self.edges.push(EdgeEntry {
            source,
            target,
            attributes,
        });
        let parallel = self.pairs.entry(key).or_default();
        let first_of_pair = parallel.is_empty();
        parallel.push(index);
        if first_of_pair {
            self.link(source, target);
        }
    }

    /// Returns whether at least one edge joins `source` to `target`.
    #[must_use]
    pub fn has_edge(&self, source: &N, target: &N) -> bool {
        let (Some(&source), Some(&target)) = (self.positions.get(source), self.positions.get(target))
        else {
            return false;
        };
        self.pairs.contains_key(&self.pair_key(source, target))
    }

    /// Returns the number of parallel edges joining `source` to `target`.
    #[must_use]
    pub fn edge_multiplicity(&self, source: &N, target: &N) -> usize {
        let (Some(&source), Some(&target)) = (self.positions.get(source), self.positions.get(target))
        else {
            return 0;
        };
        self.pairs
            .get(&self.pair_key(source, target))
            .map_or(0, Vec::len)
    }

    /// Iterates the distinct neighbours of `id`: successors for directed
    /// graphs, adjacent nodes otherwise.
    pub fn neighbors(&self, id: &N) -> impl Iterator<Item = &N> {
        self.positions
            .get(id)
            .and_then(|&position| self.adjacency.get(position))
            .into_iter()
            .flatten()
            .filter_map(|&position| self.nodes.get(position).map(|entry| &entry.id))
    }

    /// Returns the payload of node `id`.
    #[must_use]
    pub fn node_attributes(&self, id: &N) -> Option<&Attributes> {
        let &position = self.positions.get(id)?;
        self.nodes.get(position).map(|entry| &entry.attributes)
    }

    /// Returns whether `id` is a node of the graph.
    #[must_use]
    pub fn contains_node(&self, id: &N) -> bool {
        self.positions.contains_key(id)
    }

    /// Renames every node, in insertion order, to the matching entry of
    /// `keys`, carrying payloads and edge endpoints along.
    ///
    /// Returns `None` unless `keys` holds exactly one distinct key per node.
    ///
    /// # Examples
    /// ```
    /// use graphgen_core::{Attributes, Graph};
    ///
    /// let mut graph: Graph = Graph::new(true, false);
    /// graph.add_edge(0, 1, Attributes::new());
    /// let renamed = graph.relabel(["x", "y"]).expect("one key per node");
    /// assert!(renamed.has_edge(&"x", &"y"));
    /// assert!(!renamed.has_edge(&"y", &"x"));
    /// ```
    #[must_use]
    pub fn relabel<M, I>(self, keys: I) -> Option<Graph<M>>
    where
        M: Clone + Eq + Hash,
        I: IntoIterator<Item = M>,
    {
        let keys: Vec<M> = keys.into_iter().collect();
        if keys.len() != self.nodes.len() {
            return None;
        }
        let distinct: HashSet<&M> = keys.iter().collect();
        if distinct.len() != keys.len() {
            return None;
        }

        let positions = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(position, key)| (key, position))
            .collect();
        let nodes = self
            .nodes
            .into_iter()
            .zip(keys)
            .map(|(entry, id)| NodeEntry {
                id,
                attributes: entry.attributes,
            })
            .collect();

        Some(Graph {
            directed: self.directed,
            multi: self.multi,
            nodes,
            positions,
            edges: self.edges,
            pairs: self.pairs,
            adjacency: self.adjacency,
        })
    }

    fn position_or_insert(&mut self, id: N) -> usize {
        match self.positions.get(&id) {
            Some(&position) => position,
            None => self.insert_node(id, Attributes::new()),
        }
    }

    fn insert_node(&mut self, id: N, attributes: Attributes) -> usize {
        let position = self.nodes.len();
        self.positions.insert(id.clone(), position);
        self.nodes.push(NodeEntry { id, attributes });
        self.adjacency.push(Vec::new());
        position
    }

    fn link(&mut self, source: usize, target: usize) {
        if let Some(neighbours) = self.adjacency.get_mut(source) {
            neighbours.push(target);
        }
        if !self.directed
            && source != target
            && let Some(neighbours) = self.adjacency.get_mut(target)
        {
            neighbours.push(source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Value, attributes};

    use rstest::{fixture, rstest};

    #[fixture]
    fn triangle() -> Graph {
        let mut graph = Graph::new(false, false);
        for node in 0..3 {
            graph.add_node(node, attributes([("index", i64::try_from(node).unwrap_or(0))]));
        }
        graph.add_edge(0, 1, Attributes::new());
        graph.add_edge(1, 2, Attributes::new());
        graph.add_edge(2, 0, Attributes::new());
        graph
    }

    #[rstest]
    fn undirected_edges_are_symmetric(triangle: Graph) {
        assert!(triangle.has_edge(&1, &0));
        assert!(triangle.has_edge(&0, &2));
        assert_eq!(triangle.edge_count(), 3);
        let mut neighbours: Vec<_> = triangle.neighbors(&0).copied().collect();
        neighbours.sort_unstable();
        assert_eq!(neighbours, vec![1, 2]);
    }

    #[rstest]
    fn simple_graph_overwrites_parallel_edge(mut triangle: Graph) {
        triangle.add_edge(1, 0, attributes([("weight", 5)]));
        assert_eq!(triangle.edge_count(), 3);
        let edge = triangle
            .edges()
            .next()
            .expect("triangle has edges");
        assert_eq!(edge.attributes.get(&Value::from("weight")), Some(&Value::Int(5)));
    }

    #[test]
    fn multigraph_keeps_parallel_edges() {
        let mut graph: Graph = Graph::new(false, true);
        graph.add_edge(0, 1, Attributes::new());
        graph.add_edge(1, 0, Attributes::new());
        graph.add_edge(1, 1, Attributes::new());
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edge_multiplicity(&0, &1), 2);
        assert_eq!(graph.self_loop_count(), 1);
        assert_eq!(graph.neighbors(&0).count(), 1);
    }

    #[test]
    fn directed_edges_only_link_forward() {
        let mut graph: Graph = Graph::new(true, false);
        graph.add_edge(0, 1, Attributes::new());
        assert!(graph.has_edge(&0, &1));
        assert!(!graph.has_edge(&1, &0));
        assert_eq!(graph.neighbors(&1).count(), 0);
        assert!(graph.is_weakly_connected());
    }

    #[rstest]
    #[case::empty(0, vec![], true)]
    #[case::single(1, vec![], true)]
    #[case::split(3, vec![(0, 1)], false)]
    #[case::joined(3, vec![(0, 1), (2, 1)], true)]
    fn weak_connectivity(
        #[case] nodes: usize,
        #[case] edges: Vec<(usize, usize)>,
        #[case] expected: bool,
    ) {
        let mut graph: Graph = Graph::new(true, false);
        for node in 0..nodes {
            graph.add_node(node, Attributes::new());
        }
        for (source, target) in edges {
            graph.add_edge(source, target, Attributes::new());
        }
        assert_eq!(graph.is_weakly_connected(), expected);
    }

    #[rstest]
    fn relabel_carries_payloads(triangle: Graph) {
        let renamed = triangle
            .relabel(["a", "b", "c"])
            .expect("three distinct keys");
        assert_eq!(
            renamed.node_attributes(&"c"),
            Some(&attributes([("index", 2)]))
        );
        assert!(renamed.has_edge(&"a", &"c"));
        assert_eq!(renamed.nodes().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[rstest]
    #[case::too_few(vec!["a", "b"])]
    #[case::duplicate(vec!["a", "b", "a"])]
    fn relabel_rejects_non_bijective_keys(triangle: Graph, #[case] keys: Vec<&str>) {
        assert!(triangle.relabel(keys).is_none());
    }

    #[rstest]
    fn membership_follows_added_and_relabelled_nodes(triangle: Graph) {
        assert!(triangle.contains_node(&2));
        assert!(!triangle.contains_node(&3));
        let renamed = triangle.relabel(["a", "b", "c"]).expect("three distinct keys");
        assert!(renamed.contains_node(&"b"));
        assert!(!renamed.contains_node(&"z"));
    }

    #[test]
    fn edges_add_missing_endpoints() {
        let mut graph: Graph = Graph::new(false, false);
        assert!(!graph.contains_node(&4));
        graph.add_edge(4, 7, Attributes::new());
        assert!(graph.contains_node(&4));
        assert!(graph.contains_node(&7));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn add_node_replaces_payload() {
        let mut graph: Graph = Graph::new(false, false);
        graph.add_node(0, attributes([("a", 1)]));
        graph.add_node(0, attributes([("b", 2)]));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node_attributes(&0), Some(&attributes([("b", 2)])));
    }
}
