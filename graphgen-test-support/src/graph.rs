//! Independent checks of structural properties of generated graphs.
//!
//! Connectivity here is a breadth-first search over the edge list, separate
//! from the store's own union-find check.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    hash::Hash,
};

use graphgen_core::{Attributes, Graph};

/// Returns whether all nodes are reachable from the first node when edge
/// direction is ignored. Empty graphs count as connected.
///
/// # Examples
/// ```
/// use graphgen_core::{Attributes, Graph};
/// use graphgen_test_support::graph::weakly_connected;
///
/// let mut graph: Graph = Graph::new(true, false);
/// graph.add_edge(1, 0, Attributes::new());
/// assert!(weakly_connected(&graph));
/// graph.add_node(2, Attributes::new());
/// assert!(!weakly_connected(&graph));
/// ```
#[must_use]
pub fn weakly_connected<N: Eq + Hash>(graph: &Graph<N>) -> bool {
    let mut adjacency: HashMap<&N, Vec<&N>> = HashMap::new();
    for edge in graph.edges() {
        adjacency.entry(edge.source).or_default().push(edge.target);
        adjacency.entry(edge.target).or_default().push(edge.source);
    }

    let Some(start) = graph.nodes().next() else {
        return true;
    };
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        for &next in adjacency.get(node).into_iter().flatten() {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len() == graph.node_count()
}

/// Counts edges whose endpoints coincide.
#[must_use]
pub fn self_loops<N: Eq>(graph: &Graph<N>) -> usize {
    graph
        .edges()
        .filter(|edge| edge.source == edge.target)
        .count()
}

/// Returns the largest number of edges joining one pair, treating pairs as
/// unordered for undirected graphs.
#[must_use]
pub fn max_multiplicity<N: Eq + Hash>(graph: &Graph<N>) -> usize {
    let mut counts: HashMap<(&N, &N), usize> = HashMap::new();
    let mut canonical: HashMap<&N, usize> = HashMap::new();
    for (position, node) in graph.nodes().enumerate() {
        canonical.insert(node, position);
    }
    for edge in graph.edges() {
        let forward = (edge.source, edge.target);
        let key = if graph.is_directed() {
            forward
        } else {
            let source = canonical.get(edge.source);
            let target = canonical.get(edge.target);
            if source <= target {
                forward
            } else {
                (edge.target, edge.source)
            }
        };
        *counts.entry(key).or_default() += 1;
    }
    counts.into_values().max().unwrap_or(0)
}

/// Returns whether every node and every edge carries exactly `expected`.
#[must_use]
pub fn uniform_payloads<N>(graph: &Graph<N>, expected: &Attributes) -> bool {
    graph
        .nodes_with_attributes()
        .all(|(_, attributes)| attributes == expected)
        && graph.edges().all(|edge| edge.attributes == expected)
}
