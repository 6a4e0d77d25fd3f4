//! Drawing the edges that remain after the connectivity skeleton.
//!
//! Candidate pairs are never materialised. A [`PairSpace`] ranks every
//! feasible pair of a variant, ordered by the higher (target) endpoint and
//! then the lower (source) endpoint, so low ranks are pairs among early
//! nodes and a shrinking draw source favours them. Simple graphs sample
//! ranks without replacement through a [`CandidatePool`]; multigraphs sample
//! ranks independently.

use tracing::{Span, field, instrument};

use super::capacity::EdgeBand;
use crate::{
    draw::DrawSource,
    error::DrawError,
    generator::Generator,
    graph::Graph,
    value::Attributes,
};

/// Bijection between feasible node pairs and ranks `0..len`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PairSpace {
    nodes: usize,
    directed: bool,
    self_loops: bool,
}

impl PairSpace {
    pub(crate) const fn new(nodes: usize, directed: bool, self_loops: bool) -> Self {
        Self {
            nodes,
            directed,
            self_loops,
        }
    }

    pub(crate) fn len(self) -> usize {
        super::capacity::pair_capacity(self.nodes, self.directed, self.self_loops)
    }

    /// Pairs per target node in the directed layout.
    const fn column_height(self) -> usize {
        if self.self_loops {
            self.nodes
        } else {
            self.nodes.saturating_sub(1)
        }
    }

    /// Returns the `(source, target)` pair at `rank`, or `None` past the end.
    pub(crate) fn pair(self, rank: usize) -> Option<(usize, usize)> {
        if rank >= self.len() {
            return None;
        }
        if self.directed {
            let height = self.column_height();
            let target = rank / height;
            let offset = rank % height;
            let source = if !self.self_loops && offset >= target {
                offset + 1
            } else {
                offset
            };
            return Some((source, target));
        }

        // Column `t` holds `t` pairs without self-loops and `t + 1` with them.
        let rank_wide = u128::try_from(rank).ok()?;
        let root = (8 * rank_wide + 1).isqrt();
        let target_wide = if self.self_loops {
            (root - 1) / 2
        } else {
            (root + 1) / 2
        };
        let target = usize::try_from(target_wide).ok()?;
        let first = triangular(target, self.self_loops);
        Some((rank - first, target))
    }

    /// Returns the rank of the pair `(source, target)`, or `None` if the
    /// pair is not feasible in this space.
    pub(crate) fn rank(self, source: usize, target: usize) -> Option<usize> {
        if source >= self.nodes || target >= self.nodes {
            return None;
        }
        if source == target && !self.self_loops {
            return None;
        }
        if self.directed {
            let offset = if !self.self_loops && source > target {
                source - 1
            } else {
                source
            };
            return Some(target * self.column_height() + offset);
        }
        let (low, high) = if source <= target {
            (source, target)
        } else {
            (target, source)
        };
        Some(triangular(high, self.self_loops) + low)
    }
}

/// Rank of the first pair in undirected column `target`.
const fn triangular(target: usize, self_loops: bool) -> usize {
    if self_loops {
        target * (target + 1) / 2
    } else {
        target * target.saturating_sub(1) / 2
    }
}

/// Ranks of a [`PairSpace`] that have not been taken yet.
///
/// [`CandidatePool::take`] addresses the remaining ranks by their position
/// among the untaken ones, which matches removing an element from an ordered
/// candidate list.
#[derive(Clone, Debug)]
pub(crate) struct CandidatePool {
    space: PairSpace,
    taken: TakenRanks,
}

impl CandidatePool {
    /// Builds a pool excluding the pairs already joined in `graph`.
    pub(crate) fn excluding_existing(space: PairSpace, graph: &Graph) -> Self {
        let mut existing: Vec<usize> = graph
            .edges()
            .filter_map(|edge| space.rank(*edge.source, *edge.target))
            .collect();
        existing.sort_unstable();
        existing.dedup();

        let mut taken = TakenRanks::new(space.len());
        for rank in existing {
            taken.insert(rank);
        }
        Self { space, taken }
    }

    pub(crate) fn len(&self) -> usize {
        self.space.len().saturating_sub(self.taken.len())
    }

    /// Removes and returns the `index`-th remaining pair.
    pub(crate) fn take(&mut self, index: usize) -> Option<(usize, usize)> {
        if index >= self.len() {
            return None;
        }
        let rank = self.taken.nth_free(index)?;
        let pair = self.space.pair(rank)?;
        self.taken.insert(rank);
        Some(pair)
    }
}

/// Node of [`TakenRanks`]; a child index of 0 means the child is absent.
#[derive(Clone, Copy, Debug, Default)]
struct TakenNode {
    taken: usize,
    children: [usize; 2],
}

/// Order-statistic set of taken ranks in `0..width`.
///
/// A sparse binary tree over the rank range, allocated only along the paths
/// to taken ranks, so both lookups and insertions cost `O(log width)`.
#[derive(Clone, Debug)]
struct TakenRanks {
    width: usize,
    nodes: Vec<TakenNode>,
}

impl TakenRanks {
    fn new(width: usize) -> Self {
        Self {
            width,
            nodes: vec![TakenNode::default()],
        }
    }

    fn len(&self) -> usize {
        self.nodes.first().map_or(0, |root| root.taken)
    }

    fn child(&self, node: usize, side: usize) -> Option<usize> {
        self.nodes
            .get(node)
            .and_then(|entry| entry.children.get(side).copied())
            .filter(|&child| child != 0)
    }

    fn taken_below(&self, child: Option<usize>) -> usize {
        child
            .and_then(|index| self.nodes.get(index))
            .map_or(0, |entry| entry.taken)
    }

    /// Returns the `index`-th rank that is not taken, in ascending order, or
    /// `None` when fewer ranks are free.
    fn nth_free(&self, index: usize) -> Option<usize> {
        let mut remaining = index;
        let (mut lo, mut hi) = (0, self.width);
        let mut node = Some(0);
        while let Some(current) = node {
            if hi - lo <= 1 {
                break;
            }
            let mid = lo + ((hi - lo) >> 1);
            let left = self.child(current, 0);
            let free_left = (mid - lo).saturating_sub(self.taken_below(left));
            if remaining < free_left {
                hi = mid;
                node = left;
            } else {
                remaining -= free_left;
                lo = mid;
                node = self.child(current, 1);
            }
        }
        if self.taken_below(node) >= hi - lo {
            return None;
        }
        let rank = lo.checked_add(remaining)?;
        (rank < hi).then_some(rank)
    }

    /// Marks `rank` as taken. The rank must not already be taken.
    fn insert(&mut self, rank: usize) {
        if rank >= self.width {
            return;
        }
        let (mut lo, mut hi) = (0, self.width);
        let mut current = 0;
        loop {
            if let Some(entry) = self.nodes.get_mut(current) {
                entry.taken += 1;
            }
            if hi - lo <= 1 {
                break;
            }
            let mid = lo + ((hi - lo) >> 1);
            let side = usize::from(rank >= mid);
            if rank < mid {
                hi = mid;
            } else {
                lo = mid;
            }
            current = match self.child(current, side) {
                Some(child) => child,
                None => {
                    let fresh = self.nodes.len();
                    self.nodes.push(TakenNode::default());
                    if let Some(slot) = self
                        .nodes
                        .get_mut(current)
                        .and_then(|entry| entry.children.get_mut(side))
                    {
                        *slot = fresh;
                    }
                    fresh
                }
            };
        }
    }
}

/// Draws the edges of the resolved `band` and adds them to `graph`.
///
/// Each edge is drawn as a pair followed by its payload. Returns the number
/// of edges added.
#[instrument(
    name = "generate.edges",
    err,
    skip(graph, band, attributes, source),
    fields(min = band.min, max = field::Empty, drawn = field::Empty),
)]
pub(crate) fn sample_edges(
    graph: &mut Graph,
    band: EdgeBand,
    self_loops: bool,
    attributes: &dyn Generator<Output = Attributes>,
    source: &mut dyn DrawSource,
) -> Result<usize, DrawError> {
    let span = Span::current();
    if let Some(max) = band.max {
        span.record("max", max);
    }

    let space = PairSpace::new(graph.node_count(), graph.is_directed(), self_loops);
    let drawn = if graph.is_multi() {
        sample_with_replacement(graph, space, band, attributes, source)?
    } else {
        sample_without_replacement(graph, space, band, attributes, source)?
    };
    span.record("drawn", drawn);
    Ok(drawn)
}

fn sample_without_replacement(
    graph: &mut Graph,
    space: PairSpace,
    band: EdgeBand,
    attributes: &dyn Generator<Output = Attributes>,
    source: &mut dyn DrawSource,
) -> Result<usize, DrawError> {
    let mut pool = CandidatePool::excluding_existing(space, graph);
    let max = band.max.unwrap_or(pool.len()).min(pool.len());
    let count = source.draw_range(band.min.min(max), max)?;

    let mut drawn = 0;
    for _ in 0..count {
        let Some(last) = pool.len().checked_sub(1) else {
            break;
        };
        let index = source.draw_range(0, last)?;
        let Some((u, v)) = pool.take(index) else {
            break;
        };
        let payload = attributes.draw(source)?;
        graph.add_edge(u, v, payload);
        drawn += 1;
    }
    Ok(drawn)
}

fn sample_with_replacement(
    graph: &mut Graph,
    space: PairSpace,
    band: EdgeBand,
    attributes: &dyn Generator<Output = Attributes>,
    source: &mut dyn DrawSource,
) -> Result<usize, DrawError> {
    let Some(last) = space.len().checked_sub(1) else {
        return Ok(0);
    };
    let count = source.draw_size(band.min, band.max)?;

    let mut drawn = 0;
    for _ in 0..count {
        let rank = source.draw_range(0, last)?;
        let Some((u, v)) = space.pair(rank) else {
            break;
        };
        let payload = attributes.draw(source)?;
        graph.add_edge(u, v, payload);
        drawn += 1;
    }
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{draw::ChoiceTape, generator::FixedAttributes};

    use rstest::rstest;

    fn enumerate(nodes: usize, directed: bool, self_loops: bool) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for target in 0..nodes {
            for source in 0..nodes {
                let ordered = source <= target || directed;
                let looped = source != target || self_loops;
                if ordered && looped {
                    pairs.push((source, target));
                }
            }
        }
        pairs
    }

    #[rstest]
    fn pair_space_matches_enumeration(
        #[values(0, 1, 2, 5, 9)] nodes: usize,
        #[values(false, true)] directed: bool,
        #[values(false, true)] self_loops: bool,
    ) {
        let space = PairSpace::new(nodes, directed, self_loops);
        let expected = enumerate(nodes, directed, self_loops);
        assert_eq!(space.len(), expected.len());
        for (rank, &(source, target)) in expected.iter().enumerate() {
            assert_eq!(space.pair(rank), Some((source, target)));
            assert_eq!(space.rank(source, target), Some(rank));
        }
        assert_eq!(space.pair(expected.len()), None);
    }

    #[test]
    fn rank_rejects_infeasible_pairs() {
        let space = PairSpace::new(3, false, false);
        assert_eq!(space.rank(1, 1), None);
        assert_eq!(space.rank(0, 3), None);
        assert_eq!(space.rank(2, 0), space.rank(0, 2));
    }

    #[test]
    fn pool_takes_in_candidate_order() {
        let space = PairSpace::new(4, false, false);
        let mut reference = enumerate(4, false, false);
        let mut graph: Graph = Graph::new(false, false);
        graph.add_edge(0, 2, Attributes::new());
        reference.retain(|&pair| pair != (0, 2));

        let mut pool = CandidatePool::excluding_existing(space, &graph);
        assert_eq!(pool.len(), reference.len());
        for index in [3, 0, 2, 0, 0] {
            assert_eq!(pool.take(index), Some(reference.remove(index)));
        }
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.take(0), None);
    }

    #[rstest]
    fn pool_drains_in_reference_order(
        #[values(false, true)] directed: bool,
        #[values(false, true)] self_loops: bool,
    ) {
        let space = PairSpace::new(23, directed, self_loops);
        let mut reference = enumerate(23, directed, self_loops);
        let graph: Graph = Graph::new(directed, false);
        let mut pool = CandidatePool::excluding_existing(space, &graph);

        let mut state = 17_usize;
        while let Some(last) = reference.len().checked_sub(1) {
            state = state.wrapping_mul(31).wrapping_add(7) % 1_009;
            let index = state % (last + 1);
            assert_eq!(pool.take(index), Some(reference.remove(index)));
            assert_eq!(pool.len(), reference.len());
        }
        assert_eq!(pool.take(0), None);
    }

    #[rstest]
    #[case::empty(0)]
    #[case::single(1)]
    #[case::odd(7)]
    fn taken_ranks_skip_inserted_ranks(#[case] width: usize) {
        let mut ranks = TakenRanks::new(width);
        for rank in (0..width).step_by(2) {
            ranks.insert(rank);
        }
        let free: Vec<_> = (0..width).filter_map(|index| ranks.nth_free(index)).collect();
        assert_eq!(free, (1..width).step_by(2).collect::<Vec<_>>());
        assert_eq!(ranks.len(), width.div_ceil(2));
    }

    #[test]
    fn dense_simple_sampling_fills_every_pair() {
        let nodes = 150;
        let mut graph: Graph = Graph::new(false, false);
        for node in 0..nodes {
            graph.add_node(node, Attributes::new());
        }
        let pairs = PairSpace::new(nodes, false, false).len();
        let band = EdgeBand {
            min: pairs,
            max: None,
        };
        let mut source = ChoiceTape::new((0..4_096).collect());
        let drawn = sample_edges(&mut graph, band, false, &FixedAttributes::empty(), &mut source)
            .expect("tape has no limit");
        assert_eq!(drawn, pairs);
        assert_eq!(graph.edge_count(), pairs);
    }

    #[test]
    fn simple_sampling_never_repeats_pairs() {
        let mut graph: Graph = Graph::new(true, false);
        for node in 0..4 {
            graph.add_node(node, Attributes::new());
        }
        let band = EdgeBand {
            min: 12,
            max: Some(12),
        };
        let mut tape = ChoiceTape::new(vec![5; 64]);
        let drawn = sample_edges(&mut graph, band, false, &FixedAttributes::empty(), &mut tape)
            .expect("tape has no limit");
        assert_eq!(drawn, 12);
        assert_eq!(graph.edge_count(), 12);
        assert_eq!(graph.self_loop_count(), 0);
    }

    #[test]
    fn multigraph_sampling_allows_repeats() {
        let mut graph: Graph = Graph::new(false, true);
        for node in 0..3 {
            graph.add_node(node, Attributes::new());
        }
        let band = EdgeBand { min: 4, max: None };
        // Count 4, then every rank is 0: four parallel (0, 1) edges.
        let mut tape = ChoiceTape::new(vec![0]);
        let drawn = sample_edges(&mut graph, band, false, &FixedAttributes::empty(), &mut tape)
            .expect("tape has no limit");
        assert_eq!(drawn, 4);
        assert_eq!(graph.edge_multiplicity(&0, &1), 4);
    }

    #[test]
    fn empty_pair_space_adds_nothing() {
        let mut graph: Graph = Graph::new(false, true);
        graph.add_node(0, Attributes::new());
        let band = EdgeBand { min: 0, max: Some(0) };
        let mut tape = ChoiceTape::new(Vec::new()).with_limit(0);
        let drawn = sample_edges(&mut graph, band, false, &FixedAttributes::empty(), &mut tape)
            .expect("no draws are needed");
        assert_eq!(drawn, 0);
    }
}
