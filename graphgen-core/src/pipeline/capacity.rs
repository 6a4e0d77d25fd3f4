//! Edge capacity of each graph variant and the resulting edge-count band.
//!
//! The band is resolved against the realised node count and the edges the
//! connectivity skeleton has already spent. Infeasible requests are clamped
//! rather than rejected: the validator has already ruled out the
//! configurations that can never work.

use tracing::debug;

/// Upper limit on the number of edges a graph can still take.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Capacity {
    /// At most this many more edges fit.
    Finite(usize),
    /// Parallel edges are allowed, so there is no structural ceiling.
    Unbounded,
}

/// Counts the distinct node pairs an edge may join.
///
/// `n·(n−1)/2` undirected or `n·(n−1)` directed, plus `n` when self-loops
/// are allowed. Saturates instead of overflowing.
///
/// # Examples
/// ```
/// use graphgen_core::pair_capacity;
///
/// assert_eq!(pair_capacity(4, false, false), 6);
/// assert_eq!(pair_capacity(4, true, false), 12);
/// assert_eq!(pair_capacity(4, false, true), 10);
/// assert_eq!(pair_capacity(1, true, false), 0);
/// ```
#[must_use]
pub fn pair_capacity(nodes: usize, directed: bool, self_loops: bool) -> usize {
    let ordered = nodes.saturating_mul(nodes.saturating_sub(1));
    let pairs = if directed { ordered } else { ordered / 2 };
    if self_loops {
        pairs.saturating_add(nodes)
    } else {
        pairs
    }
}

/// Capacity of a graph variant on `nodes` nodes that already holds
/// `present` edges.
///
/// A multigraph with no feasible pair at all (a lone node without
/// self-loops, or no nodes) still has zero capacity.
///
/// # Examples
/// ```
/// use graphgen_core::{Capacity, capacity};
///
/// assert_eq!(capacity(5, 4, false, false, false), Capacity::Finite(6));
/// assert_eq!(capacity(5, 4, false, true, false), Capacity::Unbounded);
/// assert_eq!(capacity(1, 0, false, true, false), Capacity::Finite(0));
/// ```
#[must_use]
pub fn capacity(
    nodes: usize,
    present: usize,
    directed: bool,
    multi: bool,
    self_loops: bool,
) -> Capacity {
    let pairs = pair_capacity(nodes, directed, self_loops);
    if multi && pairs > 0 {
        Capacity::Unbounded
    } else {
        Capacity::Finite(pairs.saturating_sub(present))
    }
}

/// Edge bounds exactly as requested; negative values are legal here.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct EdgeRequest {
    pub min: i64,
    pub max: Option<i64>,
}

/// Number of additional edges still to draw: `[min, max]`, where a `max` of
/// `None` leaves the count to the draw source's size policy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct EdgeBand {
    pub min: usize,
    pub max: Option<usize>,
}

impl EdgeBand {
    /// Clamps the request against the edges already present and the
    /// capacity that remains.
    pub(crate) fn resolve(request: EdgeRequest, present: usize, capacity: Capacity) -> Self {
        let requested_max = request.max.map(|max| remaining(max, present));
        let max = match (requested_max, capacity) {
            (Some(requested), Capacity::Finite(ceiling)) => Some(requested.min(ceiling)),
            (Some(requested), Capacity::Unbounded) => Some(requested),
            (None, Capacity::Finite(ceiling)) => Some(ceiling),
            (None, Capacity::Unbounded) => None,
        };

        let requested_min = remaining(request.min, present);
        let min = max.map_or(requested_min, |max| requested_min.min(max));
        if min < requested_min {
            debug!(
                requested = requested_min,
                truncated = min,
                "minimum edge count exceeds what the graph can hold; truncating"
            );
        }
        Self { min, max }
    }
}

fn remaining(requested: i64, present: usize) -> usize {
    let present = i64::try_from(present).unwrap_or(i64::MAX);
    let remaining = requested.saturating_sub(present).max(0);
    usize::try_from(remaining).unwrap_or(usize::MAX)
}
