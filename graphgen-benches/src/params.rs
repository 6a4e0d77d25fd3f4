//! Benchmark parameter types.

use std::fmt;

use graphgen_core::{GraphBuilder, GraphVariant};

use crate::error::BenchSetupError;

/// Parameters for a single generation benchmark.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GenerateBenchParams {
    /// Variant being generated.
    pub variant: GraphVariant,
    /// Exact node count of every generated graph.
    pub nodes: usize,
    /// Whether the connectivity skeleton runs.
    pub connected: bool,
}

impl GenerateBenchParams {
    /// Every variant at each of `node_counts`, connected and not.
    #[must_use]
    pub fn grid(node_counts: &[usize]) -> Vec<Self> {
        let mut grid = Vec::new();
        for variant in GraphVariant::ALL {
            for &nodes in node_counts {
                for connected in [true, false] {
                    grid.push(Self {
                        variant,
                        nodes,
                        connected,
                    });
                }
            }
        }
        grid
    }

    /// Builder requesting exactly `nodes` nodes of this variant, with an
    /// unbounded edge count.
    ///
    /// # Errors
    /// Returns [`BenchSetupError`] if the node count does not fit an `i64`.
    pub fn builder(&self) -> Result<GraphBuilder, BenchSetupError> {
        let nodes = i64::try_from(self.nodes).map_err(|_| BenchSetupError::NodeCount {
            nodes: self.nodes,
        })?;
        Ok(GraphBuilder::new()
            .with_variant(self.variant)
            .with_min_nodes(nodes)
            .with_max_nodes(Some(nodes))
            .with_connected(self.connected))
    }
}

impl fmt::Display for GenerateBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = if self.connected { "connected" } else { "loose" };
        write!(f, "{},n={},{shape}", self.variant, self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn grid_covers_every_combination() {
        let grid = GenerateBenchParams::grid(&[10, 100]);
        assert_eq!(grid.len(), 16);
    }

    #[rstest]
    #[case(GraphVariant::Graph, 10, true, "graph,n=10,connected")]
    #[case(GraphVariant::MultiDiGraph, 250, false, "multidigraph,n=250,loose")]
    fn labels_are_stable(
        #[case] variant: GraphVariant,
        #[case] nodes: usize,
        #[case] connected: bool,
        #[case] expected: &str,
    ) {
        let params = GenerateBenchParams {
            variant,
            nodes,
            connected,
        };
        assert_eq!(params.to_string(), expected);
    }

    #[test]
    fn builder_requests_exact_node_count() {
        let params = GenerateBenchParams {
            variant: GraphVariant::DiGraph,
            nodes: 12,
            connected: true,
        };
        let builder = params.builder().expect("twelve fits an i64");
        assert_eq!(builder.min_nodes(), 12);
        assert_eq!(builder.max_nodes(), Some(12));
        assert!(builder.directed());
    }
}
