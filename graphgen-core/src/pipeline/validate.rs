//! Feasibility checks run before anything is drawn.

use crate::error::ConfigurationError;

/// Node bounds and the edge ceiling exactly as the caller requested them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct RequestedBounds {
    pub min_nodes: i64,
    pub max_nodes: Option<i64>,
    pub max_edges: Option<i64>,
}

/// Node bounds after validation; `max` of `None` defers to the draw source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeBounds {
    pub min: usize,
    pub max: Option<usize>,
}

/// Rejects configurations that no graph can satisfy.
///
/// Pure: returns the node bounds converted to sizes on success.
pub(crate) fn validate(
    bounds: &RequestedBounds,
    connected: bool,
) -> Result<NodeBounds, ConfigurationError> {
    let min = usize::try_from(bounds.min_nodes).map_err(|_| {
        ConfigurationError::NegativeMinNodes {
            got: bounds.min_nodes,
        }
    })?;

    if let Some(max_nodes) = bounds.max_nodes
        && max_nodes < bounds.min_nodes
    {
        return Err(ConfigurationError::MaxNodesBelowMin {
            min_nodes: bounds.min_nodes,
            max_nodes,
        });
    }

    if connected
        && let (Some(max_nodes), Some(max_edges)) = (bounds.max_nodes, bounds.max_edges)
    {
        let required = max_nodes.saturating_sub(1);
        if max_edges < required {
            return Err(ConfigurationError::ConnectedEdgeShortfall {
                max_nodes,
                max_edges,
                required,
            });
        }
    }

    let max = bounds
        .max_nodes
        .map(|max_nodes| usize::try_from(max_nodes).unwrap_or(usize::MAX));
    Ok(NodeBounds { min, max })
}
