//! Serde support for [`Graph`].
//!
//! Attribute keys are arbitrary [`crate::Value`]s, which most formats cannot
//! use as map keys, so payloads serialise as sequences of `[key, value]`
//! pairs.

use serde::{Serialize, Serializer, ser::SerializeStruct};

use super::Graph;
use crate::value::Attributes;

struct Pairs<'a>(&'a Attributes);

impl Serialize for Pairs<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

#[derive(Serialize)]
struct NodeRecord<'a, N> {
    id: &'a N,
    attributes: Pairs<'a>,
}

#[derive(Serialize)]
struct EdgeRecord<'a, N> {
    source: &'a N,
    target: &'a N,
    attributes: Pairs<'a>,
}

impl<N: Serialize> Serialize for Graph<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nodes: Vec<_> = self
            .nodes_with_attributes()
            .map(|(id, attributes)| NodeRecord {
                id,
                attributes: Pairs(attributes),
            })
            .collect();
        let edges: Vec<_> = self
            .edges()
            .map(|edge| EdgeRecord {
                source: edge.source,
                target: edge.target,
                attributes: Pairs(edge.attributes),
            })
            .collect();

        let mut state = serializer.serialize_struct("Graph", 4)?;
        state.serialize_field("directed", &self.directed)?;
        state.serialize_field("multi", &self.multi)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("edges", &edges)?;
        state.end()
    }
}
