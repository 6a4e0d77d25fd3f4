//! Randomised generation of graphs under structural constraints.
//!
//! A [`GraphBuilder`] describes the graphs wanted: node and edge bounds,
//! whether the graph is directed, a multigraph, connected or may carry
//! self-loops, and how node and edge payloads (and optionally node keys) are
//! drawn. Every random choice comes from an explicit [`DrawSource`], so a
//! generation can be replayed from its recorded choices and shrunk toward
//! simpler graphs.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
pub mod draw;
mod error;
pub mod generator;
mod graph;
mod pipeline;
#[cfg(feature = "proptest")]
mod strategy;
mod value;

pub use crate::{
    builder::{GraphBuilder, GraphVariant, generate},
    draw::{ChoiceTape, DrawSource, Recorder, SizePolicy},
    error::{
        ConfigurationError, ConfigurationErrorCode, DrawError, DrawErrorCode, GraphGenError,
        GraphGenErrorCode, Result,
    },
    generator::{
        AnyBool, AnyInt, AttributeGenerator, AttributeMap, FixedAttributes, Generator, IntRange,
        Just, SampledFrom, TextOf, ValueGenerator,
    },
    graph::{EdgeView, Graph},
    pipeline::{
        Capacity, DenseLabels, DrawnLabels, GraphGenerator, NodeLabels, capacity, pair_capacity,
    },
    value::{Attributes, Value, attributes},
};

#[cfg(feature = "rng")]
pub use crate::draw::RngSource;
#[cfg(feature = "proptest")]
pub use crate::strategy::{MAX_CHOICES, graph_strategy};
