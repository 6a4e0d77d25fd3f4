//! Error types for the graphgen core library.
//!
//! Configuration problems are reported before anything is drawn; draw-source
//! failures are propagated untouched from wherever they arise in the pipeline.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A generation request that can never be satisfied.
///
/// Raised by [`crate::GraphBuilder::build`] before any value is drawn.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigurationError {
    /// The lower node bound was negative.
    #[error("min_nodes can not be negative (got {got})")]
    NegativeMinNodes {
        /// The rejected lower bound.
        got: i64,
    },
    /// The upper node bound was smaller than the lower bound.
    #[error("min_nodes ({min_nodes}) must be less than or equal to max_nodes ({max_nodes})")]
    MaxNodesBelowMin {
        /// Configured lower node bound.
        min_nodes: i64,
        /// Configured upper node bound.
        max_nodes: i64,
    },
    /// A connected graph was requested with too few edges to span it.
    #[error(
        "it's impossible to create a connected graph of {max_nodes} nodes with fewer than {required} edges (max_edges is {max_edges})"
    )]
    ConnectedEdgeShortfall {
        /// Configured upper node bound.
        max_nodes: i64,
        /// Configured upper edge bound.
        max_edges: i64,
        /// Edges needed to span `max_nodes` nodes.
        required: i64,
    },
}

define_error_codes! {
    /// Stable codes describing [`ConfigurationError`] variants.
    enum ConfigurationErrorCode for ConfigurationError {
        /// The lower node bound was negative.
        NegativeMinNodes => NegativeMinNodes { .. } => "CONFIG_NEGATIVE_MIN_NODES",
        /// The upper node bound was smaller than the lower bound.
        MaxNodesBelowMin => MaxNodesBelowMin { .. } => "CONFIG_MAX_NODES_BELOW_MIN",
        /// A connected graph was requested with too few edges to span it.
        ConnectedEdgeShortfall => ConnectedEdgeShortfall { .. } => "CONFIG_CONNECTED_EDGE_SHORTFALL",
    }
}

/// A draw source could not produce what was asked of it.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DrawError {
    /// A unique collection could not be filled with enough distinct values.
    #[error("could only draw {produced} unique values out of {requested} requested")]
    Exhausted {
        /// Number of distinct values required.
        requested: usize,
        /// Number of distinct values found before giving up.
        produced: usize,
    },
    /// The source refused to hand out more choices than its limit.
    #[error("draw source overran its limit of {limit} choices")]
    Overrun {
        /// Maximum number of choices the source would make.
        limit: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DrawError`] variants.
    enum DrawErrorCode for DrawError {
        /// A unique collection could not be filled with enough distinct values.
        Exhausted => Exhausted { .. } => "DRAW_EXHAUSTED",
        /// The source refused to hand out more choices than its limit.
        Overrun => Overrun { .. } => "DRAW_OVERRUN",
    }
}

/// Error type produced when building or running a [`crate::GraphGenerator`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphGenError {
    /// The configuration was rejected up front.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The draw source failed mid-generation; no graph is returned.
    #[error("graph generation aborted: {0}")]
    Draw(#[from] DrawError),
}

define_error_codes! {
    /// Stable codes describing [`GraphGenError`] variants.
    enum GraphGenErrorCode for GraphGenError {
        /// The configuration was rejected up front.
        Configuration => Configuration { .. } => "GRAPHGEN_CONFIGURATION",
        /// The draw source failed mid-generation.
        Draw => Draw { .. } => "GRAPHGEN_DRAW_FAILURE",
    }
}

impl GraphGenError {
    /// Retrieve the inner [`ConfigurationErrorCode`] when validation failed.
    #[must_use]
    pub const fn configuration_code(&self) -> Option<ConfigurationErrorCode> {
        match self {
            Self::Configuration(error) => Some(error.code()),
            Self::Draw(_) => None,
        }
    }

    /// Retrieve the inner [`DrawErrorCode`] when the draw source failed.
    #[must_use]
    pub const fn draw_code(&self) -> Option<DrawErrorCode> {
        match self {
            Self::Draw(error) => Some(error.code()),
            Self::Configuration(_) => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphGenError>;
