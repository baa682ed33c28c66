//! Error types for the randgraph core library.
//!
//! Defines the error enum exposed by the public API, its stable codes and a
//! convenient result alias.

use std::{fmt, num::NonZeroUsize};

use thiserror::Error;

use crate::model::ModelKind;

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
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced while configuring, sampling or building random graphs.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// A graph must contain at least one node.
    #[error("node_count must be at least 1")]
    EmptyGraph,
    /// A configuration or distribution parameter was rejected.
    #[error("invalid parameters: {reason}")]
    InvalidParameters {
        /// Human-readable description of the rejected parameter.
        reason: String,
    },
    /// A sampled node weight was negative or not finite.
    #[error("node {node} drew weight {weight}, weights must be finite and non-negative")]
    InvalidWeight {
        /// Node that received the weight.
        node: usize,
        /// The offending weight.
        weight: f64,
    },
    /// Two stubs of the same node were paired where self-loops are forbidden.
    #[error("stubs of node {node} were paired with each other")]
    SelfLoop {
        /// Node owning both stubs.
        node: usize,
    },
    /// A node reached the same neighbour through more than one stub.
    #[error("node {node} is connected to node {neighbour} more than once")]
    DuplicateNeighbour {
        /// Node whose neighbour list contains the repeat.
        node: usize,
        /// Neighbour that appeared twice.
        neighbour: usize,
    },
    /// Every stub-count draw for a node exceeded the sanity limit.
    #[error("node {node} drew an oversized stub count {draws} times in a row")]
    StubCountRejected {
        /// Node whose draws were rejected.
        node: usize,
        /// Number of consecutive rejected draws.
        draws: usize,
    },
    /// A retrying model never produced a valid graph.
    #[error("{model} gave up after {attempts} attempts: {last}")]
    AttemptsExhausted {
        /// Model that was being realised.
        model: ModelKind,
        /// Number of attempts made.
        attempts: NonZeroUsize,
        /// Failure reported by the final attempt.
        #[source]
        last: Box<GraphError>,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A graph must contain at least one node.
        EmptyGraph => EmptyGraph => "GRAPH_EMPTY",
        /// A configuration or distribution parameter was rejected.
        InvalidParameters => InvalidParameters { .. } => "GRAPH_INVALID_PARAMETERS",
        /// A sampled node weight was negative or not finite.
        InvalidWeight => InvalidWeight { .. } => "GRAPH_INVALID_WEIGHT",
        /// Two stubs of the same node were paired.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// A node reached the same neighbour through more than one stub.
        DuplicateNeighbour => DuplicateNeighbour { .. } => "GRAPH_DUPLICATE_NEIGHBOUR",
        /// Every stub-count draw for a node exceeded the sanity limit.
        StubCountRejected => StubCountRejected { .. } => "GRAPH_STUB_COUNT_REJECTED",
        /// A retrying model never produced a valid graph.
        AttemptsExhausted => AttemptsExhausted { .. } => "GRAPH_ATTEMPTS_EXHAUSTED",
    }
}

impl GraphError {
    /// Returns `true` for failures that break a structural graph invariant
    /// (self-pairing or a repeated neighbour).
    ///
    /// # Examples
    /// ```
    /// use randgraph_core::GraphError;
    ///
    /// assert!(GraphError::SelfLoop { node: 3 }.is_invariant_violation());
    /// assert!(!GraphError::EmptyGraph.is_invariant_violation());
    /// ```
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::SelfLoop { .. } | Self::DuplicateNeighbour { .. })
    }

    /// Returns the code of the failure that ended the last attempt when the
    /// error reports exhausted retries.
    #[must_use]
    pub fn last_attempt_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::AttemptsExhausted { last, .. } => Some(last.code()),
            _ => None,
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            reason: reason.into(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;
