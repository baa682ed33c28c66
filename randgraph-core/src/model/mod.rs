//! Random graph models and their single-attempt construction.
//!
//! [`GraphModel`] is a closed set of variants dispatched by one function. The
//! two configuration-model variants share a helper parameterised on
//! [`ErasurePolicy`]; retrying across attempts is the generator's concern.

mod configuration;
mod dag;
mod generalized;

use std::fmt;

use rand::{Rng, distributions::Distribution};

use crate::{
    error::{GraphError, Result},
    graph::Graph,
    sampling::{CountDistribution, SamplingLimits, WeightDistribution},
};

pub use self::configuration::ErasurePolicy;

/// Tag naming a [`GraphModel`] variant without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Configuration model that restarts until the pairing is simple.
    RepeatedConfiguration,
    /// Configuration model that erases self-loops and multi-edges.
    ErasedConfiguration,
    /// Independent edges with weight-derived probabilities.
    GeneralizedRandomGraph,
    /// Each node links to a drawn number of uniformly chosen other nodes.
    Dag,
}

impl ModelKind {
    /// Stable identifier for logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RepeatedConfiguration => "repeated",
            Self::ErasedConfiguration => "erased",
            Self::GeneralizedRandomGraph => "general",
            Self::Dag => "dag",
        }
    }

    /// Returns `true` when a failed attempt with `error` should be discarded
    /// and construction restarted.
    ///
    /// The repeated variant restarts on invariant violations and rejected
    /// stub draws; the erased variant only on rejected stub draws. The other
    /// models never restart.
    ///
    /// # Examples
    /// ```
    /// use randgraph_core::{GraphError, ModelKind};
    ///
    /// let duplicate = GraphError::DuplicateNeighbour { node: 0, neighbour: 1 };
    /// assert!(ModelKind::RepeatedConfiguration.retries(&duplicate));
    /// assert!(!ModelKind::ErasedConfiguration.retries(&duplicate));
    /// assert!(!ModelKind::Dag.retries(&duplicate));
    /// ```
    #[must_use]
    pub const fn retries(self, error: &GraphError) -> bool {
        let rejected_draw = matches!(error, GraphError::StubCountRejected { .. });
        match self {
            Self::RepeatedConfiguration => rejected_draw || error.is_invariant_violation(),
            Self::ErasedConfiguration => rejected_draw,
            Self::GeneralizedRandomGraph | Self::Dag => false,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A random graph model together with the distribution(s) it samples from.
///
/// `C` samples per-node stub or neighbour counts and `W` samples node
/// weights; both default to the validated families in [`crate::sampling`].
///
/// # Examples
/// ```
/// use randgraph_core::{CountDistribution, GraphModel, ModelKind};
///
/// let model: GraphModel = GraphModel::ErasedConfiguration {
///     stubs: CountDistribution::poisson(3.0)?,
/// };
/// assert_eq!(model.kind(), ModelKind::ErasedConfiguration);
/// # Ok::<(), randgraph_core::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub enum GraphModel<C = CountDistribution, W = WeightDistribution> {
    /// Stub matching that restarts whenever a self-loop or multi-edge forms.
    RepeatedConfiguration {
        /// Per-node stub count distribution.
        stubs: C,
    },
    /// Stub matching that deletes self-loops and collapses multi-edges.
    ErasedConfiguration {
        /// Per-node stub count distribution.
        stubs: C,
    },
    /// Every pair `i > j` is linked with probability `a / (1 + a)` where
    /// `a = W[i] * W[j] / n^(1 / gamma)`.
    GeneralizedRandomGraph {
        /// Per-node weight distribution.
        weights: W,
        /// Shape parameter; must be finite and positive.
        gamma: f64,
    },
    /// Each node draws a target out-degree and links to that many uniformly
    /// chosen other nodes.
    Dag {
        /// Per-node target out-degree distribution.
        neighbours: C,
    },
}

impl<C, W> GraphModel<C, W> {
    /// Returns the variant tag.
    #[must_use]
    pub const fn kind(&self) -> ModelKind {
        match self {
            Self::RepeatedConfiguration { .. } => ModelKind::RepeatedConfiguration,
            Self::ErasedConfiguration { .. } => ModelKind::ErasedConfiguration,
            Self::GeneralizedRandomGraph { .. } => ModelKind::GeneralizedRandomGraph,
            Self::Dag { .. } => ModelKind::Dag,
        }
    }

    /// Checks parameters that do not depend on sampling.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] when `gamma` is not finite
    /// and positive.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::GeneralizedRandomGraph { gamma, .. } if !(gamma.is_finite() && *gamma > 0.0) => {
                Err(GraphError::invalid(format!(
                    "gamma must be finite and positive (got {gamma})"
                )))
            }
            _ => Ok(()),
        }
    }
}

impl<C, W> GraphModel<C, W>
where
    C: Distribution<usize>,
    W: Distribution<f64>,
{
    /// Performs a single construction attempt over `node_count` nodes.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] when [`Self::validate`]
    /// fails, otherwise whatever the model's random process reports; see
    /// [`ModelKind::retries`] for which failures are worth another attempt.
    pub fn build_once<R: Rng + ?Sized>(
        &self,
        node_count: usize,
        limits: SamplingLimits,
        rng: &mut R,
    ) -> Result<Graph> {
        self.validate()?;
        match self {
            Self::RepeatedConfiguration { stubs } => {
                configuration::build(node_count, stubs, ErasurePolicy::Repeated, limits, rng)
            }
            Self::ErasedConfiguration { stubs } => {
                configuration::build(node_count, stubs, ErasurePolicy::Erased, limits, rng)
            }
            Self::GeneralizedRandomGraph { weights, gamma } => {
                generalized::build(node_count, weights, *gamma, rng)
            }
            Self::Dag { neighbours } => dag::build(node_count, neighbours, limits, rng),
        }
    }
}
