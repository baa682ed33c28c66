//! Seeded graph generation with bounded restarts.
//!
//! Provides the [`Generator`] entry point that realises a [`GraphModel`],
//! restarting failed attempts the model allows to be retried.

use std::{num::NonZeroUsize, time::Instant};

use rand::{Rng, SeedableRng, distributions::Distribution, rngs::SmallRng};
use tracing::{debug, info, instrument};

use crate::{
    Result,
    error::GraphError,
    graph::Graph,
    model::{GraphModel, ModelKind},
    sampling::SamplingLimits,
};

/// Entry point for realising random graph models.
///
/// # Examples
/// ```
/// use randgraph_core::{CountDistribution, GeneratorBuilder, GraphModel};
///
/// let generator = GeneratorBuilder::new()
///     .with_node_count(50)
///     .with_rng_seed(11)
///     .build()?;
/// let model: GraphModel = GraphModel::ErasedConfiguration {
///     stubs: CountDistribution::constant(2),
/// };
/// let mut generated = generator.generate(&model)?;
/// assert_eq!(generated.attempts().get(), 1);
///
/// let clusters = generated.graph_mut().cluster_sizes();
/// assert!((clusters.total() - 1.0).abs() < 1e-9);
/// # Ok::<(), randgraph_core::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    node_count: NonZeroUsize,
    max_attempts: NonZeroUsize,
    rng_seed: u64,
    limits: SamplingLimits,
}

impl Generator {
    pub(crate) fn new(
        node_count: NonZeroUsize,
        max_attempts: NonZeroUsize,
        rng_seed: u64,
        limits: SamplingLimits,
    ) -> Self {
        Self {
            node_count,
            max_attempts,
            rng_seed,
            limits,
        }
    }

    /// Number of nodes in every generated graph.
    #[must_use]
    pub fn node_count(&self) -> NonZeroUsize {
        self.node_count
    }

    /// Maximum number of attempts a retrying model may make.
    #[must_use]
    pub fn max_attempts(&self) -> NonZeroUsize {
        self.max_attempts
    }

    /// Seed used by [`Self::generate`].
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Limits applied to per-node count draws.
    #[must_use]
    pub fn sampling_limits(&self) -> SamplingLimits {
        self.limits
    }

    /// Realises `model` with a fresh RNG seeded from [`Self::rng_seed`].
    ///
    /// Identical generators produce identical graphs for identical models.
    ///
    /// # Errors
    /// See [`Self::generate_with_rng`].
    pub fn generate<C, W>(&self, model: &GraphModel<C, W>) -> Result<GeneratedGraph>
    where
        C: Distribution<usize>,
        W: Distribution<f64>,
    {
        let mut rng = SmallRng::seed_from_u64(self.rng_seed);
        self.generate_with_rng(model, &mut rng)
    }

    /// Realises `model` using the caller's RNG.
    ///
    /// Attempts are repeated while [`ModelKind::retries`] accepts the
    /// failure, up to [`Self::max_attempts`] in total.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] for invalid model
    /// parameters, [`GraphError::AttemptsExhausted`] when every permitted
    /// attempt failed with a retryable error, and any non-retryable attempt
    /// failure unchanged.
    #[instrument(
        name = "core.generate",
        err,
        skip(self, model, rng),
        fields(
            model = %model.kind(),
            nodes = self.node_count.get(),
            max_attempts = self.max_attempts.get(),
        ),
    )]
    pub fn generate_with_rng<C, W, R>(
        &self,
        model: &GraphModel<C, W>,
        rng: &mut R,
    ) -> Result<GeneratedGraph>
    where
        C: Distribution<usize>,
        W: Distribution<f64>,
        R: Rng + ?Sized,
    {
        model.validate()?;
        let kind = model.kind();
        let started = Instant::now();
        let mut attempt = NonZeroUsize::MIN;
        loop {
            match model.build_once(self.node_count.get(), self.limits, rng) {
                Ok(graph) => {
                    info!(
                        attempts = attempt.get(),
                        edges = graph.edge_count(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "graph generated"
                    );
                    return Ok(GeneratedGraph {
                        graph,
                        model: kind,
                        attempts: attempt,
                    });
                }
                Err(err) if kind.retries(&err) => {
                    debug!(attempt = attempt.get(), code = %err.code(), "attempt discarded");
                    if attempt >= self.max_attempts {
                        return Err(GraphError::AttemptsExhausted {
                            model: kind,
                            attempts: attempt,
                            last: Box::new(err),
                        });
                    }
                    attempt = attempt.saturating_add(1);
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// A realised graph together with how it was obtained.
#[derive(Debug, Clone)]
pub struct GeneratedGraph {
    graph: Graph,
    model: ModelKind,
    attempts: NonZeroUsize,
}

impl GeneratedGraph {
    /// Borrows the graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutably borrows the graph, as needed by [`Graph::cluster_sizes`].
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Consumes the report and returns the graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Model that produced the graph.
    #[must_use]
    pub fn model(&self) -> ModelKind {
        self.model
    }

    /// Number of attempts made, including the successful one.
    #[must_use]
    pub fn attempts(&self) -> NonZeroUsize {
        self.attempts
    }
}
