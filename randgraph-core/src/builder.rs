//! Builder utilities for configuring graph generation.
//!
//! Collects node count, attempt cap, seed and sampling limits, and validates
//! them before constructing [`Generator`] instances.

use std::num::NonZeroUsize;

use crate::{
    Result,
    error::GraphError,
    generator::Generator,
    sampling::{DEFAULT_MAX_REDRAWS, SamplingLimits},
};

/// Seed used when none is configured, so unseeded runs stay reproducible.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Default number of construction attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1_000;

/// Configures and constructs [`Generator`] instances.
///
/// # Examples
/// ```
/// use randgraph_core::GeneratorBuilder;
///
/// let generator = GeneratorBuilder::new()
///     .with_node_count(64)
///     .with_rng_seed(7)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(generator.node_count().get(), 64);
/// assert_eq!(generator.rng_seed(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorBuilder {
    node_count: usize,
    max_attempts: usize,
    rng_seed: u64,
    max_stub_redraws: usize,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self {
            node_count: 1_000,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            rng_seed: DEFAULT_SEED,
            max_stub_redraws: DEFAULT_MAX_REDRAWS,
        }
    }
}

impl GeneratorBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use randgraph_core::{DEFAULT_SEED, GeneratorBuilder};
    ///
    /// let builder = GeneratorBuilder::new();
    /// assert_eq!(builder.node_count(), 1_000);
    /// assert_eq!(builder.rng_seed(), DEFAULT_SEED);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of nodes in every generated graph.
    #[must_use]
    pub fn with_node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    /// Returns the configured node count.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Caps how many construction attempts a retrying model may make.
    ///
    /// # Examples
    /// ```
    /// use randgraph_core::GeneratorBuilder;
    ///
    /// let builder = GeneratorBuilder::new().with_max_attempts(5);
    /// assert_eq!(builder.max_attempts(), 5);
    /// ```
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Returns the configured attempt cap.
    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Seeds the generator's random number stream.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Caps consecutive oversized stub or neighbour count draws per node.
    #[must_use]
    pub fn with_max_stub_redraws(mut self, redraws: usize) -> Self {
        self.max_stub_redraws = redraws;
        self
    }

    /// Returns the configured redraw cap.
    #[must_use]
    pub fn max_stub_redraws(&self) -> usize {
        self.max_stub_redraws
    }

    /// Validates the configuration and constructs a [`Generator`].
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyGraph`] when the node count is zero and
    /// [`GraphError::InvalidParameters`] when the attempt or redraw cap is
    /// zero.
    ///
    /// # Examples
    /// ```
    /// use randgraph_core::{GeneratorBuilder, GraphErrorCode};
    ///
    /// let err = GeneratorBuilder::new()
    ///     .with_node_count(0)
    ///     .build()
    ///     .expect_err("zero nodes are rejected");
    /// assert_eq!(err.code(), GraphErrorCode::EmptyGraph);
    /// ```
    pub fn build(self) -> Result<Generator> {
        let node_count = NonZeroUsize::new(self.node_count).ok_or(GraphError::EmptyGraph)?;
        let max_attempts = NonZeroUsize::new(self.max_attempts)
            .ok_or_else(|| GraphError::invalid("max_attempts must be at least 1"))?;
        let max_redraws = NonZeroUsize::new(self.max_stub_redraws)
            .ok_or_else(|| GraphError::invalid("max_stub_redraws must be at least 1"))?;

        Ok(Generator::new(
            node_count,
            max_attempts,
            self.rng_seed,
            SamplingLimits::new(max_redraws),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::GraphErrorCode;

    #[test]
    fn defaults_are_valid() {
        let generator = GeneratorBuilder::new().build().expect("defaults are valid");
        assert_eq!(generator.node_count().get(), 1_000);
        assert_eq!(generator.max_attempts().get(), DEFAULT_MAX_ATTEMPTS);
        assert_eq!(generator.rng_seed(), DEFAULT_SEED);
        assert_eq!(
            generator.sampling_limits().max_redraws().get(),
            DEFAULT_MAX_REDRAWS
        );
    }

    #[rstest]
    #[case::nodes(GeneratorBuilder::new().with_node_count(0), GraphErrorCode::EmptyGraph)]
    #[case::attempts(
        GeneratorBuilder::new().with_max_attempts(0),
        GraphErrorCode::InvalidParameters
    )]
    #[case::redraws(
        GeneratorBuilder::new().with_max_stub_redraws(0),
        GraphErrorCode::InvalidParameters
    )]
    fn zero_values_are_rejected(#[case] builder: GeneratorBuilder, #[case] code: GraphErrorCode) {
        let err = builder.build().expect_err("zero must be rejected");
        assert_eq!(err.code(), code);
    }

    #[test]
    fn overrides_reach_the_generator() {
        let generator = GeneratorBuilder::new()
            .with_node_count(3)
            .with_max_attempts(9)
            .with_rng_seed(42)
            .with_max_stub_redraws(2)
            .build()
            .expect("overrides are valid");
        assert_eq!(generator.node_count().get(), 3);
        assert_eq!(generator.max_attempts().get(), 9);
        assert_eq!(generator.rng_seed(), 42);
        assert_eq!(generator.sampling_limits().max_redraws().get(), 2);
    }
}
