//! Sampling distributions for stub counts, neighbour counts and node weights.
//!
//! Models accept any [`rand::distributions::Distribution`]; the enums here
//! cover the families the CLI exposes and validate their parameters up front.

use std::{fmt, num::NonZeroUsize};

use rand::{Rng, distributions::Distribution};
use rand_distr::{Exp, Geometric, Pareto, Poisson};
use tracing::warn;

use crate::error::{GraphError, Result};

/// Draws at or above this value are treated as pathological and redrawn.
pub const STUB_COUNT_LIMIT: usize = 10_000_000;

/// Default number of consecutive oversized draws tolerated per node.
pub const DEFAULT_MAX_REDRAWS: usize = 1_000;

/// Distribution over non-negative integer counts.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, distributions::Distribution, rngs::SmallRng};
/// use randgraph_core::CountDistribution;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let constant = CountDistribution::constant(3);
/// assert_eq!(constant.sample(&mut rng), 3);
///
/// let poisson = CountDistribution::poisson(2.5)?;
/// let _draw: usize = poisson.sample(&mut rng);
/// # Ok::<(), randgraph_core::GraphError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub enum CountDistribution {
    /// Always yields the same count.
    Constant(usize),
    /// Poisson-distributed counts with the given mean.
    Poisson {
        /// Mean of the distribution.
        mean: f64,
        /// Validated sampler.
        sampler: Poisson<f64>,
    },
    /// Number of failures before the first success of a Bernoulli(`p`) trial.
    Geometric {
        /// Success probability.
        p: f64,
        /// Validated sampler.
        sampler: Geometric,
    },
    /// Discrete power law with `P(k) ~ k^-exponent` for `k >= 1`.
    PowerLaw {
        /// Tail exponent, strictly greater than one.
        exponent: f64,
        /// Continuous Pareto sampler floored to integers.
        sampler: Pareto<f64>,
    },
}

impl CountDistribution {
    /// Creates a distribution that always yields `count`.
    #[must_use]
    pub const fn constant(count: usize) -> Self {
        Self::Constant(count)
    }

    /// Creates a Poisson distribution with the given mean.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] unless `mean` is finite and
    /// positive.
    pub fn poisson(mean: f64) -> Result<Self> {
        let sampler =
            Poisson::new(mean).map_err(|err| GraphError::invalid(format!("poisson({mean}): {err}")))?;
        Ok(Self::Poisson { mean, sampler })
    }

    /// Creates a geometric distribution with success probability `p`.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] unless `p` lies in `(0, 1]`.
    pub fn geometric(p: f64) -> Result<Self> {
        if !(p > 0.0 && p <= 1.0) {
            return Err(GraphError::invalid(format!(
                "geometric({p}): success probability must lie in (0, 1]"
            )));
        }
        let sampler =
            Geometric::new(p).map_err(|err| GraphError::invalid(format!("geometric({p}): {err}")))?;
        Ok(Self::Geometric { p, sampler })
    }

    /// Creates a discrete power law with the given tail exponent.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] unless `exponent` is finite and
    /// greater than one.
    pub fn power_law(exponent: f64) -> Result<Self> {
        if !(exponent.is_finite() && exponent > 1.0) {
            return Err(GraphError::invalid(format!(
                "power_law({exponent}): exponent must be finite and greater than 1"
            )));
        }
        let sampler = Pareto::new(1.0, exponent - 1.0)
            .map_err(|err| GraphError::invalid(format!("power_law({exponent}): {err}")))?;
        Ok(Self::PowerLaw { exponent, sampler })
    }
}

impl Distribution<usize> for CountDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        // Float-to-int `as` casts saturate, so heavy tails land on usize::MAX
        // and are caught by the redraw check.
        match self {
            Self::Constant(count) => *count,
            Self::Poisson { sampler, .. } => sampler.sample(rng) as usize,
            Self::Geometric { sampler, .. } => {
                usize::try_from(sampler.sample(rng)).unwrap_or(usize::MAX)
            }
            Self::PowerLaw { sampler, .. } => sampler.sample(rng).floor() as usize,
        }
    }
}

impl fmt::Display for CountDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(count) => write!(f, "constant({count})"),
            Self::Poisson { mean, .. } => write!(f, "poisson({mean})"),
            Self::Geometric { p, .. } => write!(f, "geometric({p})"),
            Self::PowerLaw { exponent, .. } => write!(f, "power_law({exponent})"),
        }
    }
}

/// Distribution over non-negative real node weights.
#[derive(Debug, Clone, Copy)]
pub enum WeightDistribution {
    /// Always yields the same weight.
    Constant(f64),
    /// Exponential weights with the given rate.
    Exponential {
        /// Rate parameter (inverse mean).
        rate: f64,
        /// Validated sampler.
        sampler: Exp<f64>,
    },
    /// Pareto weights with scale one and the given shape.
    Pareto {
        /// Shape (tail index) parameter.
        shape: f64,
        /// Validated sampler.
        sampler: Pareto<f64>,
    },
}

impl WeightDistribution {
    /// Creates a distribution that always yields `weight`.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] unless `weight` is finite and
    /// non-negative.
    ///
    /// # Examples
    /// ```
    /// use randgraph_core::WeightDistribution;
    ///
    /// assert!(WeightDistribution::constant(0.0).is_ok());
    /// assert!(WeightDistribution::constant(-1.0).is_err());
    /// ```
    pub fn constant(weight: f64) -> Result<Self> {
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(GraphError::invalid(format!(
                "constant({weight}): weight must be finite and non-negative"
            )));
        }
        Ok(Self::Constant(weight))
    }

    /// Creates an exponential distribution with the given rate.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] unless `rate` is finite and
    /// positive.
    pub fn exponential(rate: f64) -> Result<Self> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(GraphError::invalid(format!(
                "exponential({rate}): rate must be finite and positive"
            )));
        }
        let sampler =
            Exp::new(rate).map_err(|err| GraphError::invalid(format!("exponential({rate}): {err}")))?;
        Ok(Self::Exponential { rate, sampler })
    }

    /// Creates a Pareto distribution with scale one and the given shape.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] unless `shape` is finite and
    /// positive.
    pub fn pareto(shape: f64) -> Result<Self> {
        if !(shape.is_finite() && shape > 0.0) {
            return Err(GraphError::invalid(format!(
                "pareto({shape}): shape must be finite and positive"
            )));
        }
        let sampler = Pareto::new(1.0, shape)
            .map_err(|err| GraphError::invalid(format!("pareto({shape}): {err}")))?;
        Ok(Self::Pareto { shape, sampler })
    }
}

impl Distribution<f64> for WeightDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Constant(weight) => *weight,
            Self::Exponential { sampler, .. } => sampler.sample(rng),
            Self::Pareto { sampler, .. } => sampler.sample(rng),
        }
    }
}

impl fmt::Display for WeightDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(weight) => write!(f, "constant({weight})"),
            Self::Exponential { rate, .. } => write!(f, "exponential({rate})"),
            Self::Pareto { shape, .. } => write!(f, "pareto({shape})"),
        }
    }
}

/// Bounds applied when drawing per-node counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingLimits {
    max_redraws: NonZeroUsize,
}

impl SamplingLimits {
    /// Creates limits allowing `max_redraws` consecutive oversized draws.
    #[must_use]
    pub const fn new(max_redraws: NonZeroUsize) -> Self {
        Self { max_redraws }
    }

    /// Returns the number of consecutive oversized draws tolerated per node.
    #[must_use]
    pub const fn max_redraws(&self) -> NonZeroUsize {
        self.max_redraws
    }
}

impl Default for SamplingLimits {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_MAX_REDRAWS).unwrap_or(NonZeroUsize::MIN))
    }
}

/// Draws a count for `node`, redrawing values at or above
/// [`STUB_COUNT_LIMIT`].
///
/// # Errors
/// Returns [`GraphError::StubCountRejected`] once `limits.max_redraws()`
/// consecutive draws have been oversized.
pub(crate) fn draw_count<D, R>(
    distribution: &D,
    rng: &mut R,
    node: usize,
    limits: SamplingLimits,
) -> Result<usize>
where
    D: Distribution<usize> + ?Sized,
    R: Rng + ?Sized,
{
    let mut rejected = 0_usize;
    loop {
        let count = distribution.sample(rng);
        if count < STUB_COUNT_LIMIT {
            return Ok(count);
        }
        rejected += 1;
        warn!(node, count, rejected, "stub count draw too large, redrawing");
        if rejected >= limits.max_redraws().get() {
            return Err(GraphError::StubCountRejected {
                node,
                draws: rejected,
            });
        }
    }
}
