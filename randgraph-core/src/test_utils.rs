//! Shared test utilities for `randgraph-core`.

use std::cell::Cell;

use proptest::test_runner::Config as ProptestConfig;
use rand::{Rng, distributions::Distribution};
use randgraph_test_support::ci::property_test_profile::ProptestRunProfile;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `RANDGRAPH_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Count distribution that replays a fixed script, wrapping at the end.
///
/// Ignores the RNG so tests can force specific draws such as oversized
/// stub counts.
#[derive(Debug)]
pub(crate) struct CyclingCounts {
    values: Vec<usize>,
    next: Cell<usize>,
}

impl CyclingCounts {
    pub(crate) fn new(values: Vec<usize>) -> Self {
        assert!(!values.is_empty(), "script must contain a value");
        Self {
            values,
            next: Cell::new(0),
        }
    }
}

impl Distribution<usize> for CyclingCounts {
    fn sample<R: Rng + ?Sized>(&self, _rng: &mut R) -> usize {
        let index = self.next.get();
        self.next.set((index + 1) % self.values.len());
        self.values[index]
    }
}

/// Weight distribution that replays a fixed script, wrapping at the end.
#[derive(Debug)]
pub(crate) struct CyclingWeights {
    values: Vec<f64>,
    next: Cell<usize>,
}

impl CyclingWeights {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "script must contain a value");
        Self {
            values,
            next: Cell::new(0),
        }
    }
}

impl Distribution<f64> for CyclingWeights {
    fn sample<R: Rng + ?Sized>(&self, _rng: &mut R) -> f64 {
        let index = self.next.get();
        self.next.set((index + 1) % self.values.len());
        self.values[index]
    }
}
