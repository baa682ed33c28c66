//! Stub-matching configuration model shared by the repeated and erased
//! variants.

use std::collections::HashSet;

use rand::{Rng, distributions::Distribution, seq::SliceRandom};
use tracing::{debug, warn};

use crate::{
    error::Result,
    graph::{DuplicatePolicy, Graph, Pairing, StubId},
    sampling::SamplingLimits,
};

/// How a configuration-model attempt treats self-loops and multi-edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErasurePolicy {
    /// Any self-pairing or repeated neighbour fails the attempt.
    Repeated,
    /// Self-pairings are skipped and their stubs erased; repeated neighbours
    /// are collapsed.
    Erased,
}

impl ErasurePolicy {
    const fn allows_self_loops(self) -> bool {
        matches!(self, Self::Erased)
    }

    const fn duplicates(self) -> DuplicatePolicy {
        match self {
            Self::Repeated => DuplicatePolicy::Reject,
            Self::Erased => DuplicatePolicy::Collapse,
        }
    }
}

/// One configuration-model attempt.
///
/// Draws every node's stub count, shuffles the pooled stubs uniformly and
/// pairs them two at a time. An odd pool leaves its final stub dangling.
pub(super) fn build<D, R>(
    node_count: usize,
    stubs: &D,
    policy: ErasurePolicy,
    limits: SamplingLimits,
    rng: &mut R,
) -> Result<Graph>
where
    D: Distribution<usize> + ?Sized,
    R: Rng + ?Sized,
{
    let mut graph = Graph::with_stub_counts(node_count, stubs, rng, limits)?;

    let mut pool: Vec<StubId> = graph.listed_stubs().collect();
    pool.shuffle(rng);

    let mut skipped = HashSet::new();
    let mut pairs = pool.chunks_exact(2);
    for pair in pairs.by_ref() {
        let &[a, b] = pair else { continue };
        if graph.attach_stubs(a, b, policy.allows_self_loops())? == Pairing::SkippedSelfLoop {
            skipped.insert(a);
            skipped.insert(b);
        }
    }
    if let [leftover] = pairs.remainder() {
        warn!(
            stubs = pool.len(),
            stub = leftover.index(),
            "odd stub total, final stub left dangling"
        );
    }

    let erased_self_loops = graph.erase_stubs(&skipped) / 2;
    let collapsed = graph.check_all_neighbours(policy.duplicates())?;
    debug!(
        ?policy,
        stubs = pool.len(),
        erased_self_loops,
        collapsed,
        "stubs paired"
    );
    Ok(graph)
}
