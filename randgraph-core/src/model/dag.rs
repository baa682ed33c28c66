//! Neighbour-drawing model: each node links to a sampled number of
//! uniformly chosen other nodes, in node order.

use std::collections::HashSet;

use rand::{Rng, distributions::Distribution};
use tracing::debug;

use crate::{
    error::Result,
    graph::{DuplicatePolicy, Graph, NodeId},
    sampling::{SamplingLimits, draw_count},
};

/// One neighbour-drawing realisation.
///
/// Targets are drawn for every node before any edge is created. A graph with
/// a single node has no admissible neighbour, so every target is ignored.
pub(super) fn build<D, R>(
    node_count: usize,
    neighbours: &D,
    limits: SamplingLimits,
    rng: &mut R,
) -> Result<Graph>
where
    D: Distribution<usize> + ?Sized,
    R: Rng + ?Sized,
{
    let targets = (0..node_count)
        .map(|node| draw_count(neighbours, rng, node, limits))
        .collect::<Result<Vec<_>>>()?;

    let mut graph = Graph::new(node_count);
    if node_count < 2 {
        debug!(node_count, "no admissible neighbours, targets ignored");
        return Ok(graph);
    }

    let mut collapsed = 0_usize;
    for (node, target) in targets.into_iter().enumerate() {
        let candidates = draw_candidates(node, target, node_count, rng);
        let source = NodeId::new(node);
        for &candidate in &candidates {
            graph.attach(source, candidate)?;
        }
        // Only the nodes that just gained stubs can hold a new repeat.
        collapsed += graph.check_neighbours(source, DuplicatePolicy::Collapse)?;
        for &candidate in &candidates {
            collapsed += graph.check_neighbours(candidate, DuplicatePolicy::Collapse)?;
        }
    }
    debug!(edges = graph.edge_count(), collapsed, "neighbours attached");
    Ok(graph)
}

/// Draws `target` indices uniformly from `[0, node_count)`, redrawing any
/// that equal `node`, and keeps the first occurrence of each.
fn draw_candidates<R: Rng + ?Sized>(
    node: usize,
    target: usize,
    node_count: usize,
    rng: &mut R,
) -> Vec<NodeId> {
    let mut candidates = Vec::with_capacity(target.min(node_count));
    let mut seen = HashSet::with_capacity(target.min(node_count));
    for _ in 0..target {
        let candidate = loop {
            let draw = rng.gen_range(0..node_count);
            if draw != node {
                break draw;
            }
        };
        if seen.insert(candidate) {
            candidates.push(NodeId::new(candidate));
        }
    }
    candidates
}
