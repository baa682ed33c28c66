//! Generalized random graph: independent edges with weight-derived
//! probabilities.

use rand::{
    Rng,
    distributions::{Distribution, Standard},
};
use tracing::debug;

use crate::{
    error::{GraphError, Result},
    graph::{Graph, NodeId},
};

/// One generalized random graph realisation.
///
/// Evaluates every unordered pair, so the cost is quadratic in `node_count`.
pub(super) fn build<W, R>(node_count: usize, weights: &W, gamma: f64, rng: &mut R) -> Result<Graph>
where
    W: Distribution<f64> + ?Sized,
    R: Rng + ?Sized,
{
    let drawn = (0..node_count)
        .map(|node| {
            let weight = weights.sample(rng);
            if weight.is_finite() && weight >= 0.0 {
                Ok(weight)
            } else {
                Err(GraphError::InvalidWeight { node, weight })
            }
        })
        .collect::<Result<Vec<f64>>>()?;

    let scale = (node_count as f64).powf(gamma.recip());
    let mut graph = Graph::new(node_count);
    for (i, &w_i) in drawn.iter().enumerate() {
        for (j, &w_j) in drawn.iter().enumerate().take(i) {
            let probability = edge_probability(w_i * w_j / scale);
            let draw: f64 = rng.sample(Standard);
            if draw < probability {
                graph.attach(NodeId::new(i), NodeId::new(j))?;
            }
        }
    }
    debug!(edges = graph.edge_count(), scale, "pairs evaluated");
    Ok(graph)
}

/// Maps `alpha = W[i] * W[j] / n^(1 / gamma)` to `alpha / (1 + alpha)`.
fn edge_probability(alpha: f64) -> f64 {
    if alpha.is_infinite() {
        1.0
    } else {
        alpha / (1.0 + alpha)
    }
}
