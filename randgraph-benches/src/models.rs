//! Fixed models and generators used across benchmarks.

use randgraph_core::{
    CountDistribution, Generator, GeneratorBuilder, Graph, GraphModel, ModelKind,
    WeightDistribution,
};

use crate::error::BenchSetupError;

/// Seed used for every benchmark generator.
pub const SEED: u64 = 42;

/// Builds a model of `kind` whose expected degree is roughly `mean_degree`.
///
/// The repeated configuration model uses a mean below one so that simple
/// pairings stay likely at every benchmarked size.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] when `mean_degree` is not a valid
/// distribution parameter.
pub fn model(kind: ModelKind, mean_degree: f64) -> Result<GraphModel, BenchSetupError> {
    let model = match kind {
        ModelKind::RepeatedConfiguration => GraphModel::RepeatedConfiguration {
            stubs: CountDistribution::poisson(mean_degree.min(0.8))?,
        },
        ModelKind::ErasedConfiguration => GraphModel::ErasedConfiguration {
            stubs: CountDistribution::poisson(mean_degree)?,
        },
        ModelKind::GeneralizedRandomGraph => GraphModel::GeneralizedRandomGraph {
            weights: WeightDistribution::exponential(mean_degree.sqrt().recip())?,
            gamma: 2.0,
        },
        ModelKind::Dag => GraphModel::Dag {
            neighbours: CountDistribution::poisson(mean_degree / 2.0)?,
        },
    };
    Ok(model)
}

/// Builds a seeded generator over `node_count` nodes.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] when `node_count` is zero.
pub fn generator(node_count: usize) -> Result<Generator, BenchSetupError> {
    Ok(GeneratorBuilder::new()
        .with_node_count(node_count)
        .with_rng_seed(SEED)
        .build()?)
}

/// Generates an erased configuration graph for analysis benchmarks.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] when the parameters are invalid or
/// generation fails.
pub fn erased_graph(node_count: usize, mean_degree: f64) -> Result<Graph, BenchSetupError> {
    let model = model(ModelKind::ErasedConfiguration, mean_degree)?;
    Ok(generator(node_count)?.generate(&model)?.into_graph())
}
