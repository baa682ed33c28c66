//! Randgraph core library.
//!
//! Generates random undirected graphs from four models (repeated and erased
//! configuration models, the generalized random graph and a
//! neighbour-drawing model) and summarises them as degree and cluster-size
//! distributions.

mod builder;
mod distribution;
mod error;
mod generator;
mod graph;
mod model;
mod sampling;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED, GeneratorBuilder},
    distribution::{ClusterSizeDistribution, DegreeDistribution},
    error::{GraphError, GraphErrorCode, Result},
    generator::{GeneratedGraph, Generator},
    graph::{DuplicatePolicy, Graph, Node, NodeId, Pairing, Stub, StubArena, StubId},
    model::{ErasurePolicy, GraphModel, ModelKind},
    sampling::{
        CountDistribution, DEFAULT_MAX_REDRAWS, STUB_COUNT_LIMIT, SamplingLimits,
        WeightDistribution,
    },
};
