//! Benchmark parameter types.
//!
//! Each type renders as the `BenchmarkId` parameter label.

use std::fmt;

use randgraph_core::ModelKind;

/// Parameters for a generation benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GenerationBenchParams {
    /// Model being realised.
    pub model: ModelKind,
    /// Number of nodes per graph.
    pub node_count: usize,
}

impl fmt::Display for GenerationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},n={}", self.model, self.node_count)
    }
}

/// Parameters for a cluster discovery benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ClusterBenchParams {
    /// Number of nodes in the analysed graph.
    pub node_count: usize,
    /// Mean stub count used to build the graph.
    pub mean_degree: u32,
}

impl fmt::Display for ClusterBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.node_count, self.mean_degree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(ModelKind::Dag, 100, "dag,n=100")]
    #[case(ModelKind::GeneralizedRandomGraph, 5_000, "general,n=5000")]
    fn generation_labels(#[case] model: ModelKind, #[case] node_count: usize, #[case] label: &str) {
        let params = GenerationBenchParams { model, node_count };
        assert_eq!(params.to_string(), label);
    }

    #[test]
    fn cluster_labels() {
        let params = ClusterBenchParams {
            node_count: 10_000,
            mean_degree: 3,
        };
        assert_eq!(params.to_string(), "n=10000,k=3");
    }
}
