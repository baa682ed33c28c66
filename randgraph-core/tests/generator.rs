//! End-to-end generation through the public API.

mod common;

use std::collections::BTreeMap;

use rand::{Rng, distributions::Distribution};
use randgraph_core::{
    CountDistribution, GeneratorBuilder, GraphError, GraphErrorCode, GraphModel, ModelKind,
    NodeId, STUB_COUNT_LIMIT, WeightDistribution,
};
use randgraph_test_support::tracing::with_recording;
use rstest::rstest;
use tracing::Level;

use common::{assert_simple, generator};

struct NegativeWeights;

impl Distribution<f64> for NegativeWeights {
    fn sample<R: Rng + ?Sized>(&self, _rng: &mut R) -> f64 {
        -1.0
    }
}

#[rstest]
#[case(1)]
#[case(29)]
#[case(314)]
fn repeated_regular_graph_is_a_four_cycle(#[case] seed: u64) {
    let model: GraphModel = GraphModel::RepeatedConfiguration {
        stubs: CountDistribution::constant(2),
    };
    let generated = generator(4, seed)
        .generate(&model)
        .expect("a simple 2-regular graph exists on four nodes");
    let graph = generated.graph();
    assert_simple(graph);
    for node in graph.nodes() {
        assert_eq!(graph.degree(node.id()), Some(2));
    }
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(generated.model(), ModelKind::RepeatedConfiguration);
}

#[rstest]
#[case::repeated(GraphModel::RepeatedConfiguration { stubs: CountDistribution::constant(0) })]
#[case::erased(GraphModel::ErasedConfiguration { stubs: CountDistribution::constant(3) })]
#[case::general(GraphModel::GeneralizedRandomGraph {
    weights: WeightDistribution::Constant(5.0),
    gamma: 2.0,
})]
#[case::dag(GraphModel::Dag { neighbours: CountDistribution::constant(2) })]
fn single_node_graph_is_one_cluster(#[case] model: GraphModel) {
    let mut generated = generator(1, 5).generate(&model).expect("one node suffices");
    let graph = generated.graph_mut();
    let own_degree = graph.degree(NodeId::new(0)).expect("node 0 exists");
    assert_eq!(
        graph.degree_distribution().as_map(),
        &BTreeMap::from([(own_degree, 1.0)])
    );
    assert_eq!(graph.cluster_sizes().as_map(), &BTreeMap::from([(1, 1.0)]));
}

#[test]
fn zero_weights_leave_every_node_isolated() {
    let model: GraphModel = GraphModel::GeneralizedRandomGraph {
        weights: WeightDistribution::constant(0.0).expect("zero is a valid weight"),
        gamma: 1.5,
    };
    let mut generated = generator(25, 3).generate(&model).expect("valid weights");
    let graph = generated.graph_mut();
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.cluster_sizes().as_map(), &BTreeMap::from([(1, 1.0)]));
}

#[test]
fn dag_with_zero_targets_has_no_neighbours() {
    let model: GraphModel = GraphModel::Dag {
        neighbours: CountDistribution::constant(0),
    };
    let generated = generator(5, 8).generate(&model).expect("zero targets");
    let graph = generated.graph();
    assert_eq!(graph.edge_count(), 0);
    assert!(
        graph
            .nodes()
            .iter()
            .all(|node| graph.neighbours(node.id()) == Some(Vec::new()))
    );
}

#[test]
fn impossible_repeated_graph_exhausts_attempts() {
    let model: GraphModel = GraphModel::RepeatedConfiguration {
        stubs: CountDistribution::constant(4),
    };
    let generator = GeneratorBuilder::new()
        .with_node_count(2)
        .with_max_attempts(3)
        .build()
        .expect("valid configuration");
    let err = generator
        .generate(&model)
        .expect_err("two nodes cannot carry degree four simply");
    match &err {
        GraphError::AttemptsExhausted {
            model, attempts, ..
        } => {
            assert_eq!(*model, ModelKind::RepeatedConfiguration);
            assert_eq!(attempts.get(), 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        err.last_attempt_code(),
        Some(GraphErrorCode::SelfLoop | GraphErrorCode::DuplicateNeighbour)
    ));
}

#[test]
fn erased_model_retries_rejected_draws() {
    let model: GraphModel = GraphModel::ErasedConfiguration {
        stubs: CountDistribution::constant(STUB_COUNT_LIMIT),
    };
    let generator = GeneratorBuilder::new()
        .with_node_count(3)
        .with_max_attempts(2)
        .with_max_stub_redraws(1)
        .build()
        .expect("valid configuration");
    let err = generator.generate(&model).expect_err("every draw is oversized");
    assert_eq!(err.code(), GraphErrorCode::AttemptsExhausted);
    assert_eq!(
        err.last_attempt_code(),
        Some(GraphErrorCode::StubCountRejected)
    );
}

#[test]
fn dag_reports_rejected_draws_without_retrying() {
    let model: GraphModel = GraphModel::Dag {
        neighbours: CountDistribution::constant(STUB_COUNT_LIMIT),
    };
    let generator = GeneratorBuilder::new()
        .with_node_count(3)
        .with_max_stub_redraws(2)
        .build()
        .expect("valid configuration");
    let err = generator.generate(&model).expect_err("every draw is oversized");
    assert_eq!(err, GraphError::StubCountRejected { node: 0, draws: 2 });
}

#[test]
fn invalid_weights_are_not_retried() {
    let model = GraphModel::<CountDistribution, NegativeWeights>::GeneralizedRandomGraph {
        weights: NegativeWeights,
        gamma: 1.0,
    };
    let err = generator(4, 0)
        .generate(&model)
        .expect_err("negative weights are invalid");
    assert_eq!(err.code(), GraphErrorCode::InvalidWeight);
}

#[test]
fn invalid_gamma_is_rejected_before_sampling() {
    let model: GraphModel = GraphModel::GeneralizedRandomGraph {
        weights: WeightDistribution::Constant(1.0),
        gamma: 0.0,
    };
    let err = generator(4, 0).generate(&model).expect_err("gamma is zero");
    assert_eq!(err.code(), GraphErrorCode::InvalidParameters);
}

#[rstest]
#[case::erased(GraphModel::ErasedConfiguration {
    stubs: CountDistribution::poisson(2.0).expect("positive mean"),
})]
#[case::dag(GraphModel::Dag {
    neighbours: CountDistribution::geometric(0.4).expect("valid probability"),
})]
#[case::general(GraphModel::GeneralizedRandomGraph {
    weights: WeightDistribution::pareto(2.5).expect("positive shape"),
    gamma: 2.0,
})]
fn equal_seeds_reproduce_the_graph(#[case] model: GraphModel) {
    let neighbour_lists = |seed: u64| {
        let generated = generator(80, seed).generate(&model).expect("model generates");
        let graph = generated.into_graph();
        graph
            .nodes()
            .iter()
            .map(|node| graph.neighbours(node.id()).expect("node exists"))
            .collect::<Vec<_>>()
    };
    assert_eq!(neighbour_lists(17), neighbour_lists(17));
}

#[test]
fn generation_is_traced() {
    let model: GraphModel = GraphModel::ErasedConfiguration {
        stubs: CountDistribution::constant(2),
    };
    let (result, layer) = with_recording(|| generator(10, 4).generate(&model));
    let generated = result.expect("erased model generates");

    let span = layer.span_named("core.generate").expect("span recorded");
    assert_eq!(span.fields.get("model").map(String::as_str), Some("erased"));
    assert_eq!(span.fields.get("nodes").map(String::as_str), Some("10"));

    let finished = layer.events_with_message("graph generated");
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].level, Level::INFO);
    assert_eq!(
        finished[0].fields.get("attempts"),
        Some(&generated.attempts().to_string())
    );
    assert_eq!(finished[0].span.as_deref(), Some("core.generate"));
}
