//! Unit tests for graph construction, neighbour queries and analysis.

use std::collections::{BTreeMap, HashSet};

use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};

use crate::{
    CountDistribution, GraphError, SamplingLimits, STUB_COUNT_LIMIT,
    graph::{DuplicatePolicy, Graph, NodeId},
};

fn ids(raw: &[usize]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId::new).collect()
}

fn connect(graph: &mut Graph, edges: &[(usize, usize)]) {
    for &(a, b) in edges {
        graph
            .attach(NodeId::new(a), NodeId::new(b))
            .expect("nodes exist");
    }
}

/// Two triangles joined by nothing, plus an isolated node.
#[fixture]
fn two_triangles() -> Graph {
    let mut graph = Graph::new(7);
    connect(&mut graph, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
    graph
}

#[test]
fn new_graph_has_isolated_nodes() {
    let mut graph = Graph::new(3);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.degree_distribution().as_map(), &BTreeMap::from([(0, 1.0)]));
    assert_eq!(graph.cluster_sizes().as_map(), &BTreeMap::from([(1, 1.0)]));
}

#[test]
fn with_stub_counts_allocates_unpaired_stubs() {
    let mut rng = SmallRng::seed_from_u64(1);
    let graph = Graph::with_stub_counts(
        5,
        &CountDistribution::constant(3),
        &mut rng,
        SamplingLimits::default(),
    )
    .expect("constant draws are accepted");
    assert_eq!(graph.total_degree(), 15);
    assert_eq!(graph.dangling_stub_count(), 15);
    assert_eq!(graph.stubs().len(), 15);
    assert!(graph.nodes().iter().all(|node| node.stub_count() == 3));
}

#[test]
fn with_stub_counts_surfaces_rejected_draws() {
    let mut rng = SmallRng::seed_from_u64(1);
    let err = Graph::with_stub_counts(
        2,
        &CountDistribution::constant(STUB_COUNT_LIMIT),
        &mut rng,
        SamplingLimits::default(),
    )
    .expect_err("oversized draws must be rejected");
    assert!(matches!(err, GraphError::StubCountRejected { node: 0, .. }));
}

#[test]
fn attach_grows_both_stub_sequences() {
    let mut graph = Graph::new(2);
    connect(&mut graph, &[(0, 1)]);
    assert_eq!(graph.degree(NodeId::new(0)), Some(1));
    assert_eq!(graph.degree(NodeId::new(1)), Some(1));
    assert_eq!(graph.neighbours(NodeId::new(0)), Some(ids(&[1])));
    assert_eq!(graph.neighbours(NodeId::new(1)), Some(ids(&[0])));
}

#[test]
fn attach_rejects_unknown_nodes() {
    let mut graph = Graph::new(2);
    let err = graph
        .attach(NodeId::new(0), NodeId::new(2))
        .expect_err("node 2 does not exist");
    assert!(matches!(err, GraphError::InvalidParameters { .. }));
    assert_eq!(graph.total_degree(), 0);
}

#[test]
fn neighbours_follow_stub_order() {
    let mut graph = Graph::new(4);
    connect(&mut graph, &[(0, 3), (0, 1), (2, 0)]);
    assert_eq!(graph.neighbours(NodeId::new(0)), Some(ids(&[3, 1, 2])));
    assert_eq!(graph.neighbours(NodeId::new(9)), None);
}

#[test]
fn collapse_pass_removes_multi_edges_on_both_ends() {
    let mut graph = Graph::new(3);
    connect(&mut graph, &[(0, 1), (1, 0), (0, 1), (1, 2)]);
    assert_eq!(graph.edge_count(), 4);
    let removed = graph
        .check_all_neighbours(DuplicatePolicy::Collapse)
        .expect("collapse never fails");
    assert_eq!(removed, 4);
    assert_eq!(graph.neighbours(NodeId::new(0)), Some(ids(&[1])));
    assert_eq!(graph.neighbours(NodeId::new(1)), Some(ids(&[0, 2])));
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.total_degree(), 2 * graph.edge_count());
}

#[test]
fn reject_pass_reports_multi_edges() {
    let mut graph = Graph::new(2);
    connect(&mut graph, &[(0, 1), (0, 1)]);
    let err = graph
        .check_all_neighbours(DuplicatePolicy::Reject)
        .expect_err("multi-edge must be rejected");
    assert_eq!(
        err,
        GraphError::DuplicateNeighbour {
            node: 0,
            neighbour: 1
        }
    );
}

#[rstest]
fn degree_distribution_aggregates_equal_degrees(two_triangles: Graph) {
    let degrees = two_triangles.degree_distribution();
    let expected = BTreeMap::from([(0, 1.0 / 7.0), (2, 6.0 / 7.0)]);
    assert_eq!(degrees.as_map(), &expected);
    assert!((degrees.total() - 1.0).abs() < 1e-12);
}

#[rstest]
fn cluster_sizes_are_size_weighted(mut two_triangles: Graph) {
    let clusters = two_triangles.cluster_sizes();
    assert_eq!(clusters.get(3), Some(6.0 / 7.0));
    assert_eq!(clusters.get(1), Some(1.0 / 7.0));
    assert_eq!(clusters.len(), 2);
}

#[rstest]
fn cluster_sizes_is_idempotent_and_clears_flags(mut two_triangles: Graph) {
    assert!(two_triangles.nodes().iter().all(|node| !node.is_visited()));
    let first = two_triangles.cluster_sizes();
    assert!(two_triangles.nodes().iter().all(|node| !node.is_visited()));
    let second = two_triangles.cluster_sizes();
    assert_eq!(first, second);
    assert!(two_triangles.nodes().iter().all(|node| !node.is_visited()));
}

#[rstest]
fn components_are_discovered_in_index_order(mut two_triangles: Graph) {
    let components = two_triangles.components();
    let seeds: Vec<usize> = components
        .iter()
        .filter_map(|members| members.first().map(|id| id.index()))
        .collect();
    assert_eq!(seeds, vec![0, 3, 6]);
    let first: HashSet<usize> = components[0].iter().map(|id| id.index()).collect();
    assert_eq!(first, HashSet::from([0, 1, 2]));
}

#[test]
fn long_path_does_not_exhaust_the_stack() {
    let node_count = 200_000;
    let mut graph = Graph::new(node_count);
    for index in 1..node_count {
        connect(&mut graph, &[(index - 1, index)]);
    }
    let clusters = graph.cluster_sizes();
    assert_eq!(clusters.as_map(), &BTreeMap::from([(node_count, 1.0)]));
}

#[test]
fn empty_graph_has_empty_summaries() {
    let mut graph = Graph::new(0);
    assert!(graph.degree_distribution().is_empty());
    assert!(graph.cluster_sizes().is_empty());
}
