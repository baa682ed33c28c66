use std::collections::HashSet;

use randgraph_core::{Generator, GeneratorBuilder, Graph};

#[must_use]
pub fn generator(nodes: usize, seed: u64) -> Generator {
    GeneratorBuilder::new()
        .with_node_count(nodes)
        .with_rng_seed(seed)
        .build()
        .expect("test configuration is valid")
}

pub fn assert_simple(graph: &Graph) {
    for node in graph.nodes() {
        let neighbours = graph.neighbours(node.id()).expect("node exists");
        let unique: HashSet<_> = neighbours.iter().copied().collect();
        assert_eq!(unique.len(), neighbours.len(), "{:?} repeats", node.id());
        assert!(!unique.contains(&node.id()), "{:?} loops", node.id());
    }
}
