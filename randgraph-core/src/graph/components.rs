//! Degree counting and connected-component discovery.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::distribution::{ClusterSizeDistribution, DegreeDistribution};

use super::{Graph, NodeId};

impl Graph {
    /// Fraction of nodes per stub count.
    ///
    /// Every node contributes its full stub sequence, so a dangling stub left
    /// by odd parity still counts towards its owner's degree.
    #[must_use]
    pub fn degree_distribution(&self) -> DegreeDistribution {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts.entry(node.stub_count()).or_insert(0_usize) += 1;
        }
        DegreeDistribution::from_node_counts(counts, self.node_count())
    }

    /// Size-weighted distribution of connected-component sizes.
    ///
    /// Takes `&mut self` because traversal marks nodes through their visited
    /// flags; every flag is false again when the call returns.
    #[instrument(name = "core.cluster_sizes", skip(self), fields(nodes = self.node_count()))]
    pub fn cluster_sizes(&mut self) -> ClusterSizeDistribution {
        let mut weights = BTreeMap::new();
        let components = self.components();
        for component in &components {
            let size = component.len();
            *weights.entry(size).or_insert(0_usize) += size;
        }
        debug!(clusters = components.len(), "clusters computed");
        ClusterSizeDistribution::from_node_counts(weights, self.node_count())
    }

    /// Connected components as member lists.
    ///
    /// Components are discovered from unvisited seeds in node-index order and
    /// each list records members in the order the depth-first search pops
    /// them, starting with the seed. The search uses an explicit stack, so
    /// component size is not bounded by the call stack.
    pub fn components(&mut self) -> Vec<Vec<NodeId>> {
        let mut components = Vec::new();
        let mut stack = Vec::new();
        for seed in 0..self.nodes.len() {
            if self.is_visited(seed) {
                continue;
            }
            let mut members = Vec::new();
            self.mark_visited(seed);
            stack.push(seed);
            while let Some(current) = stack.pop() {
                members.push(NodeId::new(current));
                let Some(node) = self.nodes.get(current) else {
                    continue;
                };
                // Reverse so the first listed neighbour is explored first.
                let neighbours: Vec<usize> = node
                    .neighbours(&self.arena)
                    .map(NodeId::index)
                    .collect();
                for next in neighbours.into_iter().rev() {
                    if !self.is_visited(next) {
                        self.mark_visited(next);
                        stack.push(next);
                    }
                }
            }
            components.push(members);
        }
        for node in &mut self.nodes {
            node.set_visited(false);
        }
        components
    }

    fn is_visited(&self, index: usize) -> bool {
        self.nodes.get(index).is_some_and(super::Node::is_visited)
    }

    fn mark_visited(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.set_visited(true);
        }
    }
}
