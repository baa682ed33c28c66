//! Arena-backed undirected multigraph built from paired stubs.
//!
//! Nodes own ordered sequences of [`StubId`] handles; the stubs themselves
//! live in a graph-wide [`StubArena`]. Edges exist only as symmetric partner
//! links between two stubs, so the structure never holds owning cycles.

mod components;
mod node;
mod stub;

use std::collections::HashSet;

use rand::{Rng, distributions::Distribution};

use crate::{
    error::{GraphError, Result},
    sampling::{SamplingLimits, draw_count},
};

pub use self::{
    node::{DuplicatePolicy, Node, NodeId},
    stub::{Pairing, Stub, StubArena, StubId},
};

/// A fixed-size collection of nodes and the stubs wiring them together.
///
/// # Examples
/// ```
/// use randgraph_core::{Graph, NodeId};
///
/// let mut graph = Graph::new(3);
/// graph.attach(NodeId::new(0), NodeId::new(1))?;
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.degree(NodeId::new(2)), Some(0));
/// # Ok::<(), randgraph_core::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    arena: StubArena,
}

impl Graph {
    /// Creates `node_count` nodes without any stubs.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        let nodes = (0..node_count)
            .map(|index| Node::new(NodeId::new(index), Vec::new()))
            .collect();
        Self {
            nodes,
            arena: StubArena::default(),
        }
    }

    /// Creates `node_count` nodes, each owning an independent draw from
    /// `stubs` worth of unpaired stubs.
    ///
    /// # Errors
    /// Returns [`GraphError::StubCountRejected`] when a node keeps drawing
    /// counts above [`crate::STUB_COUNT_LIMIT`].
    pub fn with_stub_counts<D, R>(
        node_count: usize,
        stubs: &D,
        rng: &mut R,
        limits: SamplingLimits,
    ) -> Result<Self>
    where
        D: Distribution<usize> + ?Sized,
        R: Rng + ?Sized,
    {
        let counts = (0..node_count)
            .map(|node| draw_count(stubs, rng, node, limits))
            .collect::<Result<Vec<_>>>()?;
        let mut arena = StubArena::with_capacity(counts.iter().sum());
        let nodes = counts
            .into_iter()
            .enumerate()
            .map(|(index, count)| {
                let id = NodeId::new(index);
                let owned = (0..count).map(|_| arena.allocate(id)).collect();
                Node::new(id, owned)
            })
            .collect();
        Ok(Self { nodes, arena })
    }

    /// Number of nodes, fixed at construction.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the node behind `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Returns every node in index order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the arena holding every stub of the graph.
    #[must_use]
    pub fn stubs(&self) -> &StubArena {
        &self.arena
    }

    /// Returns the neighbours of `id` in stub order, or `None` for an unknown
    /// node.
    #[must_use]
    pub fn neighbours(&self, id: NodeId) -> Option<Vec<NodeId>> {
        self.node(id)
            .map(|node| node.neighbours(&self.arena).collect())
    }

    /// Returns the stub count of `id`, or `None` for an unknown node.
    #[must_use]
    pub fn degree(&self, id: NodeId) -> Option<usize> {
        self.node(id).map(Node::stub_count)
    }

    /// Sum of every node's stub count.
    #[must_use]
    pub fn total_degree(&self) -> usize {
        self.nodes.iter().map(Node::stub_count).sum()
    }

    /// Number of listed stubs without a partner.
    #[must_use]
    pub fn dangling_stub_count(&self) -> usize {
        self.listed_stubs()
            .filter(|&stub| self.arena.get(stub).is_some_and(Stub::is_dangling))
            .count()
    }

    /// Number of realised edges: half the paired stubs the nodes list.
    ///
    /// Once duplicates are collapsed both endpoints list an adjacency exactly
    /// once, so multi-edges count a single time.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        (self.total_degree() - self.dangling_stub_count()) / 2
    }

    /// Creates a fresh stub on each of `a` and `b` and pairs them.
    ///
    /// There is no self-loop or duplicate-edge guard; callers avoid both or
    /// clean up with [`Self::check_neighbours`].
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] when either node is unknown.
    pub fn attach(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        self.ensure_node(a)?;
        self.ensure_node(b)?;
        let stub_a = self.arena.allocate(a);
        let stub_b = self.arena.allocate(b);
        self.arena.link(stub_a, stub_b);
        self.push_stub(a, stub_a);
        self.push_stub(b, stub_b);
        Ok(())
    }

    /// Pairs two existing stubs, see [`StubArena::attach`].
    ///
    /// # Errors
    /// Propagates [`GraphError::SelfLoop`] and handle validation failures.
    pub fn attach_stubs(&mut self, a: StubId, b: StubId, allow_self_loops: bool) -> Result<Pairing> {
        self.arena.attach(a, b, allow_self_loops)
    }

    /// Runs [`Node::check_neighbours`] on a single node.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateNeighbour`] under
    /// [`DuplicatePolicy::Reject`] and [`GraphError::InvalidParameters`] for an
    /// unknown node.
    pub fn check_neighbours(&mut self, id: NodeId, policy: DuplicatePolicy) -> Result<usize> {
        let node_count = self.nodes.len();
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or_else(|| unknown_node(id, node_count))?;
        node.check_neighbours(&self.arena, policy)
    }

    /// Runs [`Node::check_neighbours`] on every node in index order, returning
    /// the total number of removed stubs.
    ///
    /// # Errors
    /// Returns the first [`GraphError::DuplicateNeighbour`] under
    /// [`DuplicatePolicy::Reject`].
    pub fn check_all_neighbours(&mut self, policy: DuplicatePolicy) -> Result<usize> {
        let arena = &self.arena;
        self.nodes.iter_mut().try_fold(0, |removed, node| {
            Ok(removed + node.check_neighbours(arena, policy)?)
        })
    }

    /// Every listed stub, in node order then stub order.
    pub(crate) fn listed_stubs(&self) -> impl Iterator<Item = StubId> + '_ {
        self.nodes.iter().flat_map(|node| node.stubs().iter().copied())
    }

    /// Removes the given stubs from whichever nodes list them.
    pub(crate) fn erase_stubs(&mut self, doomed: &HashSet<StubId>) -> usize {
        if doomed.is_empty() {
            return 0;
        }
        self.nodes
            .iter_mut()
            .map(|node| node.remove_stubs(doomed))
            .sum()
    }

    fn push_stub(&mut self, id: NodeId, stub: StubId) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.push_stub(stub);
        }
    }

    fn ensure_node(&self, id: NodeId) -> Result<()> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(unknown_node(id, self.nodes.len()))
        }
    }
}

fn unknown_node(id: NodeId, node_count: usize) -> GraphError {
    GraphError::invalid(format!(
        "node {} is outside a graph of {node_count} nodes",
        id.index()
    ))
}

#[cfg(test)]
mod tests;
