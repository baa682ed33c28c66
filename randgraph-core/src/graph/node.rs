//! Nodes, their stub sequences and neighbour de-duplication.

use std::collections::HashSet;

use crate::error::{GraphError, Result};

use super::stub::{StubArena, StubId};

/// Index of a node within its graph, in `[0, node_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a raw node index.
    ///
    /// # Examples
    /// ```
    /// use randgraph_core::NodeId;
    ///
    /// assert_eq!(NodeId::new(3).index(), 3);
    /// ```
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the raw node index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn index(self) -> usize { self.0 }
}

/// How [`Node::check_neighbours`] treats a neighbour reached twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// A repeated neighbour is an invariant violation.
    Reject,
    /// Stubs leading to an already-seen neighbour are dropped.
    Collapse,
}

/// A vertex owning an ordered sequence of stubs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    stubs: Vec<StubId>,
    visited: bool,
}

impl Node {
    pub(crate) fn new(id: NodeId, stubs: Vec<StubId>) -> Self {
        Self {
            id,
            stubs,
            visited: false,
        }
    }

    /// Returns this node's index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn id(&self) -> NodeId { self.id }

    /// Returns the stubs owned by this node, in creation order.
    #[must_use]
    pub fn stubs(&self) -> &[StubId] {
        &self.stubs
    }

    /// Number of stubs the node owns, which is also its degree.
    #[must_use]
    pub fn stub_count(&self) -> usize {
        self.stubs.len()
    }

    /// Returns the traversal flag. It is only ever set while a component
    /// search is running.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_visited(&self) -> bool { self.visited }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub(crate) fn push_stub(&mut self, stub: StubId) {
        self.stubs.push(stub);
    }

    /// Yields the parent node of every paired partner stub in stub order.
    /// Dangling stubs contribute nothing.
    pub fn neighbours<'a>(&'a self, arena: &'a StubArena) -> impl Iterator<Item = NodeId> + 'a {
        self.stubs
            .iter()
            .filter_map(move |&stub| arena.partner_parent(stub))
    }

    /// Scans the neighbour sequence for repeats.
    ///
    /// Returns how many stubs were removed, which is always zero under
    /// [`DuplicatePolicy::Reject`].
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateNeighbour`] when `policy` is
    /// [`DuplicatePolicy::Reject`] and a neighbour appears twice.
    pub fn check_neighbours(&mut self, arena: &StubArena, policy: DuplicatePolicy) -> Result<usize> {
        let mut seen = HashSet::with_capacity(self.stubs.len());
        match policy {
            DuplicatePolicy::Reject => {
                for neighbour in self.neighbours(arena) {
                    if !seen.insert(neighbour) {
                        return Err(GraphError::DuplicateNeighbour {
                            node: self.id.index(),
                            neighbour: neighbour.index(),
                        });
                    }
                }
                Ok(0)
            }
            DuplicatePolicy::Collapse => {
                let before = self.stubs.len();
                self.stubs.retain(|&stub| {
                    arena
                        .partner_parent(stub)
                        .is_none_or(|neighbour| seen.insert(neighbour))
                });
                Ok(before - self.stubs.len())
            }
        }
    }

    /// Drops every listed stub contained in `doomed`, returning how many went.
    pub(crate) fn remove_stubs(&mut self, doomed: &HashSet<StubId>) -> usize {
        let before = self.stubs.len();
        self.stubs.retain(|stub| !doomed.contains(stub));
        before - self.stubs.len()
    }
}
