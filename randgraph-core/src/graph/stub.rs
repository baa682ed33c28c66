//! Half-edges and the arena that owns them.

use crate::error::{GraphError, Result};

use super::NodeId;

/// Handle to a stub stored in a [`StubArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StubId(usize);

impl StubId {
    /// Returns the arena slot backing this handle.
    #[rustfmt::skip]
    #[must_use]
    pub const fn index(self) -> usize { self.0 }
}

/// A half-edge owned by exactly one node.
///
/// A stub with no partner is dangling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stub {
    parent: NodeId,
    partner: Option<StubId>,
}

impl Stub {
    /// Returns the node that owns this stub.
    #[rustfmt::skip]
    #[must_use]
    pub const fn parent(&self) -> NodeId { self.parent }

    /// Returns the stub this one is paired with, if any.
    #[rustfmt::skip]
    #[must_use]
    pub const fn partner(&self) -> Option<StubId> { self.partner }

    /// Returns `true` when the stub has no partner.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_dangling(&self) -> bool { self.partner.is_none() }
}

/// Outcome of a successful [`StubArena::attach`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    /// Both partner links were written.
    Linked,
    /// The stubs share a parent and self-loops were tolerated, so nothing was
    /// written.
    SkippedSelfLoop,
}

/// Graph-wide storage for stubs.
///
/// Stubs are never freed individually. Removing a stub from a node's
/// sequence leaves its slot in place, so every [`StubId`] stays valid for the
/// lifetime of the graph.
#[derive(Debug, Clone, Default)]
pub struct StubArena {
    stubs: Vec<Stub>,
}

impl StubArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            stubs: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn allocate(&mut self, parent: NodeId) -> StubId {
        let id = StubId(self.stubs.len());
        self.stubs.push(Stub {
            parent,
            partner: None,
        });
        id
    }

    /// Returns the stub behind `id`.
    #[must_use]
    pub fn get(&self, id: StubId) -> Option<&Stub> {
        self.stubs.get(id.0)
    }

    /// Returns the node that owns the partner of `id`, when `id` is paired.
    #[must_use]
    pub fn partner_parent(&self, id: StubId) -> Option<NodeId> {
        let partner = self.get(id)?.partner?;
        self.get(partner).map(Stub::parent)
    }

    /// Number of stubs ever allocated, including ones no node lists any more.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stubs.len()
    }

    /// Returns `true` when no stub has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }

    /// Pairs stub `a` with stub `b`.
    ///
    /// When both stubs share a parent the call fails with
    /// [`GraphError::SelfLoop`] unless `allow_self_loops` is set, in which case
    /// it leaves both stubs dangling and reports [`Pairing::SkippedSelfLoop`].
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] for a forbidden self-pairing and
    /// [`GraphError::InvalidParameters`] when either handle is foreign to the
    /// arena.
    pub fn attach(&mut self, a: StubId, b: StubId, allow_self_loops: bool) -> Result<Pairing> {
        let parent_a = self.parent_of(a)?;
        let parent_b = self.parent_of(b)?;
        if parent_a == parent_b {
            if allow_self_loops {
                return Ok(Pairing::SkippedSelfLoop);
            }
            return Err(GraphError::SelfLoop {
                node: parent_a.index(),
            });
        }
        self.link(a, b);
        Ok(Pairing::Linked)
    }

    /// Writes both partner links without any parent check.
    pub(crate) fn link(&mut self, a: StubId, b: StubId) {
        if let Some(stub) = self.stubs.get_mut(a.0) {
            stub.partner = Some(b);
        }
        if let Some(stub) = self.stubs.get_mut(b.0) {
            stub.partner = Some(a);
        }
    }

    fn parent_of(&self, id: StubId) -> Result<NodeId> {
        self.get(id).map(Stub::parent).ok_or_else(|| {
            GraphError::invalid(format!(
                "stub {} is outside an arena of {} stubs",
                id.0,
                self.stubs.len()
            ))
        })
    }
}
