//! # Node
//!
//! One publication in the arena, with its two adjacency views.
//!
//! - `children`: publications citing this one. These are the "strong"
//!   edges: a node stays alive while at least one live parent lists it.
//! - `parents`: publications this one cites. These are "weak"
//!   back-references used for traversal and rollback, never for lifetime.
//!
//! Nodes never touch each other directly. Cross-node bookkeeping
//! (detaching, cascading collection) is driven by the graph, which owns
//! the arena.

use crate::{CitationError, NodeId, Publication};
use std::collections::BTreeSet;

/// A publication together with its citation edges.
#[derive(Debug, Clone)]
pub struct Node<P: Publication> {
    /// Key the node is registered under. Kept separately from the payload
    /// so deregistration does not depend on payload mutation.
    id: P::Id,
    /// The owned payload.
    publication: P,
    /// Strong edges: nodes citing this one. At most one entry per child.
    children: BTreeSet<NodeId>,
    /// Weak edges: nodes this one cites, in insertion order.
    parents: Vec<NodeId>,
}

impl<P: Publication> Node<P> {
    /// Build a parentless, childless node from its key.
    #[must_use]
    pub fn new(id: P::Id) -> Self {
        let publication = P::from_id(id.clone());
        Self {
            id,
            publication,
            children: BTreeSet::new(),
            parents: Vec::new(),
        }
    }

    /// The key this node is registered under.
    #[must_use]
    pub fn id(&self) -> &P::Id {
        &self.id
    }

    #[must_use]
    pub fn publication(&self) -> &P {
        &self.publication
    }

    pub fn publication_mut(&mut self) -> &mut P {
        &mut self.publication
    }

    /// Child node ids in `NodeId` order.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().copied()
    }

    /// Parent node ids in insertion order.
    #[must_use]
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    #[must_use]
    pub fn has_child(&self, child: NodeId) -> bool {
        self.children.contains(&child)
    }

    #[must_use]
    pub fn has_parents(&self) -> bool {
        !self.parents.is_empty()
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Install a strong edge to `child`.
    ///
    /// Callers check for an existing edge first. Fails without touching
    /// the node when `limit` children are already present.
    pub(crate) fn add_child(
        &mut self,
        child: NodeId,
        limit: Option<usize>,
    ) -> Result<(), CitationError> {
        match limit {
            Some(limit) if self.children.len() >= limit => {
                return Err(CitationError::CapacityExceeded { limit });
            }
            _ => {}
        }
        self.children.insert(child);
        Ok(())
    }

    /// Erase the strong edge to `child`, if any.
    pub(crate) fn remove_child(&mut self, child: NodeId) -> bool {
        self.children.remove(&child)
    }

    /// Append a weak back-reference to `parent`.
    ///
    /// Storage is reserved fallibly, so an allocation failure is reported
    /// instead of aborting and the sequence is left unchanged.
    pub(crate) fn add_parent(&mut self, parent: NodeId) -> Result<(), CitationError> {
        self.parents.try_reserve(1)?;
        self.parents.push(parent);
        Ok(())
    }

    /// Undo the most recent `add_parent`. No-op on an empty sequence.
    pub(crate) fn remove_last_parent(&mut self) -> Option<NodeId> {
        self.parents.pop()
    }

    /// Drop every back-reference to `parent`.
    pub(crate) fn remove_parent(&mut self, parent: NodeId) {
        self.parents.retain(|&p| p != parent);
    }

    /// Take the whole parent sequence, leaving the node parentless.
    pub(crate) fn take_parents(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.parents)
    }
}

// =============================================================================
// TESTS
// =============================================================================
