//! # Identity Registry
//!
//! Key → node lookup table. This is the authoritative existence check:
//! a key is registered iff its node is alive. Entries are plain `NodeId`s
//! and never own the node they point at.

use crate::NodeId;
use std::collections::BTreeMap;

/// Non-owning index from publication keys to arena slots.
#[derive(Debug, Clone)]
pub struct Registry<K: Ord> {
    entries: BTreeMap<K, NodeId>,
}

impl<K: Ord> Default for Registry<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord> Registry<K> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a key is registered.
    #[must_use]
    pub fn exists(&self, id: &K) -> bool {
        self.entries.contains_key(id)
    }

    /// Find the node registered under a key.
    #[must_use]
    pub fn find(&self, id: &K) -> Option<NodeId> {
        self.entries.get(id).copied()
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered keys in key order.
    pub fn ids(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Register a freshly constructed node.
    pub(crate) fn register(&mut self, id: K, node: NodeId) {
        self.entries.insert(id, node);
    }

    /// Deregister a collected node.
    ///
    /// Only removes the entry if it still points at `node`, so a stale
    /// deregistration can never evict a newer node reusing the key.
    pub(crate) fn deregister(&mut self, id: &K, node: NodeId) -> bool {
        if self.entries.get(id) == Some(&node) {
            self.entries.remove(id);
            true
        } else {
            false
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
