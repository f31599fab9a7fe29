//! # Citation Graph
//!
//! The arena-backed citation graph and its public operations.
//!
//! All nodes live in one `BTreeMap<NodeId, Node>` owned by the graph.
//! Edges are `NodeId` entries in per-node adjacency collections:
//! a parent lists its citing children (strong), a child lists the
//! publications it cites (weak).
//!
//! ## Lifetime
//!
//! The root is held by the graph itself and is never collected. Every
//! other node is alive exactly while at least one live parent lists it as
//! a child. `remove` detaches a node from its parents and runs
//! an orphan sweep, which deregisters the node and,
//! transitively, every descendant whose last parent went away.
//!
//! ## Atomicity
//!
//! Every public operation either fully succeeds or leaves the registry and
//! all nodes exactly as they were. Preconditions are validated before any
//! mutation; multi-step edge installation is undone on the first failure.

use crate::config::GraphConfig;
use crate::node::Node;
use crate::registry::Registry;
use crate::{CitationError, NodeId, Publication};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::{debug, trace, warn};

/// A citation graph rooted at one permanent publication.
#[derive(Debug, Clone)]
pub struct CitationGraph<P: Publication> {
    /// Node storage: NodeId -> Node
    nodes: BTreeMap<NodeId, Node<P>>,

    /// Key lookup: publication key -> NodeId
    registry: Registry<P::Id>,

    /// The permanent root. Compared by NodeId, never by key.
    root: NodeId,
    root_id: P::Id,

    /// Next available NodeId
    next_node_id: u64,

    config: GraphConfig,
}

impl<P: Publication> CitationGraph<P> {
    /// Create a graph holding only the root publication.
    #[must_use]
    pub fn new(root_id: P::Id) -> Self {
        Self::build(root_id, GraphConfig::unbounded())
    }

    /// Create a graph with the given limits.
    pub fn with_config(root_id: P::Id, config: GraphConfig) -> Result<Self, CitationError> {
        config.validate()?;
        Ok(Self::build(root_id, config))
    }

    fn build(root_id: P::Id, config: GraphConfig) -> Self {
        let mut graph = Self {
            nodes: BTreeMap::new(),
            registry: Registry::new(),
            root: NodeId(0),
            root_id: root_id.clone(),
            next_node_id: 0,
            config,
        };
        graph.root = graph.allocate(root_id);
        graph
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Key of the root publication.
    #[must_use]
    pub fn root_id(&self) -> P::Id {
        self.root_id.clone()
    }

    /// Check whether a publication is registered.
    #[must_use]
    pub fn exists(&self, id: &P::Id) -> bool {
        self.registry.exists(id)
    }

    /// Check whether `id` names the root node.
    #[must_use]
    pub fn is_root(&self, id: &P::Id) -> bool {
        self.registry.find(id) == Some(self.root)
    }

    /// Borrow a publication.
    pub fn lookup(&self, id: &P::Id) -> Result<&P, CitationError> {
        let node = self.resolve(id)?;
        Ok(self.node(node)?.publication())
    }

    /// Mutably borrow a publication.
    ///
    /// The key a node is registered under is fixed at creation; editing
    /// the payload never moves it in the registry.
    pub fn lookup_mut(&mut self, id: &P::Id) -> Result<&mut P, CitationError> {
        let node = self.resolve(id)?;
        Ok(self.node_mut(node)?.publication_mut())
    }

    /// Keys of the publications citing `id`, in key order.
    pub fn children_of(&self, id: &P::Id) -> Result<Vec<P::Id>, CitationError> {
        let node = self.node(self.resolve(id)?)?;
        let mut children: Vec<P::Id> = node
            .children()
            .filter_map(|child| self.nodes.get(&child))
            .map(|child| child.id().clone())
            .collect();
        children.sort();
        Ok(children)
    }

    /// Keys of the publications cited by `id`, in the order the citations
    /// were installed. Parents that are no longer alive are skipped.
    pub fn parents_of(&self, id: &P::Id) -> Result<Vec<P::Id>, CitationError> {
        let node = self.node(self.resolve(id)?)?;
        Ok(node
            .parents()
            .iter()
            .filter_map(|parent| self.nodes.get(parent))
            .map(|parent| parent.id().clone())
            .collect())
    }

    /// Number of live publications, root included.
    #[must_use]
    pub fn publication_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of live citation edges.
    #[must_use]
    pub fn citation_count(&self) -> usize {
        self.nodes.values().map(Node::child_count).sum()
    }

    /// Keys of all live publications, in key order.
    pub fn ids(&self) -> impl Iterator<Item = &P::Id> {
        self.registry.ids()
    }

    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Keys reachable from the root along citing edges, in key order.
    ///
    /// This is a full sweep of the graph. For a graph built without
    /// citation cycles it always equals `ids()`.
    #[must_use]
    pub fn reachable_ids(&self) -> Vec<P::Id> {
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();

        queue.push_back(self.root);
        visited.insert(self.root);

        while let Some(current) = queue.pop_front() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            for child in node.children() {
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }

        let mut ids: Vec<P::Id> = visited
            .iter()
            .filter_map(|node| self.nodes.get(node))
            .map(|node| node.id().clone())
            .collect();
        ids.sort();
        ids
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Record that `child_id` cites `parent_id`.
    ///
    /// Installing an edge that already exists is a no-op. The caller must
    /// not install an edge that closes a citation cycle.
    pub fn add_citation(
        &mut self,
        child_id: &P::Id,
        parent_id: &P::Id,
    ) -> Result<(), CitationError> {
        let child = self.resolve(child_id)?;
        let parent = self.resolve(parent_id)?;

        if self.link(child, parent)? {
            debug!(child = ?child_id, parent = ?parent_id, "citation added");
        }
        Ok(())
    }

    /// Create a publication citing every publication in `parent_ids`.
    ///
    /// Fails with `PublicationAlreadyCreated` if `id` is registered, and
    /// with `PublicationNotFound` if `parent_ids` is empty or names an
    /// unregistered publication. Duplicate parents are cited once.
    pub fn create(&mut self, id: P::Id, parent_ids: &[P::Id]) -> Result<(), CitationError> {
        if self.registry.exists(&id) {
            return Err(CitationError::PublicationAlreadyCreated);
        }
        if parent_ids.is_empty() {
            return Err(CitationError::PublicationNotFound);
        }
        let parents = parent_ids
            .iter()
            .map(|parent| self.resolve(parent))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(limit) = self.config.max_publications {
            if self.registry.len() >= limit {
                return Err(CitationError::CapacityExceeded { limit });
            }
        }

        let node = self.allocate(id.clone());
        for parent in parents {
            if let Err(err) = self.link(node, parent) {
                self.unwind_creation(node);
                warn!(id = ?id, error = %err, "create rolled back");
                return Err(err);
            }
        }

        debug!(id = ?id, parents = parent_ids.len(), "publication created");
        Ok(())
    }

    /// Create a publication citing a single parent.
    pub fn create_with_parent(
        &mut self,
        id: P::Id,
        parent_id: &P::Id,
    ) -> Result<(), CitationError> {
        self.create(id, std::slice::from_ref(parent_id))
    }

    /// Remove a publication together with every publication that is no
    /// longer reachable from the root without it.
    pub fn remove(&mut self, id: &P::Id) -> Result<(), CitationError> {
        let node = self.resolve(id)?;
        if node == self.root {
            return Err(CitationError::TriedToRemoveRoot);
        }

        self.detach_from_parents(node);
        let collected = self.collect_orphans(node);

        debug!(id = ?id, collected, "publication removed");
        Ok(())
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn resolve(&self, id: &P::Id) -> Result<NodeId, CitationError> {
        self.registry
            .find(id)
            .ok_or(CitationError::PublicationNotFound)
    }

    fn node(&self, node: NodeId) -> Result<&Node<P>, CitationError> {
        self.nodes
            .get(&node)
            .ok_or(CitationError::PublicationNotFound)
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut Node<P>, CitationError> {
        self.nodes
            .get_mut(&node)
            .ok_or(CitationError::PublicationNotFound)
    }

    /// Construct a node and register it in one step.
    fn allocate(&mut self, id: P::Id) -> NodeId {
        let node_id = NodeId(self.next_node_id);
        self.next_node_id = self.next_node_id.saturating_add(1);

        self.nodes.insert(node_id, Node::new(id.clone()));
        self.registry.register(id, node_id);
        node_id
    }

    /// Install the edge `child` cites `parent`.
    ///
    /// Returns `false` if the edge already existed. The weak back-reference
    /// goes in first; if the strong edge cannot be installed the
    /// back-reference is popped again before the error is returned.
    fn link(&mut self, child: NodeId, parent: NodeId) -> Result<bool, CitationError> {
        if self.node(parent)?.has_child(child) {
            return Ok(false);
        }

        self.node_mut(child)?.add_parent(parent)?;

        let limit = self.config.max_citations_per_publication;
        if let Err(err) = self.node_mut(parent).and_then(|p| p.add_child(child, limit)) {
            if let Some(node) = self.nodes.get_mut(&child) {
                node.remove_last_parent();
            }
            return Err(err);
        }
        Ok(true)
    }

    /// Erase every trace of a node whose creation failed part-way.
    ///
    /// The node cannot have children yet, so only its parents' child sets
    /// need undoing.
    fn unwind_creation(&mut self, node_id: NodeId) {
        self.detach_from_parents(node_id);
        if let Some(node) = self.nodes.remove(&node_id) {
            self.registry.deregister(node.id(), node_id);
        }
        self.next_node_id = node_id.0;
    }

    /// Erase `node_id` from the child set of every live parent.
    ///
    /// The node is left parentless, which drops the last strong reference
    /// to it unless it is the root.
    fn detach_from_parents(&mut self, node_id: NodeId) {
        let parents = match self.nodes.get_mut(&node_id) {
            Some(node) => node.take_parents(),
            None => return,
        };
        for parent in parents {
            if let Some(parent) = self.nodes.get_mut(&parent) {
                parent.remove_child(node_id);
            }
        }
    }

    /// Collect `start` and every descendant left without a live parent.
    ///
    /// Each collected node is deregistered exactly once and withdrawn from
    /// the parent lists of its children; a child whose list becomes empty
    /// is collected next. Work is proportional to the collected subgraph.
    /// Returns the number of nodes collected.
    pub(crate) fn collect_orphans(&mut self, start: NodeId) -> usize {
        let mut worklist = vec![start];
        let mut collected = 0usize;

        while let Some(current) = worklist.pop() {
            if current == self.root {
                continue;
            }
            let Some(node) = self.nodes.remove(&current) else {
                continue;
            };
            self.registry.deregister(node.id(), current);
            collected = collected.saturating_add(1);
            trace!(id = ?node.id(), "publication collected");

            for child in node.children() {
                if let Some(child_node) = self.nodes.get_mut(&child) {
                    child_node.remove_parent(current);
                    if !child_node.has_parents() {
                        worklist.push(child);
                    }
                }
            }
        }

        collected
    }
}

// =============================================================================
// TESTS
// =============================================================================
