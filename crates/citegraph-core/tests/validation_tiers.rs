//! # Validation Tier Tests (T0-T3)
//!
//! End-to-end scenarios through the public graph surface.
//!
//! ## Tiers
//! - T0: Registry Integrity
//! - T1: Citation Edges
//! - T2: Cascading Collection
//! - T3: Atomic Failure

use citegraph_core::{CitationError, CitationGraph, GraphConfig, Publication};

#[derive(Debug, Clone)]
struct Paper(u64);

impl Publication for Paper {
    type Id = u64;

    fn from_id(id: u64) -> Self {
        Self(id)
    }

    fn id(&self) -> u64 {
        self.0
    }
}

const ROOT: u64 = 0;

fn graph() -> CitationGraph<Paper> {
    CitationGraph::new(ROOT)
}

/// Snapshot of everything observable about a graph.
fn snapshot(graph: &CitationGraph<Paper>) -> Vec<(u64, Vec<u64>, Vec<u64>)> {
    graph
        .ids()
        .map(|&id| {
            (
                id,
                graph.children_of(&id).expect("children"),
                graph.parents_of(&id).expect("parents"),
            )
        })
        .collect()
}

// =============================================================================
// TIER T0: REGISTRY INTEGRITY
// =============================================================================

mod t0_registry_integrity {
    use super::*;

    /// T0.1: The root exists from construction.
    #[test]
    fn root_exists() {
        let graph = graph();
        assert_eq!(graph.root_id(), ROOT);
        assert!(graph.exists(&ROOT));
        assert_eq!(graph.lookup(&ROOT).expect("lookup").id(), ROOT);
    }

    /// T0.2: Unknown ids are absent, never an error.
    #[test]
    fn unknown_id_absent() {
        let graph = graph();
        assert!(!graph.exists(&42));
    }

    /// T0.3: Every query on an unknown id reports PublicationNotFound.
    #[test]
    fn queries_on_unknown_id_fail() {
        let graph = graph();

        assert!(matches!(
            graph.lookup(&42),
            Err(CitationError::PublicationNotFound)
        ));
        assert_eq!(
            graph.children_of(&42),
            Err(CitationError::PublicationNotFound)
        );
        assert_eq!(
            graph.parents_of(&42),
            Err(CitationError::PublicationNotFound)
        );
    }

    /// T0.4: Every mutation on an unknown id fails and changes nothing.
    #[test]
    fn mutations_on_unknown_id_change_nothing() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");
        let before = snapshot(&graph);

        assert_eq!(
            graph.add_citation(&42, &1),
            Err(CitationError::PublicationNotFound)
        );
        assert_eq!(
            graph.add_citation(&1, &42),
            Err(CitationError::PublicationNotFound)
        );
        assert_eq!(
            graph.create_with_parent(2, &42),
            Err(CitationError::PublicationNotFound)
        );
        assert_eq!(graph.remove(&42), Err(CitationError::PublicationNotFound));

        assert_eq!(snapshot(&graph), before);
    }

    /// T0.5: The graph is a movable value.
    #[test]
    fn graph_moves_with_its_state() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");

        let moved = graph;
        assert!(moved.exists(&1));
        assert_eq!(moved.children_of(&ROOT).expect("children"), vec![1]);
    }
}

// =============================================================================
// TIER T1: CITATION EDGES
// =============================================================================

mod t1_citation_edges {
    use super::*;

    /// T1.1: create installs both adjacency views.
    #[test]
    fn create_installs_edge() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");

        assert!(graph.exists(&1));
        assert!(graph.children_of(&ROOT).expect("children").contains(&1));
        assert!(graph.parents_of(&1).expect("parents").contains(&ROOT));
    }

    /// T1.2: Repeated add_citation keeps a single edge.
    #[test]
    fn add_citation_twice_single_edge() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");
        graph.create_with_parent(2, &ROOT).expect("create");

        graph.add_citation(&2, &1).expect("cite");
        graph.add_citation(&2, &1).expect("cite");

        let children = graph.children_of(&1).expect("children");
        assert_eq!(children.iter().filter(|&&c| c == 2).count(), 1);
        assert_eq!(graph.citation_count(), 3);
    }

    /// T1.3: Multi-parent create cites every parent.
    #[test]
    fn create_with_many_parents() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");
        graph.create_with_parent(2, &ROOT).expect("create");
        graph.create(3, &[2, 1]).expect("create");

        assert_eq!(graph.parents_of(&3).expect("parents"), vec![2, 1]);
        assert_eq!(graph.children_of(&1).expect("children"), vec![3]);
        assert_eq!(graph.children_of(&2).expect("children"), vec![3]);
    }

    /// T1.4: Creating an existing publication fails.
    #[test]
    fn duplicate_create_fails() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");

        assert_eq!(
            graph.create_with_parent(1, &ROOT),
            Err(CitationError::PublicationAlreadyCreated)
        );
        assert_eq!(
            graph.create_with_parent(ROOT, &1),
            Err(CitationError::PublicationAlreadyCreated)
        );
    }

    /// T1.5: Empty parent list is rejected.
    #[test]
    fn empty_parent_list_fails() {
        let mut graph = graph();
        assert_eq!(graph.create(1, &[]), Err(CitationError::PublicationNotFound));
        assert!(!graph.exists(&1));
    }
}

// =============================================================================
// TIER T2: CASCADING COLLECTION
// =============================================================================

mod t2_cascading_collection {
    use super::*;

    /// T2.1: Removing a link in a chain collects everything below it.
    #[test]
    fn chain_collection() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");
        graph.create_with_parent(2, &1).expect("create");

        graph.remove(&1).expect("remove");

        assert!(!graph.exists(&1));
        assert!(!graph.exists(&2));
        assert!(graph.exists(&ROOT));
    }

    /// T2.2: A publication reachable through another parent survives.
    #[test]
    fn shared_survival() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");
        graph.create_with_parent(2, &ROOT).expect("create");
        graph.create(3, &[1, 2]).expect("create");

        graph.remove(&1).expect("remove");

        assert!(graph.exists(&3));
        assert!(graph.children_of(&2).expect("children").contains(&3));
        assert!(!graph.parents_of(&3).expect("parents").contains(&1));
    }

    /// T2.3: Diamond below a removed ancestor is fully collected.
    #[test]
    fn diamond_collection() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");
        graph.create_with_parent(2, &1).expect("create");
        graph.create_with_parent(3, &1).expect("create");
        graph.create(4, &[2, 3]).expect("create");
        graph.create_with_parent(5, &ROOT).expect("create");

        graph.remove(&1).expect("remove");

        assert_eq!(graph.ids().copied().collect::<Vec<_>>(), vec![ROOT, 5]);
        assert_eq!(graph.citation_count(), 1);
    }

    /// T2.4: A deep descendant with a side path to the root survives,
    /// and so does everything below it.
    #[test]
    fn deep_side_path_survival() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");
        graph.create_with_parent(2, &1).expect("create");
        graph.create_with_parent(3, &2).expect("create");
        graph.create_with_parent(4, &3).expect("create");
        graph.add_citation(&3, &ROOT).expect("cite");

        graph.remove(&1).expect("remove");

        assert!(!graph.exists(&1));
        assert!(!graph.exists(&2));
        assert!(graph.exists(&3));
        assert!(graph.exists(&4));
        assert_eq!(graph.parents_of(&3).expect("parents"), vec![ROOT]);
    }

    /// T2.5: The root can never be removed.
    #[test]
    fn root_is_permanent() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");

        assert_eq!(graph.remove(&ROOT), Err(CitationError::TriedToRemoveRoot));
        assert!(graph.exists(&ROOT));
        assert!(graph.exists(&1));
    }

    /// T2.6: A removed key can be created again as a new publication.
    #[test]
    fn key_reuse_after_removal() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");
        graph.create_with_parent(2, &1).expect("create");
        graph.remove(&1).expect("remove");

        graph.create_with_parent(2, &ROOT).expect("create");
        graph.create_with_parent(1, &2).expect("create");

        assert_eq!(graph.parents_of(&1).expect("parents"), vec![2]);
        assert_eq!(graph.children_of(&2).expect("children"), vec![1]);
    }
}

// =============================================================================
// TIER T3: ATOMIC FAILURE
// =============================================================================

mod t3_atomic_failure {
    use super::*;

    /// T3.1: A partially invalid parent list leaves the graph untouched.
    #[test]
    fn partially_invalid_parents() {
        let mut graph = graph();
        graph.create_with_parent(1, &ROOT).expect("create");
        let before = snapshot(&graph);

        assert_eq!(
            graph.create(2, &[1, 99]),
            Err(CitationError::PublicationNotFound)
        );
        assert!(!graph.exists(&2));
        assert_eq!(snapshot(&graph), before);
    }

    /// T3.2: A citation limit hit mid-create unwinds every installed edge.
    #[test]
    fn create_unwinds_on_limit() {
        let config = GraphConfig::from_toml_str("max_citations_per_publication = 2")
            .expect("config");
        let mut graph: CitationGraph<Paper> =
            CitationGraph::with_config(ROOT, config).expect("graph");
        graph.create_with_parent(1, &ROOT).expect("create");
        graph.create_with_parent(2, &ROOT).expect("create");
        graph.create_with_parent(3, &1).expect("create");
        graph.create_with_parent(4, &1).expect("create");
        let before = snapshot(&graph);

        let result = graph.create(5, &[2, 3, 1]);
        assert_eq!(result, Err(CitationError::CapacityExceeded { limit: 2 }));
        assert_eq!(snapshot(&graph), before);

        // A later create under the same key still works.
        graph.create(5, &[2, 3]).expect("create");
        assert_eq!(graph.parents_of(&5).expect("parents"), vec![2, 3]);
    }

    /// T3.3: A citation limit hit in add_citation leaves no dangling parent.
    #[test]
    fn add_citation_rolls_back_on_limit() {
        let config = GraphConfig::from_toml_str("max_citations_per_publication = 1")
            .expect("config");
        let mut graph: CitationGraph<Paper> =
            CitationGraph::with_config(ROOT, config).expect("graph");
        graph.create_with_parent(1, &ROOT).expect("create");
        graph.create_with_parent(2, &1).expect("create");
        let before = snapshot(&graph);

        assert_eq!(
            graph.add_citation(&2, &ROOT),
            Err(CitationError::CapacityExceeded { limit: 1 })
        );
        assert_eq!(snapshot(&graph), before);
    }

    /// T3.4: The publication limit rejects create before any mutation.
    #[test]
    fn publication_limit() {
        let config = GraphConfig::from_toml_str("max_publications = 3").expect("config");
        let mut graph: CitationGraph<Paper> =
            CitationGraph::with_config(ROOT, config).expect("graph");
        graph.create_with_parent(1, &ROOT).expect("create");
        graph.create_with_parent(2, &ROOT).expect("create");
        let before = snapshot(&graph);

        assert_eq!(
            graph.create_with_parent(3, &ROOT),
            Err(CitationError::CapacityExceeded { limit: 3 })
        );
        assert_eq!(snapshot(&graph), before);
    }
}
