//! # Core Type Definitions
//!
//! This module contains the core types for the citation graph:
//! - Internal node identifiers (`NodeId`)
//! - The payload contract (`Publication`)
//! - Error types (`CitationError`)

use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;
use std::fmt::Debug;
use thiserror::Error;

// =============================================================================
// NODE IDENTIFIER
// =============================================================================

/// Internal identifier for a node slot in the graph arena.
///
/// NodeIds are allocated monotonically and never reused, so a publication
/// recreated under a previously removed key is a distinct node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

// =============================================================================
// PUBLICATION CONTRACT
// =============================================================================

/// The payload stored in every node of a citation graph.
///
/// The graph never accepts a pre-built payload: it builds one from the
/// identity key via [`Publication::from_id`] when a node is created.
pub trait Publication {
    /// Stable identity key. Keys are totally ordered so that citing lists
    /// come back in a deterministic order.
    type Id: Ord + Clone + Debug;

    /// Build a publication from its identity key alone.
    fn from_id(id: Self::Id) -> Self;

    /// Identity key of this publication. Must be pure.
    fn id(&self) -> Self::Id;
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the citation graph.
///
/// - No silent failures
/// - Every failing operation leaves the graph exactly as it was before the call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CitationError {
    /// `create` was called with a key that is already registered.
    #[error("Publication already created")]
    PublicationAlreadyCreated,

    /// An operation referenced a key that is not registered, or `create`
    /// was given an empty parent list.
    #[error("Publication not found")]
    PublicationNotFound,

    /// `remove` targeted the root publication.
    #[error("Tried to remove the root publication")]
    TriedToRemoveRoot,

    /// Storage for a new edge could not be reserved.
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// A configured graph limit would be exceeded.
    #[error("Capacity exceeded: limit is {limit}")]
    CapacityExceeded { limit: usize },

    /// The graph configuration is malformed or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred while loading configuration.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<TryReserveError> for CitationError {
    fn from(err: TryReserveError) -> Self {
        Self::ResourceExhausted(err.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
