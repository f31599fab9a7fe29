//! # citegraph-core
//!
//! An in-process citation graph: one permanent root publication plus an
//! evolving set of publications, each citing one or more earlier ones.
//!
//! ## Ownership Model
//!
//! Nodes live in an arena owned by the [`CitationGraph`]. A parent holds
//! "strong" edges to the publications citing it; a child holds "weak"
//! back-references to the publications it cites. A node stays alive while
//! the graph (for the root) or at least one live parent holds it, so
//! removing a publication collects every publication that loses its last
//! path from the root, and nothing that is still reachable.
//!
//! ## Architectural Constraints
//!
//! - Single-threaded, synchronous, no I/O outside configuration loading
//! - Deterministic: `BTreeMap`/`BTreeSet` only
//! - Every public operation either fully succeeds or changes nothing
//!
//! ## Example
//!
//! ```
//! use citegraph_core::{CitationGraph, Publication};
//!
//! struct Paper(u32);
//!
//! impl Publication for Paper {
//!     type Id = u32;
//!     fn from_id(id: u32) -> Self {
//!         Paper(id)
//!     }
//!     fn id(&self) -> u32 {
//!         self.0
//!     }
//! }
//!
//! let mut graph: CitationGraph<Paper> = CitationGraph::new(0);
//! graph.create_with_parent(1, &0)?;
//! graph.create_with_parent(2, &1)?;
//!
//! graph.remove(&1)?;
//! assert!(!graph.exists(&2));
//! # Ok::<(), citegraph_core::CitationError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod graph;
pub mod node;
pub mod registry;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use config::GraphConfig;
pub use graph::CitationGraph;
pub use node::Node;
pub use registry::Registry;
pub use types::{CitationError, NodeId, Publication};
