//! # Graph Configuration
//!
//! Optional limits applied by a [`CitationGraph`](crate::CitationGraph).
//!
//! Both limits default to unbounded. A limit that would be exceeded makes
//! the offending operation fail with `CitationError::CapacityExceeded`,
//! leaving the graph exactly as it was.
//!
//! ```toml
//! max_publications = 10000
//! max_citations_per_publication = 64
//! ```

use crate::CitationError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Limits for a citation graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Upper bound on live publications, root included.
    pub max_publications: Option<usize>,

    /// Upper bound on how many publications may cite a single publication.
    pub max_citations_per_publication: Option<usize>,
}

impl GraphConfig {
    /// Unbounded configuration.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_publications: None,
            max_citations_per_publication: None,
        }
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, CitationError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| CitationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CitationError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CitationError::IoError(e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    /// Reject limits that would make the graph unusable.
    ///
    /// The root always occupies one publication slot, so a zero
    /// `max_publications` could never be satisfied.
    pub fn validate(&self) -> Result<(), CitationError> {
        if self.max_publications == Some(0) {
            return Err(CitationError::InvalidConfig(
                "max_publications must be at least 1".to_string(),
            ));
        }
        if self.max_citations_per_publication == Some(0) {
            return Err(CitationError::InvalidConfig(
                "max_citations_per_publication must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
