//! Store configuration
//!
//! Defaults are conservative: indexed search, permissive construction. The
//! box index is a pre-filter only; every strategy returns the same answers.

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use crate::boxtree::BoxTreeConfig;

/// How intersecting entries are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Box index candidates, filtered exactly
    #[default]
    Indexed,
    /// Scan every entry
    Linear,
    /// Run both and assert they agree
    Verified,
}

/// How initial data is checked on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Trust the caller that initial data is disjoint
    #[default]
    Permissive,
    /// Check pairwise disjointness and reject overlaps
    Strict,
}

/// Configuration for a `DataStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub search: SearchStrategy,
    pub validation: Validation,
    pub box_tree: BoxTreeConfig,
}

impl StoreConfig {
    /// Indexed search (the default)
    pub fn indexed() -> Self {
        Self::default()
    }

    /// Linear scans only
    pub fn linear() -> Self {
        Self {
            search: SearchStrategy::Linear,
            ..Self::default()
        }
    }

    /// Both strategies, cross-checked on every search
    pub fn verified() -> Self {
        Self {
            search: SearchStrategy::Verified,
            ..Self::default()
        }
    }

    /// Reject overlapping initial data
    pub fn strict(self) -> Self {
        Self {
            validation: Validation::Strict,
            ..self
        }
    }

    /// Parses a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        serde_json::from_str(json).map_err(|e| StoreError::InvalidConfig(e.to_string()))
    }

    /// Returns true if searches consult the box index
    pub fn uses_index(&self) -> bool {
        self.search != SearchStrategy::Linear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_indexed_permissive() {
        let config = StoreConfig::default();
        assert_eq!(config.search, SearchStrategy::Indexed);
        assert_eq!(config.validation, Validation::Permissive);
        assert!(config.uses_index());
    }

    #[test]
    fn test_named_constructors() {
        assert!(!StoreConfig::linear().uses_index());
        assert_eq!(StoreConfig::verified().search, SearchStrategy::Verified);
        let strict = StoreConfig::linear().strict();
        assert_eq!(strict.search, SearchStrategy::Linear);
        assert_eq!(strict.validation, Validation::Strict);
    }

    #[test]
    fn test_from_json_partial() {
        let config = StoreConfig::from_json(r#"{"search":"verified","box_tree":{"capacity":4}}"#).unwrap();
        assert_eq!(config.search, SearchStrategy::Verified);
        assert_eq!(config.validation, Validation::Permissive);
        assert_eq!(config.box_tree.capacity, 4);
        assert_eq!(config.box_tree.max_depth, 24);
    }

    #[test]
    fn test_from_json_rejects_unknown_strategy() {
        let err = StoreConfig::from_json(r#"{"search":"psychic"}"#).unwrap_err();
        assert_eq!(err.code(), "DISJOINT_INVALID_CONFIG");
    }
}
