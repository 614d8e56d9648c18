//! Box tree configuration

use serde::{Deserialize, Serialize};

/// Configuration for the box tree.
///
/// Capacity bounds the number of boxes a leaf holds before it splits; depth
/// bounds the splitting so that boxes with colliding hashes cannot recurse
/// forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxTreeConfig {
    /// Maximum boxes in a leaf before it splits.
    pub capacity: usize,
    /// Maximum node depth; leaves at this depth never split.
    pub max_depth: usize,
}

impl Default for BoxTreeConfig {
    fn default() -> Self {
        Self {
            capacity: 32,
            max_depth: 24,
        }
    }
}

impl BoxTreeConfig {
    /// Create a config with the given leaf capacity and depth limit.
    pub fn new(capacity: usize, max_depth: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            max_depth,
        }
    }

    /// Capacity scaled for a bulk load of `len` boxes.
    ///
    /// Large initial loads get wider leaves so the first build does not
    /// immediately split all the way down.
    pub fn sized_for(&self, len: usize) -> Self {
        let scaled = (len as f64).sqrt() as usize;
        Self {
            capacity: self.capacity.max(scaled),
            max_depth: self.max_depth,
        }
    }
}
