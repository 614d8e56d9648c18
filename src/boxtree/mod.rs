//! Spatial box index for disjoint
//!
//! The box tree is derived, non-authoritative state. Each stored interval is
//! projected to an axis-aligned box in `f64` space through the domain's
//! ordered hash, and the tree answers "which boxes overlap this box".
//!
//! # Design Principles
//!
//! - Derived state: mirrors the store, never the source of truth
//! - Conservative: false positives allowed, false negatives forbidden
//! - Callers re-check every candidate against exact interval semantics
//!
//! # Structure
//!
//! A hyperoctree over the domain's hash range. A leaf splits into `2^N`
//! children at its midpoint once it holds more than `capacity` boxes, down to
//! `max_depth`. A box lives in the deepest node that fully contains it, so a
//! box straddling a split line stays with the parent.

mod config;
mod geometry;
mod tree;

pub use config::BoxTreeConfig;
pub use geometry::BoundingBox;
pub use tree::{BoxTree, BoxTreeStats};
