//! disjoint - A strict, in-memory store of disjoint N-dimensional intervals
//!
//! Layers, leaves first:
//! - `domain`: per-axis points over ordered values, composed into tuples
//! - `interval`: interval algebra (intersection, join, adjacency, gap, exclusion)
//! - `boxtree`: approximate spatial index over double-precision boxes
//! - `store`: the disjoint-interval store
//! - `versioned`: a hidden version axis layered over the store

pub mod boxtree;
pub mod domain;
pub mod interval;
pub mod observability;
pub mod store;
pub mod versioned;
