//! Disjoint-interval store
//!
//! A `DataStore` maps pairwise-disjoint intervals to values. Lookups find
//! candidates through a box index and confirm them against the exact
//! intervals, so the index may over-report but never under-report.
//!
//! # Indices
//!
//! - start index: `BTreeMap` from interval start to entry, giving ordered
//!   iteration and neighbour lookup during compression
//! - value index: entries grouped by value, for per-value compression
//! - box index: `BoxTree` of entry bounding boxes, for intersection search
//!
//! # Invariants
//!
//! - Stored intervals are pairwise disjoint after every mutation
//! - All three indices agree with the entry arena (checked after every
//!   mutation in debug builds)
//! - Search results do not depend on the configured `SearchStrategy`

mod config;
mod diff;
mod errors;
mod mutate;
mod state;
#[allow(clippy::module_inception)]
mod store;
mod valid_data;

pub use config::{SearchStrategy, StoreConfig, Validation};
pub use diff::DiffAction;
pub use errors::{StoreError, StoreResult};
pub use store::DataStore;
pub use valid_data::ValidData;
