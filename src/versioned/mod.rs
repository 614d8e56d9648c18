//! Versioned interval store
//!
//! Layers a hidden version axis over a `DataStore`: logical data over `D` is
//! stored over `D::Versioned`, one axis wider, where the last axis is an
//! `i32` version.
//!
//! # Version semantics
//!
//! - Reads look at a single version chosen by a `VersionSelection`
//! - Writes cover a version range; the default, `CurrentForward`, leaves
//!   history before the cursor untouched
//! - `UNAPPROVED_VERSION` (`i32::MAX`) holds pending edits; approving copies
//!   them from the cursor forward
//!
//! # Invariants
//!
//! - The cursor is always below `UNAPPROVED_VERSION`
//! - Every read under a selection sees a disjoint logical snapshot

mod selection;
mod versionable;
mod versioned_store;

pub use selection::{VersionInterval, VersionPoint, VersionSelection, UNAPPROVED_VERSION};
pub use versionable::Versionable;
pub use versioned_store::VersionedStore;
