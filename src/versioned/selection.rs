//! Version selection: how a logical read or write maps onto the version axis

use serde::{Deserialize, Serialize};

use crate::domain::DiscreteDomain;
use crate::interval::Interval;

/// A point on the hidden version axis
pub type VersionPoint = DiscreteDomain<i32>;

/// A range on the hidden version axis
pub type VersionInterval = Interval<VersionPoint>;

/// The version reserved for unapproved edits.
///
/// The cursor never reaches it; data visible here but not at the cursor is
/// pending approval.
pub const UNAPPROVED_VERSION: i32 = i32::MAX;

/// Which versions a read sees or a write affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VersionSelection {
    /// Exactly the current version
    Current,
    /// Exactly the given version
    Specific(i32),
    /// The current version and everything after it, pending edits included
    #[default]
    CurrentForward,
    /// The unapproved layer only
    Unapproved,
}

impl VersionSelection {
    /// The single version a read under this selection looks at
    pub fn read_version(&self, current: i32) -> i32 {
        match self {
            VersionSelection::Current | VersionSelection::CurrentForward => current,
            VersionSelection::Specific(version) => *version,
            VersionSelection::Unapproved => UNAPPROVED_VERSION,
        }
    }

    /// The version range a write under this selection covers
    pub fn write_interval(&self, current: i32) -> VersionInterval {
        match self {
            VersionSelection::Current => VersionInterval::point(current),
            VersionSelection::Specific(version) => VersionInterval::point(*version),
            VersionSelection::CurrentForward => VersionInterval::from_value(current),
            VersionSelection::Unapproved => VersionInterval::from_value(UNAPPROVED_VERSION),
        }
    }
}
