//! Observable store events
//!
//! Events are explicit and typed; each carries its own severity.

use std::fmt;

use super::logger::Severity;

/// Observable events in disjoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Construction
    /// Store created empty or from a single value
    StoreCreated,
    /// Store bulk-loaded from initial data
    StoreLoaded,
    /// Strict validation rejected initial data
    ValidationFailed,

    // Mutation
    /// `update_or_remove` rewrote entries
    UpdateApplied,
    /// `fill` wrote into unoccupied space
    FillApplied,
    /// Full decompress/recompress pass
    Recompressed,
    /// Diff actions replayed
    DiffApplied,
    /// Diff action referenced a missing start key
    DiffTargetMissing,

    // Index
    /// Indexed and linear search disagreed
    IndexMismatch,

    // Versioning
    /// Current version cursor moved
    VersionChanged,
    /// History after a version dropped
    VersionReset,
    /// Version history collapsed to one layer
    HistoryCollapsed,
    /// Unapproved edits approved from the current version forward
    UnapprovedApproved,
    /// Unapproved edits discarded
    UnapprovedReverted,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StoreCreated => "STORE_CREATED",
            Event::StoreLoaded => "STORE_LOADED",
            Event::ValidationFailed => "STORE_VALIDATION_FAILED",
            Event::UpdateApplied => "UPDATE_APPLIED",
            Event::FillApplied => "FILL_APPLIED",
            Event::Recompressed => "RECOMPRESSED",
            Event::DiffApplied => "DIFF_APPLIED",
            Event::DiffTargetMissing => "DIFF_TARGET_MISSING",
            Event::IndexMismatch => "INDEX_MISMATCH",
            Event::VersionChanged => "VERSION_CHANGED",
            Event::VersionReset => "VERSION_RESET",
            Event::HistoryCollapsed => "VERSION_HISTORY_COLLAPSED",
            Event::UnapprovedApproved => "UNAPPROVED_APPROVED",
            Event::UnapprovedReverted => "UNAPPROVED_REVERTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::IndexMismatch => Severity::Error,
            Event::ValidationFailed | Event::DiffTargetMissing => Severity::Warn,
            Event::VersionReset | Event::HistoryCollapsed => Severity::Info,
            _ => Severity::Trace,
        }
    }

    /// Returns true if this event indicates a broken invariant
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::IndexMismatch)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::StoreCreated,
            Event::StoreLoaded,
            Event::ValidationFailed,
            Event::UpdateApplied,
            Event::FillApplied,
            Event::Recompressed,
            Event::DiffApplied,
            Event::DiffTargetMissing,
            Event::IndexMismatch,
            Event::VersionChanged,
            Event::VersionReset,
            Event::HistoryCollapsed,
            Event::UnapprovedApproved,
            Event::UnapprovedReverted,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_fatal_events() {
        assert!(Event::IndexMismatch.is_fatal());
        assert!(!Event::UpdateApplied.is_fatal());
        assert_eq!(Event::ValidationFailed.severity(), Severity::Warn);
    }
}
