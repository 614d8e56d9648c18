//! Per-store search and mutation counters
//!
//! - Counters only
//! - Monotonic increase
//! - Thread-safe but lock-minimal

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counters owned by one store.
///
/// Counters use Relaxed ordering; readers only need eventually exact totals.
#[derive(Debug, Default)]
pub struct StoreMetrics {
    /// Searches answered through the box index
    indexed_searches: AtomicU64,
    /// Searches answered by scanning every entry
    linear_searches: AtomicU64,
    /// Entries returned by the box index before exact filtering
    candidates_examined: AtomicU64,
    /// Index candidates rejected by the exact interval check
    false_positives: AtomicU64,
    /// Completed mutating operations
    mutations: AtomicU64,
}

impl StoreMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one indexed search and what filtering it did
    pub fn record_indexed_search(&self, candidates: usize, hits: usize) {
        self.indexed_searches.fetch_add(1, Ordering::Relaxed);
        self.candidates_examined
            .fetch_add(candidates as u64, Ordering::Relaxed);
        self.false_positives
            .fetch_add(candidates.saturating_sub(hits) as u64, Ordering::Relaxed);
    }

    /// Record one linear search
    pub fn record_linear_search(&self) {
        self.linear_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one completed mutation
    pub fn increment_mutations(&self) {
        self.mutations.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all counters as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            indexed_searches: self.indexed_searches.load(Ordering::Relaxed),
            linear_searches: self.linear_searches.load(Ordering::Relaxed),
            candidates_examined: self.candidates_examined.load(Ordering::Relaxed),
            false_positives: self.false_positives.load(Ordering::Relaxed),
            mutations: self.mutations.load(Ordering::Relaxed),
        }
    }

    /// Get current counters as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| String::from("{}"))
    }
}

/// A point-in-time copy of a store's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub indexed_searches: u64,
    pub linear_searches: u64,
    pub candidates_examined: u64,
    pub false_positives: u64,
    pub mutations: u64,
}

impl MetricsSnapshot {
    /// Fraction of index candidates that survived exact filtering.
    ///
    /// `None` before any indexed search examined a candidate.
    pub fn index_precision(&self) -> Option<f64> {
        if self.candidates_examined == 0 {
            return None;
        }
        let hits = self.candidates_examined - self.false_positives;
        Some(hits as f64 / self.candidates_examined as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let metrics = StoreMetrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
        assert_eq!(metrics.snapshot().index_precision(), None);
    }

    #[test]
    fn test_indexed_search_counts_false_positives() {
        let metrics = StoreMetrics::new();
        metrics.record_indexed_search(5, 2);
        metrics.record_indexed_search(3, 3);
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.indexed_searches, 2);
        assert_eq!(snapshot.candidates_examined, 8);
        assert_eq!(snapshot.false_positives, 3);
        assert_eq!(snapshot.index_precision(), Some(5.0 / 8.0));
    }

    #[test]
    fn test_to_json_lists_every_counter() {
        let metrics = StoreMetrics::new();
        metrics.record_linear_search();
        metrics.increment_mutations();
        metrics.increment_mutations();

        assert_eq!(
            metrics.to_json(),
            r#"{"indexed_searches":0,"linear_searches":1,"candidates_examined":0,"false_positives":0,"mutations":2}"#
        );
        let parsed: MetricsSnapshot = serde_json::from_str(&metrics.to_json()).unwrap();
        assert_eq!(parsed, metrics.snapshot());
    }
}
