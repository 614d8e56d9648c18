//! Observability for the interval stores
//!
//! This module provides:
//! - Structured logging (JSON)
//! - Per-store search and mutation counters
//! - Typed store events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on store state
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use disjoint::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! log_event_with_fields(Event::FillApplied, &[("pieces", "3")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, StoreMetrics};

/// Log a store event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a store event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

/// Log a store event, building its fields only if the event will be written
pub fn log_event_lazy<F>(event: Event, fields: F)
where
    F: FnOnce() -> Vec<(&'static str, String)>,
{
    if !Logger::enabled(event.severity()) {
        return;
    }
    let owned = fields();
    let borrowed: Vec<(&str, &str)> = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
    Logger::log(event.severity(), event.as_str(), &borrowed);
}
