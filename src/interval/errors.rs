//! Interval error types
//!
//! Error codes:
//! - DISJOINT_MALFORMED_INTERVAL (FATAL)
//! - DISJOINT_EMPTY_INTERVAL (FATAL)

use thiserror::Error;

/// Result type for interval construction
pub type IntervalResult<T> = Result<T, IntervalError>;

/// Interval construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// Start is after end on at least one axis
    #[error("Malformed interval: start {start} is after end {end} on axis {axis}")]
    Malformed {
        start: String,
        end: String,
        axis: usize,
    },

    /// Starts at `Top` or ends at `Bottom` on at least one axis, so holds no point
    #[error("Empty interval: {start}..{end} starts at +inf or ends at -inf on axis {axis}")]
    Empty {
        start: String,
        end: String,
        axis: usize,
    },
}

impl IntervalError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            IntervalError::Malformed { .. } => "DISJOINT_MALFORMED_INTERVAL",
            IntervalError::Empty { .. } => "DISJOINT_EMPTY_INTERVAL",
        }
    }

    /// Malformed and empty intervals are precondition violations
    pub fn is_fatal(&self) -> bool {
        true
    }
}
