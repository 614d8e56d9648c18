//! Store error types
//!
//! Error codes:
//! - DISJOINT_MALFORMED_INTERVAL (FATAL)
//! - DISJOINT_OVERLAPPING_DATA (FATAL)
//! - DISJOINT_UNDEFINED_POINT (ERROR)
//! - DISJOINT_VERSION_OUT_OF_RANGE (FATAL)
//! - DISJOINT_INVALID_CONFIG (ERROR)

use thiserror::Error;

use crate::interval::IntervalError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    // Construction
    #[error(transparent)]
    Interval(#[from] IntervalError),

    #[error("Overlapping data: {first} intersects {second}")]
    OverlappingData { first: String, second: String },

    // Lookup
    #[error("No data defined at {0}")]
    UndefinedPoint(String),

    // Versioning
    #[error("Version {version} is reserved for unapproved data")]
    VersionOutOfRange { version: i32 },

    // Configuration
    #[error("Invalid store config: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Interval(e) => e.code(),
            StoreError::OverlappingData { .. } => "DISJOINT_OVERLAPPING_DATA",
            StoreError::UndefinedPoint(_) => "DISJOINT_UNDEFINED_POINT",
            StoreError::VersionOutOfRange { .. } => "DISJOINT_VERSION_OUT_OF_RANGE",
            StoreError::InvalidConfig(_) => "DISJOINT_INVALID_CONFIG",
        }
    }

    /// Returns true for precondition violations
    pub fn is_fatal(&self) -> bool {
        match self {
            StoreError::Interval(e) => e.is_fatal(),
            StoreError::OverlappingData { .. } | StoreError::VersionOutOfRange { .. } => true,
            StoreError::UndefinedPoint(_) | StoreError::InvalidConfig(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_point_not_fatal() {
        let err = StoreError::UndefinedPoint("Point(3)".to_string());
        assert!(!err.is_fatal());
        assert_eq!(err.code(), "DISJOINT_UNDEFINED_POINT");
        assert!(err.to_string().contains("Point(3)"));
    }

    #[test]
    fn test_interval_error_passes_through() {
        let err: StoreError = IntervalError::Malformed {
            start: "Point(5)".to_string(),
            end: "Point(1)".to_string(),
            axis: 0,
        }
        .into();
        assert_eq!(err.code(), "DISJOINT_MALFORMED_INTERVAL");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_overlap_and_version_fatal() {
        let overlap = StoreError::OverlappingData {
            first: "a".to_string(),
            second: "b".to_string(),
        };
        assert!(overlap.is_fatal());
        assert!(StoreError::VersionOutOfRange { version: i32::MAX }.is_fatal());
        assert!(!StoreError::InvalidConfig("bad".to_string()).is_fatal());
    }
}
