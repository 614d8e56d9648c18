//! Domain error types
//!
//! Error codes:
//! - DISJOINT_EMPTY_ENUMERATION (FATAL)
//! - DISJOINT_DUPLICATE_ENUMERATION (FATAL)
//! - DISJOINT_UNLISTED_CASE (FATAL)
//! - DISJOINT_UNKNOWN_CASE (ERROR)

use thiserror::Error;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// An enumerated axis was declared with no cases
    #[error("Enumeration {0} has no cases")]
    EmptyEnumeration(&'static str),

    /// An enumerated axis repeats a name or value
    #[error("Enumeration {enumeration} repeats case {case}")]
    DuplicateEnumeration {
        enumeration: &'static str,
        case: String,
    },

    /// A case value is missing from its enumeration's table
    #[error("Enumeration {enumeration} does not list case {case}")]
    UnlistedCase {
        enumeration: &'static str,
        case: String,
    },

    /// A name lookup matched no case
    #[error("Enumeration {enumeration} has no case named {name}")]
    UnknownCase {
        enumeration: &'static str,
        name: String,
    },
}

impl DomainError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::EmptyEnumeration(_) => "DISJOINT_EMPTY_ENUMERATION",
            DomainError::DuplicateEnumeration { .. } => "DISJOINT_DUPLICATE_ENUMERATION",
            DomainError::UnlistedCase { .. } => "DISJOINT_UNLISTED_CASE",
            DomainError::UnknownCase { .. } => "DISJOINT_UNKNOWN_CASE",
        }
    }

    /// Malformed declarations are precondition violations; lookups are not
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DomainError::UnknownCase { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::EmptyEnumeration("Color").code(), "DISJOINT_EMPTY_ENUMERATION");
        let dup = DomainError::DuplicateEnumeration {
            enumeration: "Color",
            case: "Red".to_string(),
        };
        assert_eq!(dup.code(), "DISJOINT_DUPLICATE_ENUMERATION");
        assert!(dup.is_fatal());
        let unlisted = DomainError::UnlistedCase {
            enumeration: "Color",
            case: "Mauve".to_string(),
        };
        assert_eq!(unlisted.code(), "DISJOINT_UNLISTED_CASE");
        assert!(unlisted.is_fatal());
    }

    #[test]
    fn test_unknown_case_not_fatal() {
        let err = DomainError::UnknownCase {
            enumeration: "Color",
            name: "Mauve".to_string(),
        };
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("Mauve"));
    }
}
