//! Enumerated discrete axes
//!
//! A custom discrete axis over a closed set of cases, ordered by their
//! position in a hand-written `(name, value)` table. The table is the only
//! source of names and order; nothing is derived. Every case of the type
//! must appear in the table.
//!
//! ```ignore
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Stage { Draft, Review, Live }
//!
//! impl Enumeration for Stage {
//!     const NAME: &'static str = "Stage";
//!     const CASES: &'static [(&'static str, Self)] =
//!         &[("Draft", Stage::Draft), ("Review", Stage::Review), ("Live", Stage::Live)];
//! }
//!
//! Enumerated::<Stage>::validate()?;
//! let axis = DiscreteDomain::Point(Enumerated::new(Stage::Review));
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};

use super::errors::{DomainError, DomainResult};
use super::value::{DiscreteValue, DomainValue};

/// A closed set of cases with an explicit order.
pub trait Enumeration: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Name of the enumeration, used in errors.
    const NAME: &'static str;

    /// Cases in ascending order.
    const CASES: &'static [(&'static str, Self)];
}

/// A case of an `Enumeration`, usable as a discrete domain value.
///
/// Only listed cases can be wrapped. Order is table position, so two
/// unlisted cases would compare equal while being unequal.
#[derive(Clone, Copy)]
pub struct Enumerated<E: Enumeration>(E);

impl<E: Enumeration> Enumerated<E> {
    /// Checks the case table: non-empty, no repeated names or values.
    pub fn validate() -> DomainResult<()> {
        if E::CASES.is_empty() {
            return Err(DomainError::EmptyEnumeration(E::NAME));
        }

        let mut names = HashSet::new();
        let mut values = HashSet::new();
        for (name, value) in E::CASES {
            if !names.insert(*name) || !values.insert(*value) {
                return Err(DomainError::DuplicateEnumeration {
                    enumeration: E::NAME,
                    case: (*name).to_string(),
                });
            }
        }
        Ok(())
    }

    /// Wraps a listed case
    ///
    /// # Panics
    ///
    /// In debug builds, if `case` is missing from the table. Use `try_new`
    /// for cases that may be unlisted.
    pub fn new(case: E) -> Self {
        debug_assert!(
            Self::index_of(case).is_some(),
            "{}",
            Self::unlisted(case)
        );
        Self(case)
    }

    /// Wraps a case, failing if the table does not list it
    pub fn try_new(case: E) -> DomainResult<Self> {
        match Self::index_of(case) {
            Some(_) => Ok(Self(case)),
            None => Err(Self::unlisted(case)),
        }
    }

    /// Looks a case up by its table name
    pub fn from_name(name: &str) -> DomainResult<Self> {
        E::CASES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| Self(*v))
            .ok_or_else(|| DomainError::UnknownCase {
                enumeration: E::NAME,
                name: name.to_string(),
            })
    }

    /// The wrapped case
    pub fn case(&self) -> E {
        self.0
    }

    /// Position in the case table
    pub fn position(&self) -> usize {
        let index = Self::index_of(self.0);
        debug_assert!(index.is_some(), "{}", Self::unlisted(self.0));
        index.unwrap_or(E::CASES.len())
    }

    /// Table name of the case, if listed
    pub fn name(&self) -> Option<&'static str> {
        Self::index_of(self.0).and_then(|i| E::CASES.get(i)).map(|(n, _)| *n)
    }

    fn index_of(case: E) -> Option<usize> {
        E::CASES.iter().position(|(_, v)| *v == case)
    }

    fn unlisted(case: E) -> DomainError {
        DomainError::UnlistedCase {
            enumeration: E::NAME,
            case: format!("{:?}", case),
        }
    }

    fn at(position: usize) -> Option<Self> {
        E::CASES.get(position).map(|(_, v)| Self(*v))
    }

    fn edge(first: bool) -> Self {
        let case = if first { E::CASES.first() } else { E::CASES.last() };
        match case {
            Some((_, v)) => Self(*v),
            None => panic!("{}", DomainError::EmptyEnumeration(E::NAME)),
        }
    }
}

impl<E: Enumeration> PartialEq for Enumerated<E> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<E: Enumeration> Eq for Enumerated<E> {}

impl<E: Enumeration> Hash for Enumerated<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<E: Enumeration> PartialOrd for Enumerated<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: Enumeration> Ord for Enumerated<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position().cmp(&other.position())
    }
}

impl<E: Enumeration> Debug for Enumerated<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl<E: Enumeration> fmt::Display for Enumerated<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{:?}", self.0),
        }
    }
}

/// # Panics
///
/// `min_value`/`max_value` panic on an empty table; call `validate` first.
impl<E: Enumeration> DomainValue for Enumerated<E> {
    fn min_value() -> Self {
        Self::edge(true)
    }

    fn max_value() -> Self {
        Self::edge(false)
    }

    fn ordered_hash(&self) -> f64 {
        self.position() as f64
    }
}

impl<E: Enumeration> DiscreteValue for Enumerated<E> {
    fn successor(&self) -> Option<Self> {
        Self::at(self.position() + 1)
    }

    fn predecessor(&self) -> Option<Self> {
        self.position().checked_sub(1).and_then(Self::at)
    }
}
