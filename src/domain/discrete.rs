//! Discrete domain points
//!
//! Points on an axis whose values have successors and predecessors
//! (integers, calendar dates). Intervals over these points are closed.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::DiscreteValue;
use super::Domain1D;

/// A point on a discrete axis.
///
/// Variant order gives `Bottom < Point(_) < Top`; points compare by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiscreteDomain<T> {
    /// Unbounded below.
    Bottom,
    /// A concrete value.
    Point(T),
    /// Unbounded above.
    Top,
}

impl<T: DiscreteValue> DiscreteDomain<T> {
    /// The point at the smallest value (not the `Bottom` sentinel).
    pub fn min_point() -> Self {
        DiscreteDomain::Point(T::min_value())
    }

    /// The point at the largest value (not the `Top` sentinel).
    pub fn max_point() -> Self {
        DiscreteDomain::Point(T::max_value())
    }

    /// Successor; `Top` after the largest value.
    pub fn successor(&self) -> Self {
        match self {
            DiscreteDomain::Point(v) => v.successor().map_or(DiscreteDomain::Top, DiscreteDomain::Point),
            sentinel => sentinel.clone(),
        }
    }

    /// Predecessor; `Bottom` before the smallest value.
    pub fn predecessor(&self) -> Self {
        match self {
            DiscreteDomain::Point(v) => {
                v.predecessor().map_or(DiscreteDomain::Bottom, DiscreteDomain::Point)
            }
            sentinel => sentinel.clone(),
        }
    }
}

impl<T> From<T> for DiscreteDomain<T> {
    fn from(value: T) -> Self {
        DiscreteDomain::Point(value)
    }
}

impl<T: DiscreteValue> Domain1D for DiscreteDomain<T> {
    type Value = T;

    fn bottom() -> Self {
        DiscreteDomain::Bottom
    }

    fn top() -> Self {
        DiscreteDomain::Top
    }

    fn right_adjacent(&self) -> Self {
        self.successor()
    }

    fn left_adjacent(&self) -> Self {
        self.predecessor()
    }

    fn value(&self) -> Option<&T> {
        match self {
            DiscreteDomain::Point(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for DiscreteDomain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscreteDomain::Bottom => write!(f, "-∞"),
            DiscreteDomain::Point(v) => write!(f, "{}", v),
            DiscreteDomain::Top => write!(f, "+∞"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_with_sentinels() {
        let bottom: DiscreteDomain<i32> = DiscreteDomain::Bottom;
        let top: DiscreteDomain<i32> = DiscreteDomain::Top;
        assert!(bottom < DiscreteDomain::Point(i32::MIN));
        assert!(DiscreteDomain::Point(i32::MAX) < top);
        assert!(DiscreteDomain::Point(-1) < DiscreteDomain::Point(1));
    }

    #[test]
    fn test_successor_at_bounds() {
        assert_eq!(DiscreteDomain::<i32>::max_point().successor(), DiscreteDomain::Top);
        assert_eq!(DiscreteDomain::<i32>::min_point().predecessor(), DiscreteDomain::Bottom);
    }

    #[test]
    fn test_sentinels_are_their_own_neighbours() {
        let top: DiscreteDomain<i64> = DiscreteDomain::Top;
        let bottom: DiscreteDomain<i64> = DiscreteDomain::Bottom;
        assert_eq!(top.successor(), top);
        assert_eq!(top.predecessor(), top);
        assert_eq!(bottom.successor(), bottom);
        assert_eq!(bottom.predecessor(), bottom);
    }

    #[test]
    fn test_display() {
        assert_eq!(DiscreteDomain::Point(7).to_string(), "7");
        assert_eq!(DiscreteDomain::<i32>::Bottom.to_string(), "-∞");
        assert_eq!(DiscreteDomain::<i32>::Top.to_string(), "+∞");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&DiscreteDomain::Point(3)).unwrap();
        assert_eq!(json, r#"{"Point":3}"#);
        let back: DiscreteDomain<i32> = serde_json::from_str(r#""Top""#).unwrap();
        assert_eq!(back, DiscreteDomain::Top);
    }
}
