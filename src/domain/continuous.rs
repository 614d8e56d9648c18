//! Continuous domain points
//!
//! Continuous values have no neighbours, so boundaries carry their own
//! openness instead. A point sits either exactly at a value or infinitesimally
//! to one side of it:
//!
//! - `Below(v)`: an open end, everything strictly less than `v`
//! - `Point(v)`: a closed boundary at `v`
//! - `Above(v)`: an open start, everything strictly greater than `v`
//!
//! Ordering is `Below(v) < Point(v) < Above(v) < Below(w)` for `v < w`.
//! Starts are always `Point` or `Above`, ends are always `Point` or `Below`;
//! `right_adjacent` and `left_adjacent` map between the two.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::ContinuousValue;
use super::Domain1D;

/// A point on a continuous axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContinuousDomain<T> {
    /// Unbounded below.
    Bottom,
    /// Open end just before the value.
    Below(T),
    /// Closed boundary at the value.
    Point(T),
    /// Open start just after the value.
    Above(T),
    /// Unbounded above.
    Top,
}

impl<T> ContinuousDomain<T> {
    fn rank(&self) -> (u8, Option<&T>, u8) {
        match self {
            ContinuousDomain::Bottom => (0, None, 0),
            ContinuousDomain::Below(v) => (1, Some(v), 0),
            ContinuousDomain::Point(v) => (1, Some(v), 1),
            ContinuousDomain::Above(v) => (1, Some(v), 2),
            ContinuousDomain::Top => (2, None, 0),
        }
    }

    /// Returns true if this boundary excludes its value.
    pub fn is_open(&self) -> bool {
        matches!(self, ContinuousDomain::Below(_) | ContinuousDomain::Above(_))
    }
}

impl<T: Ord> PartialOrd for ContinuousDomain<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for ContinuousDomain<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl<T> From<T> for ContinuousDomain<T> {
    fn from(value: T) -> Self {
        ContinuousDomain::Point(value)
    }
}

impl<T: ContinuousValue> Domain1D for ContinuousDomain<T> {
    type Value = T;

    fn bottom() -> Self {
        ContinuousDomain::Bottom
    }

    fn top() -> Self {
        ContinuousDomain::Top
    }

    fn right_adjacent(&self) -> Self {
        match self {
            ContinuousDomain::Point(v) => ContinuousDomain::Above(v.clone()),
            ContinuousDomain::Below(v) => ContinuousDomain::Point(v.clone()),
            other => other.clone(),
        }
    }

    fn left_adjacent(&self) -> Self {
        match self {
            ContinuousDomain::Point(v) => ContinuousDomain::Below(v.clone()),
            ContinuousDomain::Above(v) => ContinuousDomain::Point(v.clone()),
            other => other.clone(),
        }
    }

    fn value(&self) -> Option<&T> {
        match self {
            ContinuousDomain::Below(v) | ContinuousDomain::Point(v) | ContinuousDomain::Above(v) => {
                Some(v)
            }
            _ => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for ContinuousDomain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContinuousDomain::Bottom => write!(f, "-∞"),
            ContinuousDomain::Below(v) => write!(f, "{}⁻", v),
            ContinuousDomain::Point(v) => write!(f, "{}", v),
            ContinuousDomain::Above(v) => write!(f, "{}⁺", v),
            ContinuousDomain::Top => write!(f, "+∞"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type C = ContinuousDomain<i64>;

    #[test]
    fn test_open_points_bracket_the_value() {
        assert!(C::Below(5) < C::Point(5));
        assert!(C::Point(5) < C::Above(5));
        assert!(C::Above(5) < C::Below(6));
        assert!(C::Bottom < C::Below(i64::MIN));
        assert!(C::Above(i64::MAX) < C::Top);
    }

    #[test]
    fn test_adjacency_flips_openness() {
        // [.., 5] is followed by (5, ..
        assert_eq!(C::Point(5).right_adjacent(), C::Above(5));
        // [.., 5) is followed by [5, ..
        assert_eq!(C::Below(5).right_adjacent(), C::Point(5));
        assert_eq!(C::Point(5).left_adjacent(), C::Below(5));
        assert_eq!(C::Above(5).left_adjacent(), C::Point(5));
    }

    #[test]
    fn test_adjacency_round_trip() {
        for p in [C::Point(1), C::Below(1)] {
            assert_eq!(p.right_adjacent().left_adjacent(), p);
        }
    }

    #[test]
    fn test_sentinels_fixed() {
        assert_eq!(C::Top.right_adjacent(), C::Top);
        assert_eq!(C::Bottom.left_adjacent(), C::Bottom);
        assert!(C::Top.is_unbounded());
        assert!(!C::Above(1).is_unbounded());
        assert!(C::Above(1).is_open());
    }

    #[test]
    fn test_hash_ignores_openness() {
        assert_eq!(C::Below(3).ordered_hash(), C::Above(3).ordered_hash());
    }
}
