//! Domain subsystem for disjoint
//!
//! A domain point is one coordinate on one axis: a concrete value or one of the
//! two sentinels `Bottom` (unbounded below) and `Top` (unbounded above).
//!
//! # Layers
//!
//! - `DomainValue` / `DiscreteValue` / `ContinuousValue`: the contract a value
//!   type supplies (order, bounds, ordered hash, successor/predecessor)
//! - `Domain1D`: one axis of points (`DiscreteDomain`, `ContinuousDomain`)
//! - `Domain`: an N-dimensional coordinate, implemented for single axes and
//!   for tuples of up to five axes
//!
//! # Invariants
//!
//! - `Bottom < value < Top` on every axis
//! - `ordered_hash` is weakly monotonic: `x < y => hash(x) <= hash(y)`
//! - Sentinels are their own successor and predecessor

mod continuous;
mod discrete;
mod enumerated;
mod errors;
mod tuple;
mod value;

pub use continuous::ContinuousDomain;
pub use discrete::DiscreteDomain;
pub use enumerated::{Enumerated, Enumeration};
pub use errors::{DomainError, DomainResult};
pub use value::{ContinuousValue, DiscreteValue, DomainValue};

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

/// One axis worth of domain points.
///
/// `right_adjacent` maps an interval end to the first start that can follow it
/// without a gap; `left_adjacent` maps a start to the last end before it.
/// For discrete axes these are successor and predecessor.
pub trait Domain1D: Clone + Ord + Hash + Debug + Send + Sync + 'static {
    /// The value type carried by non-sentinel points.
    type Value: DomainValue;

    /// The unbounded-below sentinel.
    fn bottom() -> Self;

    /// The unbounded-above sentinel.
    fn top() -> Self;

    /// First start point that directly follows this end point.
    fn right_adjacent(&self) -> Self;

    /// Last end point that directly precedes this start point.
    fn left_adjacent(&self) -> Self;

    /// The value at this point, `None` for sentinels.
    fn value(&self) -> Option<&Self::Value>;

    /// Weakly monotonic projection of this point onto `f64`.
    fn ordered_hash(&self) -> f64 {
        match self.value() {
            Some(v) => v.ordered_hash(),
            None if *self == Self::bottom() => Self::Value::min_value().ordered_hash(),
            None => Self::Value::max_value().ordered_hash(),
        }
    }

    /// Returns true for `Bottom` and `Top`.
    fn is_unbounded(&self) -> bool {
        self.value().is_none()
    }
}

/// An N-dimensional coordinate.
///
/// Interval algebra works on `Domain` points only through these per-axis
/// accessors, so one implementation covers every arity. Ordering of the whole
/// point is lexicographic by axis, which is what the store's start index uses.
pub trait Domain: Clone + Ord + Hash + Debug + Send + Sync + 'static {
    /// Number of axes.
    const ARITY: usize;

    /// Every axis at `Bottom`.
    fn bottom() -> Self;

    /// Every axis at `Top`.
    fn top() -> Self;

    /// Axis-wise `right_adjacent`.
    fn right_adjacent(&self) -> Self;

    /// Axis-wise `left_adjacent`.
    fn left_adjacent(&self) -> Self;

    /// Compares a single axis.
    fn axis_cmp(&self, other: &Self, axis: usize) -> Ordering;

    /// A copy of `self` with one axis taken from `source`.
    fn with_axis(&self, axis: usize, source: &Self) -> Self;

    /// Returns true if the given axis is a sentinel.
    fn is_unbounded_on(&self, axis: usize) -> bool;

    /// Per-axis ordered hashes, `ARITY` long.
    fn ordered_hashes(&self) -> Vec<f64>;

    /// Returns true if every axis is `<=` the matching axis of `other`.
    fn le_all(&self, other: &Self) -> bool {
        (0..Self::ARITY).all(|axis| self.axis_cmp(other, axis) != Ordering::Greater)
    }

    /// Axis-wise maximum.
    fn max_all(&self, other: &Self) -> Self {
        (0..Self::ARITY).fold(self.clone(), |acc, axis| {
            if other.axis_cmp(&acc, axis) == Ordering::Greater {
                acc.with_axis(axis, other)
            } else {
                acc
            }
        })
    }

    /// Axis-wise minimum.
    fn min_all(&self, other: &Self) -> Self {
        (0..Self::ARITY).fold(self.clone(), |acc, axis| {
            if other.axis_cmp(&acc, axis) == Ordering::Less {
                acc.with_axis(axis, other)
            } else {
                acc
            }
        })
    }

    /// Returns true if any axis is a sentinel.
    fn is_unbounded_anywhere(&self) -> bool {
        (0..Self::ARITY).any(|axis| self.is_unbounded_on(axis))
    }
}

/// Implements `Domain` for a single-axis point type.
macro_rules! impl_domain_for_axis {
    ($ty:ident, $bound:ident) => {
        impl<T: $bound> Domain for $ty<T> {
            const ARITY: usize = 1;

            fn bottom() -> Self {
                <Self as Domain1D>::bottom()
            }

            fn top() -> Self {
                <Self as Domain1D>::top()
            }

            fn right_adjacent(&self) -> Self {
                <Self as Domain1D>::right_adjacent(self)
            }

            fn left_adjacent(&self) -> Self {
                <Self as Domain1D>::left_adjacent(self)
            }

            fn axis_cmp(&self, other: &Self, axis: usize) -> Ordering {
                debug_assert_eq!(axis, 0, "single-axis domain");
                self.cmp(other)
            }

            fn with_axis(&self, axis: usize, source: &Self) -> Self {
                debug_assert_eq!(axis, 0, "single-axis domain");
                source.clone()
            }

            fn is_unbounded_on(&self, axis: usize) -> bool {
                debug_assert_eq!(axis, 0, "single-axis domain");
                <Self as Domain1D>::is_unbounded(self)
            }

            fn ordered_hashes(&self) -> Vec<f64> {
                vec![<Self as Domain1D>::ordered_hash(self)]
            }
        }
    };
}

impl_domain_for_axis!(DiscreteDomain, DiscreteValue);
impl_domain_for_axis!(ContinuousDomain, ContinuousValue);

#[cfg(test)]
mod tests {
    use super::*;

    type D2 = (DiscreteDomain<i64>, DiscreteDomain<i64>);

    fn p2(x: i64, y: i64) -> D2 {
        (DiscreteDomain::Point(x), DiscreteDomain::Point(y))
    }

    #[test]
    fn test_axis_max_min() {
        let a = p2(1, 9);
        let b = p2(5, 2);
        assert_eq!(a.max_all(&b), p2(5, 9));
        assert_eq!(a.min_all(&b), p2(1, 2));
    }

    #[test]
    fn test_le_all_is_axis_wise() {
        assert!(p2(1, 2).le_all(&p2(1, 3)));
        assert!(!p2(1, 4).le_all(&p2(2, 3)));
        // Lexicographic order disagrees here
        assert!(p2(1, 4) < p2(2, 3));
    }

    #[test]
    fn test_single_axis_domain() {
        let p = DiscreteDomain::Point(3i64);
        assert_eq!(<DiscreteDomain<i64> as Domain>::ARITY, 1);
        assert_eq!(Domain::right_adjacent(&p), DiscreteDomain::Point(4));
        assert_eq!(p.ordered_hashes(), vec![3.0]);
    }

    #[test]
    fn test_sentinel_hash_uses_value_bounds() {
        let bottom = <DiscreteDomain<i32> as Domain1D>::bottom();
        let top = <DiscreteDomain<i32> as Domain1D>::top();
        assert_eq!(bottom.ordered_hash(), i32::MIN as f64);
        assert_eq!(top.ordered_hash(), i32::MAX as f64);
        assert!(bottom.is_unbounded_anywhere());
    }
}
