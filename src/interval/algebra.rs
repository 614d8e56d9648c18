//! N-dimensional intervals and their algebra

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::errors::{IntervalError, IntervalResult};
use super::remainder::Remainder;
use crate::domain::{ContinuousDomain, ContinuousValue, DiscreteDomain, DiscreteValue, Domain, Domain1D};

/// A closed interval `[start, end]` over a `Domain`.
///
/// Fields are private: every interval in circulation has been checked to have
/// `start <= end` on every axis. Ordering is by start, then end, which gives
/// the store its deterministic iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(
    try_from = "IntervalBounds<D>",
    bound(deserialize = "D: Domain + Deserialize<'de>")
)]
pub struct Interval<D> {
    start: D,
    end: D,
}

/// Unchecked wire form; converted through `Interval::try_new`.
#[derive(Deserialize)]
struct IntervalBounds<D> {
    start: D,
    end: D,
}

impl<D: Domain> TryFrom<IntervalBounds<D>> for Interval<D> {
    type Error = IntervalError;

    fn try_from(bounds: IntervalBounds<D>) -> IntervalResult<Self> {
        Interval::try_new(bounds.start, bounds.end)
    }
}

impl<D: Domain> Interval<D> {
    /// Creates an interval, rejecting `start > end` on any axis.
    ///
    /// Sentinels bound intervals but carry no data, so an interval that
    /// starts at `Top` or ends at `Bottom` on some axis is empty and rejected.
    pub fn try_new(start: D, end: D) -> IntervalResult<Self> {
        for axis in 0..D::ARITY {
            if start.axis_cmp(&end, axis) == Ordering::Greater {
                return Err(IntervalError::Malformed {
                    start: format!("{:?}", start),
                    end: format!("{:?}", end),
                    axis,
                });
            }
            if !has_points_on(&start, &end, axis) {
                return Err(IntervalError::Empty {
                    start: format!("{:?}", start),
                    end: format!("{:?}", end),
                    axis,
                });
            }
        }
        Ok(Self { start, end })
    }

    /// Creates an interval.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or the interval is empty on any axis; use
    /// `try_new` for untrusted bounds.
    pub fn new(start: D, end: D) -> Self {
        match Self::try_new(start, end) {
            Ok(interval) => interval,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds an interval the caller has already proven well-formed.
    fn checked(start: D, end: D) -> Self {
        debug_assert!(start.le_all(&end), "malformed interval {:?}..{:?}", start, end);
        debug_assert!(
            (0..D::ARITY).all(|axis| has_points_on(&start, &end, axis)),
            "empty interval {:?}..{:?}",
            start,
            end
        );
        Self { start, end }
    }

    /// Like `checked`, but `None` when the piece is empty on `axis`.
    fn trimmed(start: D, end: D, axis: usize) -> Option<Self> {
        if has_points_on(&start, &end, axis) {
            Some(Self::checked(start, end))
        } else {
            None
        }
    }

    /// The single-point interval `[point, point]`.
    ///
    /// # Panics
    ///
    /// Panics if `point` is a sentinel on any axis.
    pub fn at(point: D) -> Self {
        Self::new(point.clone(), point)
    }

    /// The whole domain, `[Bottom, Top]` on every axis.
    pub fn unbounded() -> Self {
        Self::checked(D::bottom(), D::top())
    }

    /// Start point
    pub fn start(&self) -> &D {
        &self.start
    }

    /// End point
    pub fn end(&self) -> &D {
        &self.end
    }

    /// Consumes the interval into `(start, end)`
    pub fn into_parts(self) -> (D, D) {
        (self.start, self.end)
    }

    /// Returns true if this interval spans the whole domain
    pub fn is_unbounded(&self) -> bool {
        self.start == D::bottom() && self.end == D::top()
    }

    /// Same end, start moved to `Bottom` on every axis
    pub fn from_bottom(&self) -> Self {
        Self::checked(D::bottom(), self.end.clone())
    }

    /// Same start, end moved to `Top` on every axis
    pub fn to_top(&self) -> Self {
        Self::checked(self.start.clone(), D::top())
    }

    /// Returns true if `point` lies inside on every axis. Sentinel points are
    /// never contained.
    pub fn contains(&self, point: &D) -> bool {
        !point.is_unbounded_anywhere() && self.start.le_all(point) && point.le_all(&self.end)
    }

    /// Returns true if `other` lies entirely inside
    pub fn contains_interval(&self, other: &Self) -> bool {
        self.start.le_all(&other.start) && other.end.le_all(&self.end)
    }

    /// Returns true if the two intervals share at least one point
    pub fn intersects(&self, other: &Self) -> bool {
        self.start.le_all(&other.end) && other.start.le_all(&self.end)
    }

    /// Per-axis `(max start, min end)`, or `None` if any axis is empty
    pub fn intersection_with(&self, other: &Self) -> Option<Self> {
        let start = self.start.max_all(&other.start);
        let end = self.end.min_all(&other.end);
        if start.le_all(&end) {
            Some(Self::checked(start, end))
        } else {
            None
        }
    }

    /// Smallest interval enclosing both, including any gap between them
    pub fn joined_with(&self, other: &Self) -> Self {
        Self::checked(self.start.min_all(&other.start), self.end.max_all(&other.end))
    }

    /// Returns true if `other` starts right where `self` ends
    pub fn is_left_adjacent_to(&self, other: &Self) -> bool {
        self.end.right_adjacent() == other.start
    }

    /// Returns true if `self` starts right where `other` ends
    pub fn is_right_adjacent_to(&self, other: &Self) -> bool {
        other.is_left_adjacent_to(self)
    }

    /// Adjacent on either side
    pub fn is_adjacent_to(&self, other: &Self) -> bool {
        self.is_left_adjacent_to(other) || self.is_right_adjacent_to(other)
    }

    /// The interval strictly between two disjoint, non-adjacent intervals.
    ///
    /// Axes where the two overlap contribute their intersection; separated
    /// axes contribute the gap. If any separated axis has no room between the
    /// two (adjacent), there is no gap.
    pub fn gap_with(&self, other: &Self) -> Option<Self> {
        if self.intersects(other) {
            return None;
        }

        let mut start = self.start.clone();
        let mut end = self.end.clone();
        for axis in 0..D::ARITY {
            let (lower, upper) = if self.end.axis_cmp(&other.start, axis) == Ordering::Less {
                (self, other)
            } else if other.end.axis_cmp(&self.start, axis) == Ordering::Less {
                (other, self)
            } else {
                let axis_start = self.start.max_all(&other.start);
                let axis_end = self.end.min_all(&other.end);
                start = start.with_axis(axis, &axis_start);
                end = end.with_axis(axis, &axis_end);
                continue;
            };

            let gap_start = lower.end.right_adjacent();
            let gap_end = upper.start.left_adjacent();
            if gap_start.axis_cmp(&gap_end, axis) == Ordering::Greater {
                return None;
            }
            start = start.with_axis(axis, &gap_start);
            end = end.with_axis(axis, &gap_end);
        }
        Some(Self::checked(start, end))
    }

    /// What remains of `self` along one axis after removing `that`'s extent on
    /// that axis, every other axis kept at `self`'s full extent.
    ///
    /// Sentinels are their own neighbours, so cutting next to one can leave a
    /// piece that starts at `Top` or ends at `Bottom`. Such a piece is empty
    /// and dropped.
    pub fn excluding_on(&self, that: &Self, axis: usize) -> Remainder<Self> {
        let before = that.end.axis_cmp(&self.start, axis) == Ordering::Less;
        let after = that.start.axis_cmp(&self.end, axis) == Ordering::Greater;
        if before || after {
            return Remainder::Single(self.clone());
        }

        let covers_start = that.start.axis_cmp(&self.start, axis) != Ordering::Greater;
        let covers_end = that.end.axis_cmp(&self.end, axis) != Ordering::Less;
        let left = || {
            Self::trimmed(
                self.start.clone(),
                self.end.with_axis(axis, &that.start.left_adjacent()),
                axis,
            )
        };
        let right = || {
            Self::trimmed(
                self.start.with_axis(axis, &that.end.right_adjacent()),
                self.end.clone(),
                axis,
            )
        };
        match (covers_start, covers_end) {
            (true, true) => Remainder::None,
            (true, false) => Remainder::from_pieces(None, right()),
            (false, true) => Remainder::from_pieces(left(), None),
            (false, false) => Remainder::from_pieces(left(), right()),
        }
    }

    /// Set difference `self \ that` as pairwise-disjoint pieces.
    ///
    /// Axes are peeled off in order: the remainder on axis `k` is taken from
    /// `self` already narrowed to `that` on axes `0..k`, at full extent on the
    /// axes after `k`. In one dimension this yields zero, one or two pieces
    /// (None, Single, Split).
    pub fn excluding(&self, that: &Self) -> Vec<Self> {
        if !self.intersects(that) {
            return vec![self.clone()];
        }

        let mut pieces = Vec::new();
        let mut core = self.clone();
        for axis in 0..D::ARITY {
            pieces.extend(core.excluding_on(that, axis).into_vec());
            let narrowed_start = core.start.max_all(&that.start);
            let narrowed_end = core.end.min_all(&that.end);
            core = Self::checked(
                core.start.with_axis(axis, &narrowed_start),
                core.end.with_axis(axis, &narrowed_end),
            );
        }
        pieces
    }

    /// Partitions `self` into the overlap with `that` and the exclusion
    /// remainder, sorted by start. The pieces union back to exactly `self`.
    pub fn separate_using(&self, that: &Self) -> Vec<Self> {
        let mut pieces = self.excluding(that);
        if let Some(overlap) = self.intersection_with(that) {
            pieces.push(overlap);
        }
        pieces.sort();
        pieces
    }

    /// Everything after this interval, up to `Top`.
    ///
    /// `None` if this interval already reaches a sentinel.
    pub fn after(&self) -> Option<Self> {
        if self.end.is_unbounded_anywhere() {
            return None;
        }
        let start = self.end.right_adjacent();
        if start.is_unbounded_anywhere() {
            return None;
        }
        Some(Self::checked(start, D::top()))
    }

    /// Everything before this interval, down from `Bottom`.
    ///
    /// `None` if this interval already reaches a sentinel.
    pub fn before(&self) -> Option<Self> {
        if self.start.is_unbounded_anywhere() {
            return None;
        }
        let end = self.start.left_adjacent();
        if end.is_unbounded_anywhere() {
            return None;
        }
        Some(Self::checked(D::bottom(), end))
    }

    /// Merges `next` into `self` when `next` continues `self` along `axis` and
    /// both have the same extent on every other axis.
    pub fn merged_along(&self, next: &Self, axis: usize) -> Option<Self> {
        let expected_start = self.start.with_axis(axis, &self.end.right_adjacent());
        if next.start != expected_start || next.end.with_axis(axis, &self.end) != self.end {
            return None;
        }
        Some(Self::checked(self.start.clone(), next.end.clone()))
    }

    /// Merges adjacent intervals of a disjoint collection, sorted by start.
    pub fn compress_all(intervals: impl IntoIterator<Item = Self>) -> Vec<Self> {
        super::compress::compress_by_value(intervals.into_iter().map(|iv| (iv, ())))
            .into_iter()
            .map(|(iv, _)| iv)
            .collect()
    }
}

impl<T: DiscreteValue> Interval<DiscreteDomain<T>> {
    /// `[start, end]`
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn between(start: T, end: T) -> Self {
        Self::new(DiscreteDomain::Point(start), DiscreteDomain::Point(end))
    }

    /// `[start, +∞)`
    pub fn from_value(start: T) -> Self {
        Self::checked(DiscreteDomain::Point(start), DiscreteDomain::Top)
    }

    /// `(-∞, end]`
    pub fn to_value(end: T) -> Self {
        Self::checked(DiscreteDomain::Bottom, DiscreteDomain::Point(end))
    }

    /// `[value, value]`
    pub fn point(value: T) -> Self {
        Self::at(DiscreteDomain::Point(value))
    }
}

impl<T: ContinuousValue> Interval<ContinuousDomain<T>> {
    /// `[start, end]`
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn closed(start: T, end: T) -> Self {
        Self::new(ContinuousDomain::Point(start), ContinuousDomain::Point(end))
    }

    /// `[start, end)`
    ///
    /// # Panics
    ///
    /// Panics if `start >= end`.
    pub fn closed_open(start: T, end: T) -> Self {
        Self::new(ContinuousDomain::Point(start), ContinuousDomain::Below(end))
    }

    /// `(start, end]`
    ///
    /// # Panics
    ///
    /// Panics if `start >= end`.
    pub fn open_closed(start: T, end: T) -> Self {
        Self::new(ContinuousDomain::Above(start), ContinuousDomain::Point(end))
    }

    /// `(start, end)`
    ///
    /// # Panics
    ///
    /// Panics if `start >= end`.
    pub fn open(start: T, end: T) -> Self {
        Self::new(ContinuousDomain::Above(start), ContinuousDomain::Below(end))
    }

    /// `[start, +∞)`
    pub fn from_value(start: T) -> Self {
        Self::checked(ContinuousDomain::Point(start), ContinuousDomain::Top)
    }

    /// `(-∞, end)`
    pub fn to_value(end: T) -> Self {
        Self::checked(ContinuousDomain::Bottom, ContinuousDomain::Below(end))
    }
}

impl<A: Domain1D, B: Domain1D> Interval<(A, B)> {
    /// Cartesian product of two single-axis intervals
    pub fn cross(a: Interval<A>, b: Interval<B>) -> Self {
        Interval {
            start: (a.start, b.start),
            end: (a.end, b.end),
        }
    }
}

impl<A: Domain1D, B: Domain1D, C: Domain1D> Interval<(A, B, C)> {
    /// Cartesian product of three single-axis intervals
    pub fn cross3(a: Interval<A>, b: Interval<B>, c: Interval<C>) -> Self {
        Interval {
            start: (a.start, b.start, c.start),
            end: (a.end, b.end, c.end),
        }
    }
}

/// Returns true if `[start, end]` holds at least one point on `axis`.
fn has_points_on<D: Domain>(start: &D, end: &D, axis: usize) -> bool {
    start.axis_cmp(&D::top(), axis) != Ordering::Equal && end.axis_cmp(&D::bottom(), axis) != Ordering::Equal
}
