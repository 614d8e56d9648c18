//! Axis-aligned boxes in `f64` space

use crate::domain::Domain;
use crate::interval::Interval;

/// A closed axis-aligned box, one `[min, max]` range per axis.
///
/// A lossy projection of an interval; never authoritative.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl BoundingBox {
    /// Creates a box from per-axis corners.
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Self {
        debug_assert_eq!(min.len(), max.len(), "corner arity mismatch");
        debug_assert!(
            min.iter().zip(&max).all(|(lo, hi)| lo <= hi),
            "inverted box {:?}..{:?}",
            min,
            max
        );
        Self { min, max }
    }

    /// Projects an interval through the ordered hash of its bounds.
    pub fn from_interval<D: Domain>(interval: &Interval<D>) -> Self {
        Self::new(interval.start().ordered_hashes(), interval.end().ordered_hashes())
    }

    /// The box covering the whole hash range of a domain.
    pub fn domain_bounds<D: Domain>() -> Self {
        Self::from_interval(&Interval::<D>::unbounded())
    }

    /// Number of axes
    pub fn arity(&self) -> usize {
        self.min.len()
    }

    /// Lower corner
    pub fn min(&self) -> &[f64] {
        &self.min
    }

    /// Upper corner
    pub fn max(&self) -> &[f64] {
        &self.max
    }

    /// Returns true if the boxes share at least one point
    pub fn intersects(&self, other: &Self) -> bool {
        (0..self.arity()).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// Returns true if `other` lies entirely inside
    pub fn contains(&self, other: &Self) -> bool {
        (0..self.arity()).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }

    /// Per-axis midpoint, computed without overflowing at `f64::MAX` extents.
    pub fn midpoint(&self) -> Vec<f64> {
        self.min
            .iter()
            .zip(&self.max)
            .map(|(lo, hi)| lo / 2.0 + hi / 2.0)
            .collect()
    }

    /// The `2^N` boxes obtained by halving every axis at the midpoint.
    ///
    /// Bit `k` of the child index selects the upper half of axis `k`.
    pub fn children(&self) -> Vec<BoundingBox> {
        let mid = self.midpoint();
        let arity = self.arity();
        (0..1usize << arity)
            .map(|index| {
                let mut min = Vec::with_capacity(arity);
                let mut max = Vec::with_capacity(arity);
                for axis in 0..arity {
                    if index & (1 << axis) == 0 {
                        min.push(self.min[axis]);
                        max.push(mid[axis]);
                    } else {
                        min.push(mid[axis]);
                        max.push(self.max[axis]);
                    }
                }
                BoundingBox::new(min, max)
            })
            .collect()
    }

    /// Clamps every coordinate into `bounds`.
    ///
    /// Clamping is monotone per coordinate, so two boxes that overlap still
    /// overlap after clamping.
    pub fn clamped_to(&self, bounds: &BoundingBox) -> Self {
        let clamp = |v: f64, axis: usize| v.max(bounds.min[axis]).min(bounds.max[axis]);
        Self {
            min: self.min.iter().enumerate().map(|(i, v)| clamp(*v, i)).collect(),
            max: self.max.iter().enumerate().map(|(i, v)| clamp(*v, i)).collect(),
        }
    }
}
