//! Attaching the hidden version axis to a logical coordinate

use super::selection::{VersionInterval, VersionPoint};
use crate::domain::{ContinuousDomain, ContinuousValue, DiscreteDomain, DiscreteValue, Domain, Domain1D};
use crate::interval::Interval;
use crate::store::ValidData;

/// A logical coordinate that can carry one extra version axis, placed last.
pub trait Versionable: Domain {
    /// The coordinate with the version axis appended
    type Versioned: Domain;

    /// Appends a version
    fn with_version(&self, version: &VersionPoint) -> Self::Versioned;

    /// Drops the version axis
    fn without_version(versioned: &Self::Versioned) -> Self;

    /// The version axis alone
    fn version_of(versioned: &Self::Versioned) -> VersionPoint;
}

/// The product of a logical interval with a version range.
pub(crate) fn versioned_interval<D: Versionable>(
    interval: &Interval<D>,
    versions: &VersionInterval,
) -> Interval<D::Versioned> {
    Interval::new(
        interval.start().with_version(versions.start()),
        interval.end().with_version(versions.end()),
    )
}

/// Splits a versioned interval into its logical part and its version range.
pub(crate) fn split_interval<D: Versionable>(
    interval: &Interval<D::Versioned>,
) -> (Interval<D>, VersionInterval) {
    let logical = Interval::new(
        D::without_version(interval.start()),
        D::without_version(interval.end()),
    );
    let versions = Interval::new(D::version_of(interval.start()), D::version_of(interval.end()));
    (logical, versions)
}

/// The logical part of a versioned entry.
pub(crate) fn project<V: Clone, D: Versionable>(data: &ValidData<V, D::Versioned>) -> ValidData<V, D> {
    let (logical, _) = split_interval::<D>(&data.interval);
    ValidData::new(data.value.clone(), logical)
}

macro_rules! impl_versionable_for_axis {
    ($ty:ident, $bound:ident) => {
        impl<T: $bound> Versionable for $ty<T> {
            type Versioned = ($ty<T>, VersionPoint);

            fn with_version(&self, version: &VersionPoint) -> Self::Versioned {
                (self.clone(), version.clone())
            }

            fn without_version(versioned: &Self::Versioned) -> Self {
                versioned.0.clone()
            }

            fn version_of(versioned: &Self::Versioned) -> VersionPoint {
                versioned.1.clone()
            }
        }
    };
}

impl_versionable_for_axis!(DiscreteDomain, DiscreteValue);
impl_versionable_for_axis!(ContinuousDomain, ContinuousValue);

macro_rules! impl_versionable_for_tuple {
    ($version:tt; $($name:ident : $idx:tt),+) => {
        impl<$($name: Domain1D),+> Versionable for ($($name,)+) {
            type Versioned = ($($name,)+ VersionPoint);

            fn with_version(&self, version: &VersionPoint) -> Self::Versioned {
                ($(self.$idx.clone(),)+ version.clone())
            }

            fn without_version(versioned: &Self::Versioned) -> Self {
                ($(versioned.$idx.clone(),)+)
            }

            fn version_of(versioned: &Self::Versioned) -> VersionPoint {
                versioned.$version.clone()
            }
        }
    };
}

impl_versionable_for_tuple!(1; A: 0);
impl_versionable_for_tuple!(2; A: 0, B: 1);
impl_versionable_for_tuple!(3; A: 0, B: 1, C: 2);
impl_versionable_for_tuple!(4; A: 0, B: 1, C: 2, D: 3);
