//! Domain value contract
//!
//! Value types plug into the interval machinery by supplying a total order,
//! finite bounds and an ordered hash onto `f64`. The hash is only used for
//! spatial pruning, so collisions are allowed; order inversions are not.

use std::fmt::Debug;
use std::hash::Hash;

use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Contract every axis value type supplies.
pub trait DomainValue: Clone + Ord + Hash + Debug + Send + Sync + 'static {
    /// Smallest representable value.
    fn min_value() -> Self;

    /// Largest representable value.
    fn max_value() -> Self;

    /// Weakly monotonic projection: `x < y` implies `x.ordered_hash() <= y.ordered_hash()`.
    fn ordered_hash(&self) -> f64;
}

/// A value type with well-defined neighbours.
pub trait DiscreteValue: DomainValue {
    /// The next value, `None` at `max_value`.
    fn successor(&self) -> Option<Self>;

    /// The previous value, `None` at `min_value`.
    fn predecessor(&self) -> Option<Self>;
}

/// Marker for value types used on continuous axes.
///
/// Continuous axes never ask for neighbours; adjacency is expressed by the
/// open/closed boundary of the point instead.
pub trait ContinuousValue: DomainValue {}

macro_rules! impl_integer_value {
    ($($t:ty),+) => {
        $(
            impl DomainValue for $t {
                fn min_value() -> Self {
                    <$t>::MIN
                }

                fn max_value() -> Self {
                    <$t>::MAX
                }

                fn ordered_hash(&self) -> f64 {
                    *self as f64
                }
            }

            impl DiscreteValue for $t {
                fn successor(&self) -> Option<Self> {
                    self.checked_add(1)
                }

                fn predecessor(&self) -> Option<Self> {
                    self.checked_sub(1)
                }
            }

            impl ContinuousValue for $t {}
        )+
    };
}

impl_integer_value!(i32, i64, u32, u64);

impl DomainValue for NaiveDate {
    fn min_value() -> Self {
        NaiveDate::MIN
    }

    fn max_value() -> Self {
        NaiveDate::MAX
    }

    fn ordered_hash(&self) -> f64 {
        use chrono::Datelike;
        f64::from(self.num_days_from_ce())
    }
}

impl DiscreteValue for NaiveDate {
    fn successor(&self) -> Option<Self> {
        self.succ_opt()
    }

    fn predecessor(&self) -> Option<Self> {
        self.pred_opt()
    }
}

impl DomainValue for NaiveDateTime {
    fn min_value() -> Self {
        NaiveDateTime::MIN
    }

    fn max_value() -> Self {
        NaiveDateTime::MAX
    }

    fn ordered_hash(&self) -> f64 {
        let utc = self.and_utc();
        utc.timestamp() as f64 + f64::from(self.nanosecond()) / 1e9
    }
}

impl ContinuousValue for NaiveDateTime {}
