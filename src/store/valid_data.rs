//! Values paired with the interval they hold over

use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::interval::Interval;

/// A value valid over an interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Serialize, D: Serialize",
    deserialize = "V: Deserialize<'de>, D: Domain + Deserialize<'de>"
))]
pub struct ValidData<V, D> {
    pub value: V,
    pub interval: Interval<D>,
}

impl<V, D: Domain> ValidData<V, D> {
    /// Pairs a value with an interval
    pub fn new(value: V, interval: Interval<D>) -> Self {
        Self { value, interval }
    }

    /// The same value over a different interval
    pub fn with_interval(&self, interval: Interval<D>) -> Self
    where
        V: Clone,
    {
        Self::new(self.value.clone(), interval)
    }

    /// Start of the interval, the store's key for this entry
    pub fn start(&self) -> &D {
        self.interval.start()
    }
}

impl<V, D> From<(Interval<D>, V)> for ValidData<V, D> {
    fn from((interval, value): (Interval<D>, V)) -> Self {
        Self { value, interval }
    }
}
