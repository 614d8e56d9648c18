//! Diff actions between two store snapshots

use serde::{Deserialize, Serialize};

use super::valid_data::ValidData;
use crate::domain::Domain;

/// One step turning an old snapshot into a new one, keyed by entry start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Serialize, D: Serialize",
    deserialize = "V: Deserialize<'de>, D: Domain + Deserialize<'de>"
))]
pub enum DiffAction<V, D> {
    /// An entry starting here exists only in the new snapshot
    Create(ValidData<V, D>),
    /// The entry starting here changed its value or its end
    Update(ValidData<V, D>),
    /// The entry starting here exists only in the old snapshot
    Delete(D),
}

impl<V, D: Domain> DiffAction<V, D> {
    /// The start key this action applies to
    pub fn start(&self) -> &D {
        match self {
            DiffAction::Create(data) | DiffAction::Update(data) => data.start(),
            DiffAction::Delete(start) => start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DiscreteDomain;
    use crate::interval::Interval;

    type D = DiscreteDomain<i32>;

    #[test]
    fn test_start_key() {
        let create = DiffAction::Create(ValidData::new(1u8, Interval::<D>::between(3, 9)));
        assert_eq!(*create.start(), DiscreteDomain::Point(3));
        let delete: DiffAction<u8, D> = DiffAction::Delete(DiscreteDomain::Bottom);
        assert_eq!(*delete.start(), DiscreteDomain::Bottom);
    }

    #[test]
    fn test_stream_serializes_tagged() {
        let actions: Vec<DiffAction<String, D>> = vec![
            DiffAction::Delete(DiscreteDomain::Point(1)),
            DiffAction::Update(ValidData::new("B".to_string(), Interval::between(4, 5))),
        ];
        let json = serde_json::to_string(&actions).unwrap();
        assert!(json.contains("\"Delete\""));
        assert!(json.contains("\"Update\""));
        let back: Vec<DiffAction<String, D>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, actions);
    }
}
