//! Compression of interval collections
//!
//! Merges pairs that continue each other along one axis, share their extent on
//! every other axis and carry equal values. Axes are swept in order and the
//! sweep repeats until a full pass merges nothing, since a merge along one
//! axis can line pieces up along another.

use std::collections::BTreeMap;

use super::algebra::Interval;
use crate::domain::Domain;

/// Compresses a collection of pairwise-disjoint `(interval, value)` pairs.
///
/// Output is sorted by interval start. Inputs must be disjoint: entries are
/// keyed by start, so two inputs with the same start keep only the last.
pub fn compress_by_value<D, V>(items: impl IntoIterator<Item = (Interval<D>, V)>) -> Vec<(Interval<D>, V)>
where
    D: Domain,
    V: Clone + PartialEq,
{
    let mut by_start: BTreeMap<D, (Interval<D>, V)> = items
        .into_iter()
        .map(|(interval, value)| (interval.start().clone(), (interval, value)))
        .collect();

    loop {
        let mut merged_any = false;
        for axis in 0..D::ARITY {
            let keys: Vec<D> = by_start.keys().cloned().collect();
            for key in keys {
                while merge_next(&mut by_start, &key, axis) {
                    merged_any = true;
                }
            }
        }
        if !merged_any {
            break;
        }
    }

    by_start.into_values().collect()
}

/// Merges the successor of `key` along `axis` into it, if there is one.
fn merge_next<D, V>(by_start: &mut BTreeMap<D, (Interval<D>, V)>, key: &D, axis: usize) -> bool
where
    D: Domain,
    V: Clone + PartialEq,
{
    let (interval, value) = match by_start.get(key) {
        Some(entry) => entry,
        None => return false,
    };
    let next_start = interval.start().with_axis(axis, &interval.end().right_adjacent());
    if next_start == *key {
        return false;
    }
    let merged = match by_start.get(&next_start) {
        Some((next, next_value)) if next_value == value => interval.merged_along(next, axis),
        _ => None,
    };

    match merged {
        Some(merged) => {
            by_start.remove(&next_start);
            if let Some(entry) = by_start.get_mut(key) {
                entry.0 = merged;
            }
            true
        }
        None => false,
    }
}
