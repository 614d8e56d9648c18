//! Mutation algorithms over the entry arena
//!
//! Each routine leaves the stored intervals pairwise disjoint. Callers hold
//! the store's write lock for the whole call.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use super::diff::DiffAction;
use super::state::StoreState;
use super::valid_data::ValidData;
use crate::domain::Domain;
use crate::interval::{compress_by_value, Interval};
use crate::observability::StoreMetrics;

impl<V, D> StoreState<V, D>
where
    V: Clone + Eq + Hash + Debug,
    D: Domain,
{
    /// Cuts `target` out of every entry it meets, writing `f(old)` over the
    /// cut when it returns `Some`. Returns the values whose entries changed,
    /// without compressing them.
    pub(crate) fn carve<F>(&mut self, target: &Interval<D>, f: F, metrics: &StoreMetrics) -> Vec<V>
    where
        F: Fn(&V) -> Option<V>,
    {
        let mut touched = Vec::new();
        for id in self.intersecting_ids(target, metrics) {
            let old = self.remove_entry(id);
            for piece in old.interval.excluding(target) {
                self.insert_entry(old.with_interval(piece));
            }
            if let Some(overlap) = old.interval.intersection_with(target) {
                if let Some(value) = f(&old.value) {
                    push_unique(&mut touched, value.clone());
                    self.insert_entry(ValidData::new(value, overlap));
                }
            }
            push_unique(&mut touched, old.value);
        }
        touched
    }

    /// Rewrites the overlap of `target` with each entry, then compresses.
    pub(crate) fn update_or_remove<F>(&mut self, target: &Interval<D>, f: F, metrics: &StoreMetrics) -> usize
    where
        F: Fn(&V) -> Option<V>,
    {
        let touched = self.carve(target, f, metrics);
        for value in &touched {
            self.compress(value);
        }
        touched.len()
    }

    /// Writes `data`, replacing whatever was there.
    pub(crate) fn set(&mut self, data: ValidData<V, D>, metrics: &StoreMetrics) {
        let mut touched = self.carve(&data.interval, |_| None, metrics);
        push_unique(&mut touched, data.value.clone());
        self.insert_entry(data);
        for value in &touched {
            self.compress(value);
        }
    }

    /// Writes `data` only where nothing is stored yet. Returns the number of
    /// pieces written.
    pub(crate) fn fill(&mut self, data: ValidData<V, D>, metrics: &StoreMetrics) -> usize {
        let mut remaining = vec![data.interval.clone()];
        for id in self.intersecting_ids(&data.interval, metrics) {
            let occupied = self.entry(id).interval.clone();
            remaining = remaining
                .into_iter()
                .flat_map(|piece| piece.excluding(&occupied))
                .collect();
        }
        let written = remaining.len();
        for piece in remaining {
            self.insert_entry(data.with_interval(piece));
        }
        if written > 0 {
            self.compress(&data.value);
        }
        written
    }

    /// Merges adjacent entries holding `value`. Returns the number of merges.
    pub(crate) fn compress(&mut self, value: &V) -> usize {
        let mut merges = 0;
        loop {
            let before = merges;
            for axis in 0..D::ARITY {
                let starts: Vec<D> = self
                    .entries_for(value)
                    .into_iter()
                    .map(|data| data.start().clone())
                    .collect();
                for start in starts {
                    while self.merge_next(&start, axis) {
                        merges += 1;
                    }
                }
            }
            if merges == before {
                return merges;
            }
        }
    }

    /// Absorbs the entry that continues the one at `start` along `axis`, if it
    /// holds the same value and shares every other axis.
    fn merge_next(&mut self, start: &D, axis: usize) -> bool {
        let Some(id) = self.id_at_start(start) else {
            return false;
        };
        let current = self.entry(id);
        let next_start = start.with_axis(axis, &current.interval.end().right_adjacent());
        if next_start == *start {
            return false;
        }
        let Some(next_id) = self.id_at_start(&next_start) else {
            return false;
        };
        let next = self.entry(next_id);
        if next.value != current.value {
            return false;
        }
        let Some(merged) = current.interval.merged_along(&next.interval, axis) else {
            return false;
        };
        let merged = current.with_interval(merged);
        self.remove_entry(next_id);
        self.replace_entry(id, merged);
        true
    }

    /// Splits every entry along every other entry's boundaries, then merges
    /// back axis by axis. The result depends only on the stored function,
    /// not on the history that produced it.
    pub(crate) fn recompress_all(&mut self) {
        let mut pieces: Vec<ValidData<V, D>> = self.iter().cloned().collect();
        for axis in 0..D::ARITY {
            let cuts = boundary_cuts(&pieces, axis);
            pieces = pieces
                .into_iter()
                .flat_map(|data| split_at_cuts(data, &cuts, axis))
                .collect();
        }

        let compressed = compress_by_value(pieces.into_iter().map(|data| (data.interval, data.value)));
        self.clear();
        for (interval, value) in compressed {
            self.insert_entry(ValidData::new(value, interval));
        }
    }

    /// Replays diff actions. Creates and updates overwrite whatever entry
    /// already starts at their key; deletes of absent keys are returned.
    pub(crate) fn apply_diff_actions(&mut self, actions: Vec<DiffAction<V, D>>) -> Vec<D> {
        let mut missing = Vec::new();
        for action in actions {
            match action {
                DiffAction::Create(data) | DiffAction::Update(data) => {
                    if let Some(id) = self.id_at_start(data.start()) {
                        self.remove_entry(id);
                    }
                    self.insert_entry(data);
                }
                DiffAction::Delete(start) => match self.id_at_start(&start) {
                    Some(id) => {
                        self.remove_entry(id);
                    }
                    None => missing.push(start),
                },
            }
        }
        missing
    }
}

fn push_unique<V: PartialEq>(values: &mut Vec<V>, value: V) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Every point on `axis` where some entry starts or where one could start
/// right after an entry ends, sorted and deduplicated on that axis.
///
/// Cuts that would leave a sentinel on either side are skipped: sentinels
/// are their own neighbours, so a piece ending there could never merge back.
fn boundary_cuts<V, D: Domain>(entries: &[ValidData<V, D>], axis: usize) -> Vec<D> {
    let mut cuts: Vec<D> = entries
        .iter()
        .flat_map(|data| [data.start().clone(), data.interval.end().right_adjacent()])
        .filter(|cut| !cut.is_unbounded_on(axis) && !cut.left_adjacent().is_unbounded_on(axis))
        .collect();
    cuts.sort_by(|a, b| a.axis_cmp(b, axis));
    cuts.dedup_by(|a, b| a.axis_cmp(b, axis) == Ordering::Equal);
    cuts
}

/// Splits one entry at each cut strictly inside its extent on `axis`.
fn split_at_cuts<V: Clone, D: Domain>(data: ValidData<V, D>, cuts: &[D], axis: usize) -> Vec<ValidData<V, D>> {
    let mut out = Vec::new();
    let mut rest = data.interval.clone();
    for cut in cuts {
        let inside = cut.axis_cmp(rest.start(), axis) == Ordering::Greater
            && cut.axis_cmp(rest.end(), axis) != Ordering::Greater;
        if !inside {
            continue;
        }
        let left = Interval::new(
            rest.start().clone(),
            rest.end().with_axis(axis, &cut.left_adjacent()),
        );
        let right = Interval::new(rest.start().with_axis(axis, cut), rest.end().clone());
        out.push(data.with_interval(left));
        rest = right;
    }
    out.push(data.with_interval(rest));
    out
}
