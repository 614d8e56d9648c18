//! Entry arena and the three indices kept over it
//!
//! Every entry lives in one arena slot. The start index, the value index and
//! the box index are only ever changed together, through `insert_entry`,
//! `remove_entry` and `replace_entry`.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use super::config::{SearchStrategy, StoreConfig};
use super::valid_data::ValidData;
use crate::boxtree::{BoundingBox, BoxTree};
use crate::domain::Domain;
use crate::interval::Interval;
use crate::observability::{log_event_with_fields, Event, StoreMetrics};

/// Handle to an arena slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct EntryId(usize);

/// Store contents, guarded as a unit by the store's lock.
#[derive(Debug, Clone)]
pub(crate) struct StoreState<V, D>
where
    V: Clone + Eq + Hash,
    D: Domain,
{
    slots: Vec<Option<ValidData<V, D>>>,
    free: Vec<usize>,
    by_start: BTreeMap<D, EntryId>,
    by_value: HashMap<V, BTreeSet<EntryId>>,
    index: BoxTree<EntryId>,
    config: StoreConfig,
}

impl<V, D> StoreState<V, D>
where
    V: Clone + Eq + Hash + Debug,
    D: Domain,
{
    /// An empty state
    pub(crate) fn new(config: StoreConfig) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            by_start: BTreeMap::new(),
            by_value: HashMap::new(),
            index: BoxTree::new(BoundingBox::domain_bounds::<D>(), config.box_tree),
            config,
        }
    }

    /// Bulk-loads entries the caller has already established to be disjoint.
    pub(crate) fn from_entries(entries: Vec<ValidData<V, D>>, config: StoreConfig) -> Self {
        let mut by_start = BTreeMap::new();
        let mut by_value: HashMap<V, BTreeSet<EntryId>> = HashMap::new();
        let mut boxes = Vec::with_capacity(entries.len());
        for (slot, data) in entries.iter().enumerate() {
            let id = EntryId(slot);
            let previous = by_start.insert(data.start().clone(), id);
            debug_assert!(previous.is_none(), "duplicate start {:?}", data.start());
            by_value.entry(data.value.clone()).or_default().insert(id);
            boxes.push((BoundingBox::from_interval(&data.interval), id));
        }
        let index = BoxTree::from_items(BoundingBox::domain_bounds::<D>(), boxes, config.box_tree);
        Self {
            slots: entries.into_iter().map(Some).collect(),
            free: Vec::new(),
            by_start,
            by_value,
            index,
            config,
        }
    }

    pub(crate) fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub(crate) fn len(&self) -> usize {
        self.by_start.len()
    }

    /// The live entry in a slot.
    ///
    /// Ids come from the indices, which never hold a vacated slot.
    pub(crate) fn entry(&self, id: EntryId) -> &ValidData<V, D> {
        match &self.slots[id.0] {
            Some(data) => data,
            None => unreachable!("index references vacated slot {:?}", id),
        }
    }

    /// Id of the entry starting exactly at `start`
    pub(crate) fn id_at_start(&self, start: &D) -> Option<EntryId> {
        self.by_start.get(start).copied()
    }

    /// Every entry, ordered by start
    pub(crate) fn iter(&self) -> impl Iterator<Item = &ValidData<V, D>> + '_ {
        self.by_start.values().map(move |id| self.entry(*id))
    }

    /// Every entry holding `value`, ordered by start
    pub(crate) fn entries_for(&self, value: &V) -> Vec<&ValidData<V, D>> {
        let mut found: Vec<_> = match self.by_value.get(value) {
            Some(ids) => ids.iter().map(|id| self.entry(*id)).collect(),
            None => Vec::new(),
        };
        found.sort_by(|a, b| a.start().cmp(b.start()));
        found
    }

    pub(crate) fn insert_entry(&mut self, data: ValidData<V, D>) -> EntryId {
        let id = match self.free.pop() {
            Some(slot) => EntryId(slot),
            None => {
                self.slots.push(None);
                EntryId(self.slots.len() - 1)
            }
        };
        let previous = self.by_start.insert(data.start().clone(), id);
        debug_assert!(previous.is_none(), "duplicate start {:?}", data.start());
        self.by_value.entry(data.value.clone()).or_default().insert(id);
        self.index.insert(BoundingBox::from_interval(&data.interval), id);
        self.slots[id.0] = Some(data);
        id
    }

    pub(crate) fn remove_entry(&mut self, id: EntryId) -> ValidData<V, D> {
        let data = match self.slots[id.0].take() {
            Some(data) => data,
            None => unreachable!("removing vacated slot {:?}", id),
        };
        self.free.push(id.0);
        self.by_start.remove(data.start());
        if let Some(ids) = self.by_value.get_mut(&data.value) {
            ids.remove(&id);
            if ids.is_empty() {
                self.by_value.remove(&data.value);
            }
        }
        let removed = self.index.remove(&BoundingBox::from_interval(&data.interval), id);
        debug_assert!(removed, "box index lost entry {:?}", id);
        data
    }

    pub(crate) fn replace_entry(&mut self, id: EntryId, data: ValidData<V, D>) -> EntryId {
        self.remove_entry(id);
        self.insert_entry(data)
    }

    /// Drops every entry, keeping the configuration
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.by_start.clear();
        self.by_value.clear();
        self.index.clear();
    }

    /// Ids of every entry intersecting `interval`, ordered by start.
    pub(crate) fn intersecting_ids(&self, interval: &Interval<D>, metrics: &StoreMetrics) -> Vec<EntryId> {
        match self.config.search {
            SearchStrategy::Indexed => self.indexed_search(interval, metrics),
            SearchStrategy::Linear => self.linear_search(interval, metrics),
            SearchStrategy::Verified => {
                let indexed = self.indexed_search(interval, metrics);
                let linear = self.linear_search(interval, metrics);
                if indexed != linear {
                    log_event_with_fields(
                        Event::IndexMismatch,
                        &[
                            ("indexed", &indexed.len().to_string()),
                            ("interval", &format!("{:?}", interval)),
                            ("linear", &linear.len().to_string()),
                        ],
                    );
                }
                assert_eq!(indexed, linear, "box index disagrees with linear scan for {:?}", interval);
                indexed
            }
        }
    }

    fn indexed_search(&self, interval: &Interval<D>, metrics: &StoreMetrics) -> Vec<EntryId> {
        let candidates = self.index.query(&BoundingBox::from_interval(interval));
        let examined = candidates.len();
        let mut hits: Vec<EntryId> = candidates
            .into_iter()
            .filter(|id| self.entry(*id).interval.intersects(interval))
            .collect();
        metrics.record_indexed_search(examined, hits.len());
        hits.sort_by(|a, b| self.entry(*a).start().cmp(self.entry(*b).start()));
        hits
    }

    fn linear_search(&self, interval: &Interval<D>, metrics: &StoreMetrics) -> Vec<EntryId> {
        metrics.record_linear_search();
        self.by_start
            .values()
            .copied()
            .filter(|id| self.entry(*id).interval.intersects(interval))
            .collect()
    }

    /// Checks that the three indices agree with the arena.
    pub(crate) fn check_consistency(&self) {
        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(live, self.by_start.len(), "start index size");
        assert_eq!(live, self.index.len(), "box index size");
        assert_eq!(
            live,
            self.by_value.values().map(BTreeSet::len).sum::<usize>(),
            "value index size"
        );
        for (start, id) in &self.by_start {
            let data = self.entry(*id);
            assert_eq!(data.start(), start, "start index key");
            assert!(
                self.by_value.get(&data.value).is_some_and(|ids| ids.contains(id)),
                "value index missing {:?}",
                id
            );
        }
    }
}
