//! The disjoint-interval store

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::config::{StoreConfig, Validation};
use super::diff::DiffAction;
use super::errors::{StoreError, StoreResult};
use super::state::StoreState;
use super::valid_data::ValidData;
use crate::domain::Domain;
use crate::interval::Interval;
use crate::observability::{log_event_lazy, Event, MetricsSnapshot, StoreMetrics};

/// A partial function from disjoint intervals over `D` to values.
///
/// # Thread Safety
///
/// State sits behind one `RwLock`. Every mutation holds the write lock for
/// its whole duration, so readers never see a half-applied update.
pub struct DataStore<V, D>
where
    V: Clone + Eq + Hash + Debug,
    D: Domain,
{
    state: RwLock<StoreState<V, D>>,
    metrics: StoreMetrics,
}

impl<V, D> DataStore<V, D>
where
    V: Clone + Eq + Hash + Debug,
    D: Domain,
{
    /// An empty store with the default config
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// An empty store
    pub fn with_config(config: StoreConfig) -> Self {
        log_event_lazy(Event::StoreCreated, || vec![("search", format!("{:?}", config.search))]);
        Self::from_state(StoreState::new(config))
    }

    /// A store holding `value` over the entire domain
    pub fn of(value: V) -> Self {
        Self::of_with_config(value, StoreConfig::default())
    }

    /// A store holding `value` over the entire domain
    pub fn of_with_config(value: V, config: StoreConfig) -> Self {
        let data = ValidData::new(value, Interval::unbounded());
        log_event_lazy(Event::StoreCreated, || vec![("search", format!("{:?}", config.search))]);
        Self::from_state(StoreState::from_entries(vec![data], config))
    }

    /// Loads initial data.
    ///
    /// With `Validation::Permissive` the data is trusted to be disjoint. With
    /// `Validation::Strict` every pair is checked and the first overlap is
    /// reported as `OverlappingData`.
    pub fn from_data(
        data: impl IntoIterator<Item = ValidData<V, D>>,
        config: StoreConfig,
    ) -> StoreResult<Self> {
        let mut entries: Vec<_> = data.into_iter().collect();
        entries.sort_by(|a, b| a.start().cmp(b.start()));

        let state = match config.validation {
            Validation::Permissive => StoreState::from_entries(entries, config),
            Validation::Strict => Self::validated(entries, config)?,
        };
        log_event_lazy(Event::StoreLoaded, || {
            vec![
                ("entries", state.len().to_string()),
                ("validation", format!("{:?}", config.validation)),
            ]
        });
        Ok(Self::from_state(state))
    }

    fn validated(entries: Vec<ValidData<V, D>>, config: StoreConfig) -> StoreResult<StoreState<V, D>> {
        let scratch = StoreMetrics::new();
        let mut state = StoreState::new(config);
        for data in entries {
            if let Some(id) = state.intersecting_ids(&data.interval, &scratch).first() {
                let err = StoreError::OverlappingData {
                    first: format!("{:?}", state.entry(*id).interval),
                    second: format!("{:?}", data.interval),
                };
                log_event_lazy(Event::ValidationFailed, || vec![("error", err.to_string())]);
                return Err(err);
            }
            state.insert_entry(data);
        }
        Ok(state)
    }

    fn from_state(state: StoreState<V, D>) -> Self {
        Self {
            state: RwLock::new(state),
            metrics: StoreMetrics::new(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState<V, D>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState<V, D>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs one mutation under the write lock.
    fn mutate<R>(&self, op: impl FnOnce(&mut StoreState<V, D>, &StoreMetrics) -> R) -> R {
        let mut state = self.write();
        let out = op(&mut state, &self.metrics);
        if cfg!(debug_assertions) {
            state.check_consistency();
        }
        self.metrics.increment_mutations();
        out
    }

    /// The store's configuration
    pub fn config(&self) -> StoreConfig {
        *self.read().config()
    }

    /// Search and mutation counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Reads

    /// The value at `point`, if any. Sentinel points hold no data.
    pub fn get_at(&self, point: &D) -> Option<V> {
        if point.is_unbounded_anywhere() {
            return None;
        }
        let state = self.read();
        let ids = state.intersecting_ids(&Interval::at(point.clone()), &self.metrics);
        ids.first().map(|id| state.entry(*id).value.clone())
    }

    /// The value at `point`, or `UndefinedPoint`
    pub fn apply_at(&self, point: &D) -> StoreResult<V> {
        self.get_at(point)
            .ok_or_else(|| StoreError::UndefinedPoint(format!("{:?}", point)))
    }

    /// Every entry intersecting `interval`, ordered by start
    pub fn get_intersecting(&self, interval: &Interval<D>) -> Vec<ValidData<V, D>> {
        let state = self.read();
        state
            .intersecting_ids(interval, &self.metrics)
            .into_iter()
            .map(|id| state.entry(id).clone())
            .collect()
    }

    /// Returns true if any entry intersects `interval`
    pub fn intersects(&self, interval: &Interval<D>) -> bool {
        !self.read().intersecting_ids(interval, &self.metrics).is_empty()
    }

    /// Every entry, ordered by start
    pub fn get_all(&self) -> Vec<ValidData<V, D>> {
        self.read().iter().cloned().collect()
    }

    /// Every entry holding `value`, ordered by start
    pub fn get_data_for(&self, value: &V) -> Vec<ValidData<V, D>> {
        self.read().entries_for(value).into_iter().cloned().collect()
    }

    /// Distinct values, in order of their first entry
    pub fn values(&self) -> Vec<V> {
        let state = self.read();
        let mut seen = HashSet::new();
        state
            .iter()
            .filter(|data| seen.insert(&data.value))
            .map(|data| data.value.clone())
            .collect()
    }

    /// The occupied region as compressed intervals
    pub fn domain(&self) -> Vec<Interval<D>> {
        Interval::compress_all(self.read().iter().map(|data| data.interval.clone()))
    }

    /// The unoccupied region as compressed intervals
    pub fn domain_complement(&self) -> Vec<Interval<D>> {
        let mut gaps = vec![Interval::unbounded()];
        for occupied in self.domain() {
            gaps = gaps
                .into_iter()
                .flat_map(|gap| gap.excluding(&occupied))
                .collect();
        }
        Interval::compress_all(gaps)
    }

    /// A new store with only the entries matching `keep`
    pub fn filter(&self, keep: impl Fn(&ValidData<V, D>) -> bool) -> Self {
        let state = self.read();
        let entries: Vec<_> = state.iter().filter(|data| keep(data)).cloned().collect();
        Self::from_state(StoreState::from_entries(entries, *state.config()))
    }

    // Mutations

    /// Over `target`, replaces each old value with `f(old)`, or removes it
    /// where `f` returns `None`. Untouched parts keep their old value.
    pub fn update_or_remove(&self, target: &Interval<D>, f: impl Fn(&V) -> Option<V>) {
        let touched = self.mutate(|state, metrics| state.update_or_remove(target, f, metrics));
        log_event_lazy(Event::UpdateApplied, || {
            vec![
                ("interval", format!("{:?}", target)),
                ("values", touched.to_string()),
            ]
        });
    }

    /// Writes `data`, overwriting anything already in its interval
    pub fn set(&self, data: ValidData<V, D>) {
        self.mutate(|state, metrics| state.set(data, metrics));
    }

    /// Writes `data` only if its interval is entirely unoccupied.
    /// Returns false, changing nothing, on a conflict.
    pub fn set_if_no_conflict(&self, data: ValidData<V, D>) -> bool {
        self.mutate(|state, metrics| {
            if !state.intersecting_ids(&data.interval, metrics).is_empty() {
                return false;
            }
            let value = data.value.clone();
            state.insert_entry(data);
            state.compress(&value);
            true
        })
    }

    /// Writes `data` only where something is already stored
    pub fn update(&self, data: ValidData<V, D>) {
        let ValidData { value, interval } = data;
        self.update_or_remove(&interval, |_| Some(value.clone()));
    }

    /// Removes the entry starting at `old`'s start, whatever its current
    /// extent, then writes `new`.
    pub fn replace(&self, old: &ValidData<V, D>, new: ValidData<V, D>) {
        self.mutate(|state, metrics| {
            if let Some(id) = state.id_at_start(old.start()) {
                state.remove_entry(id);
            }
            state.set(new, metrics);
        });
    }

    /// Removes everything inside `interval`
    pub fn remove(&self, interval: &Interval<D>) {
        self.update_or_remove(interval, |_| None);
    }

    /// Writes `data` into the unoccupied parts of its interval only
    pub fn fill(&self, data: ValidData<V, D>) {
        let written = self.mutate(|state, metrics| state.fill(data, metrics));
        log_event_lazy(Event::FillApplied, || vec![("pieces", written.to_string())]);
    }

    /// Merges adjacent entries holding `value`
    pub fn compress(&self, value: &V) {
        self.mutate(|state, _| state.compress(value));
    }

    /// Brings every entry to the canonical compressed form
    pub fn recompress_all(&self) {
        let entries = self.mutate(|state, _| {
            state.recompress_all();
            state.len()
        });
        log_event_lazy(Event::Recompressed, || vec![("entries", entries.to_string())]);
    }

    // Synchronization

    /// Actions that turn `old` into `self`, ordered by start key
    pub fn diff_actions_from(&self, old: &Self) -> Vec<DiffAction<V, D>> {
        let before: BTreeMap<D, ValidData<V, D>> = old
            .get_all()
            .into_iter()
            .map(|data| (data.start().clone(), data))
            .collect();
        let after = self.get_all();
        diff_by_start(before, after)
    }

    /// Replays actions from `diff_actions_from`.
    ///
    /// Creates and updates overwrite whatever entry starts at their key. A
    /// delete of a key that is not present is skipped with a warning.
    pub fn apply_diff_actions(&self, actions: Vec<DiffAction<V, D>>) {
        let count = actions.len();
        let missing = self.mutate(|state, _| state.apply_diff_actions(actions));
        for start in &missing {
            log_event_lazy(Event::DiffTargetMissing, || vec![("start", format!("{:?}", start))]);
        }
        log_event_lazy(Event::DiffApplied, || {
            vec![
                ("actions", count.to_string()),
                ("missing", missing.len().to_string()),
            ]
        });
    }

    /// Makes `self` hold exactly what `other` holds
    pub fn sync_with(&self, other: &Self) {
        let actions = other.diff_actions_from(self);
        self.apply_diff_actions(actions);
    }
}

/// Merges two start-keyed snapshots into ordered actions.
fn diff_by_start<V, D>(
    mut before: BTreeMap<D, ValidData<V, D>>,
    after: Vec<ValidData<V, D>>,
) -> Vec<DiffAction<V, D>>
where
    V: PartialEq,
    D: Domain,
{
    let mut actions: BTreeMap<D, DiffAction<V, D>> = BTreeMap::new();
    for data in after {
        let start = data.start().clone();
        match before.remove(&start) {
            None => {
                actions.insert(start, DiffAction::Create(data));
            }
            Some(old) if old != data => {
                actions.insert(start, DiffAction::Update(data));
            }
            Some(_) => {}
        }
    }
    for start in before.into_keys() {
        actions.insert(start.clone(), DiffAction::Delete(start));
    }
    actions.into_values().collect()
}

impl<V, D> Default for DataStore<V, D>
where
    V: Clone + Eq + Hash + Debug,
    D: Domain,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, D> Clone for DataStore<V, D>
where
    V: Clone + Eq + Hash + Debug,
    D: Domain,
{
    /// Copies the contents; counters start from zero.
    fn clone(&self) -> Self {
        Self::from_state(self.read().clone())
    }
}

impl<V, D> Debug for DataStore<V, D>
where
    V: Clone + Eq + Hash + Debug,
    D: Domain,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStore")
            .field("entries", &self.get_all())
            .field("config", &self.config())
            .finish()
    }
}
