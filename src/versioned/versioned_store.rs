//! A disjoint-interval store with a hidden version axis

use std::fmt::Debug;
use std::hash::Hash;

use super::selection::{VersionInterval, VersionSelection, UNAPPROVED_VERSION};
use super::versionable::{project, versioned_interval, Versionable};
use crate::domain::DiscreteDomain;
use crate::interval::{compress_by_value, Interval};
use crate::observability::{log_event_lazy, Event};
use crate::store::{DataStore, DiffAction, StoreConfig, StoreError, StoreResult, ValidData, Validation};

/// Logical data over `D`, stored with its version history.
///
/// Every entry of the underlying store spans a range of versions. Data whose
/// range covers the current version is what `Current` reads see; data whose
/// range reaches `UNAPPROVED_VERSION` but not the current version is pending.
///
/// # Concurrency
///
/// Writes and cursor moves take `&mut self`: one writer at a time, enforced by
/// the borrow checker. Share behind a lock for concurrent writers.
pub struct VersionedStore<V, D>
where
    V: Clone + Eq + Hash + Debug,
    D: Versionable,
{
    store: DataStore<V, D::Versioned>,
    current: i32,
}

impl<V, D> VersionedStore<V, D>
where
    V: Clone + Eq + Hash + Debug,
    D: Versionable,
{
    /// An empty store at version 0
    pub fn new() -> Self {
        Self {
            store: DataStore::new(),
            current: 0,
        }
    }

    /// Loads logical data valid from `initial_version` onward.
    pub fn from_data(
        data: impl IntoIterator<Item = ValidData<V, D>>,
        initial_version: i32,
        config: StoreConfig,
    ) -> StoreResult<Self> {
        check_version(initial_version)?;
        let versions = VersionInterval::from_value(initial_version);
        let versioned = data
            .into_iter()
            .map(|d| ValidData::new(d.value, versioned_interval(&d.interval, &versions)));
        Ok(Self {
            store: DataStore::from_data(versioned, config)?,
            current: initial_version,
        })
    }

    /// `value` everywhere, from `initial_version` onward
    pub fn of(value: V, initial_version: i32) -> StoreResult<Self> {
        Self::from_data(
            [ValidData::new(value, Interval::unbounded())],
            initial_version,
            StoreConfig::default(),
        )
    }

    /// The full history, one axis wider than the logical data
    pub fn underlying(&self) -> &DataStore<V, D::Versioned> {
        &self.store
    }

    fn at_version(&self, interval: &Interval<D>, selection: VersionSelection) -> Interval<D::Versioned> {
        let version = selection.read_version(self.current);
        versioned_interval(interval, &VersionInterval::point(version))
    }

    fn over_versions(&self, interval: &Interval<D>, selection: VersionSelection) -> Interval<D::Versioned> {
        versioned_interval(interval, &selection.write_interval(self.current))
    }

    // Cursor

    /// The current version
    pub fn current_version(&self) -> i32 {
        self.current
    }

    /// Moves the cursor. Fails at or beyond the reserved unapproved version.
    pub fn set_current_version(&mut self, version: i32) -> StoreResult<()> {
        check_version(version)?;
        let from = self.current;
        self.current = version;
        log_event_lazy(Event::VersionChanged, || {
            vec![("from", from.to_string()), ("to", version.to_string())]
        });
        Ok(())
    }

    /// Advances the cursor by one and returns the new version
    pub fn increment_current_version(&mut self) -> StoreResult<i32> {
        let next = self.current.saturating_add(1);
        self.set_current_version(next)?;
        Ok(next)
    }

    /// Drops all history after `version`, pending edits included, and makes
    /// the snapshot at `version` valid from there onward. Moves the cursor to
    /// `version`.
    pub fn reset_to_version(&mut self, version: i32) -> StoreResult<()> {
        check_version(version)?;
        let snapshot = self.get_selected_data(VersionSelection::Specific(version));
        let forward = VersionInterval::from_value(version);
        self.store.remove(&versioned_interval(&Interval::<D>::unbounded(), &forward));
        for data in snapshot {
            self.store
                .set(ValidData::new(data.value, versioned_interval(&data.interval, &forward)));
        }
        self.current = version;
        log_event_lazy(Event::VersionReset, || vec![("version", version.to_string())]);
        Ok(())
    }

    /// Replaces the whole history with the selected snapshot, valid at every
    /// version. The cursor is unchanged.
    pub fn collapse_version_history(&mut self, selection: VersionSelection) {
        let snapshot = self.get_selected_data(selection);
        let entries = snapshot.len();
        let everywhere = VersionInterval::unbounded();
        self.store.remove(&Interval::unbounded());
        for data in snapshot {
            self.store
                .set(ValidData::new(data.value, versioned_interval(&data.interval, &everywhere)));
        }
        log_event_lazy(Event::HistoryCollapsed, || {
            vec![
                ("entries", entries.to_string()),
                ("selection", format!("{:?}", selection)),
            ]
        });
    }

    // Reads

    /// The logical snapshot seen by `selection`, compressed
    pub fn get_selected_data(&self, selection: VersionSelection) -> Vec<ValidData<V, D>> {
        self.get_intersecting(&Interval::unbounded(), selection)
    }

    /// The logical snapshot seen by `selection`, as its own store
    pub fn get_selected_store(&self, selection: VersionSelection) -> DataStore<V, D> {
        let config = StoreConfig {
            validation: Validation::Permissive,
            ..self.store.config()
        };
        match DataStore::from_data(self.get_selected_data(selection), config) {
            Ok(store) => store,
            Err(e) => unreachable!("permissive load cannot fail: {}", e),
        }
    }

    /// The value at `point` under `selection`
    pub fn get_at(&self, point: &D, selection: VersionSelection) -> Option<V> {
        let version = DiscreteDomain::Point(selection.read_version(self.current));
        self.store.get_at(&point.with_version(&version))
    }

    /// Entries intersecting `interval` under `selection`, compressed
    pub fn get_intersecting(&self, interval: &Interval<D>, selection: VersionSelection) -> Vec<ValidData<V, D>> {
        let hits = self.store.get_intersecting(&self.at_version(interval, selection));
        compress_by_value(hits.iter().map(|data| {
            let logical = project::<V, D>(data);
            (logical.interval, logical.value)
        }))
        .into_iter()
        .map(ValidData::from)
        .collect()
    }

    /// Returns true if anything intersects `interval` under `selection`
    pub fn intersects(&self, interval: &Interval<D>, selection: VersionSelection) -> bool {
        self.store.intersects(&self.at_version(interval, selection))
    }

    /// The occupied region under `selection`
    pub fn domain(&self, selection: VersionSelection) -> Vec<Interval<D>> {
        Interval::compress_all(
            self.get_selected_data(selection)
                .into_iter()
                .map(|data| data.interval),
        )
    }

    // Writes

    /// Writes `data` over the versions `selection` covers
    pub fn set(&mut self, data: ValidData<V, D>, selection: VersionSelection) {
        let interval = self.over_versions(&data.interval, selection);
        self.store.set(ValidData::new(data.value, interval));
    }

    /// Writes `data` only if nothing is stored in the versions `selection`
    /// covers. Returns false, changing nothing, on a conflict.
    pub fn set_if_no_conflict(&mut self, data: ValidData<V, D>, selection: VersionSelection) -> bool {
        let interval = self.over_versions(&data.interval, selection);
        self.store.set_if_no_conflict(ValidData::new(data.value, interval))
    }

    /// Writes `data` only where something is already stored
    pub fn update(&mut self, data: ValidData<V, D>, selection: VersionSelection) {
        let interval = self.over_versions(&data.interval, selection);
        self.store.update(ValidData::new(data.value, interval));
    }

    /// Rewrites or removes values over `interval` in the selected versions
    pub fn update_or_remove(
        &mut self,
        interval: &Interval<D>,
        f: impl Fn(&V) -> Option<V>,
        selection: VersionSelection,
    ) {
        let interval = self.over_versions(interval, selection);
        self.store.update_or_remove(&interval, f);
    }

    /// Removes everything inside `interval` in the selected versions
    pub fn remove(&mut self, interval: &Interval<D>, selection: VersionSelection) {
        let interval = self.over_versions(interval, selection);
        self.store.remove(&interval);
    }

    /// Writes `data` into unoccupied space in the selected versions
    pub fn fill(&mut self, data: ValidData<V, D>, selection: VersionSelection) {
        let interval = self.over_versions(&data.interval, selection);
        self.store.fill(ValidData::new(data.value, interval));
    }

    // Approval

    /// Approves one pending entry.
    ///
    /// If the unapproved layer holds exactly `data` at its start, it is
    /// written from the current version forward and true is returned.
    /// Otherwise nothing changes.
    pub fn approve(&mut self, data: &ValidData<V, D>) -> bool {
        let pending = self.get_intersecting(&data.interval, VersionSelection::Unapproved);
        if !pending.iter().any(|p| p == data) {
            return false;
        }
        self.set(data.clone(), VersionSelection::CurrentForward);
        log_event_lazy(Event::UnapprovedApproved, || vec![("interval", format!("{:?}", data.interval))]);
        true
    }

    /// Makes the current-forward view equal the unapproved view inside
    /// `interval`, removals included.
    pub fn approve_all(&mut self, interval: &Interval<D>) {
        let pending = self.clipped(interval, VersionSelection::Unapproved);
        self.remove(interval, VersionSelection::CurrentForward);
        for data in pending {
            self.set(data, VersionSelection::CurrentForward);
        }
        log_event_lazy(Event::UnapprovedApproved, || vec![("interval", format!("{:?}", interval))]);
    }

    /// Discards pending edits inside `interval`: the unapproved view is reset
    /// to what the current version shows.
    pub fn revert_unapproved(&mut self, interval: &Interval<D>) {
        let approved = self.clipped(interval, VersionSelection::Current);
        self.remove(interval, VersionSelection::Unapproved);
        for data in approved {
            self.set(data, VersionSelection::Unapproved);
        }
        log_event_lazy(Event::UnapprovedReverted, || vec![("interval", format!("{:?}", interval))]);
    }

    /// The selected snapshot cut down to `interval`
    fn clipped(&self, interval: &Interval<D>, selection: VersionSelection) -> Vec<ValidData<V, D>> {
        self.get_intersecting(interval, selection)
            .into_iter()
            .filter_map(|data| {
                let clipped = data.interval.intersection_with(interval)?;
                Some(data.with_interval(clipped))
            })
            .collect()
    }

    // Synchronization

    /// Actions that turn `old`'s full history into this one's
    pub fn diff_actions_from(&self, old: &Self) -> Vec<DiffAction<V, D::Versioned>> {
        self.store.diff_actions_from(&old.store)
    }

    /// Replays full-history actions from `diff_actions_from`
    pub fn apply_diff_actions(&mut self, actions: Vec<DiffAction<V, D::Versioned>>) {
        self.store.apply_diff_actions(actions);
    }

    /// Makes this history equal `other`'s. The cursor is unchanged.
    pub fn sync_with(&mut self, other: &Self) {
        self.store.sync_with(&other.store);
    }
}

fn check_version(version: i32) -> StoreResult<()> {
    if version >= UNAPPROVED_VERSION {
        return Err(StoreError::VersionOutOfRange { version });
    }
    Ok(())
}

impl<V, D> Default for VersionedStore<V, D>
where
    V: Clone + Eq + Hash + Debug,
    D: Versionable,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, D> Clone for VersionedStore<V, D>
where
    V: Clone + Eq + Hash + Debug,
    D: Versionable,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            current: self.current,
        }
    }
}

impl<V, D> Debug for VersionedStore<V, D>
where
    V: Clone + Eq + Hash + Debug,
    D: Versionable,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionedStore")
            .field("current", &self.current)
            .field("store", &self.store)
            .finish()
    }
}
