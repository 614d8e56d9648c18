//! Store Invariant Tests
//!
//! Tests for store invariants:
//! - Stored intervals are pairwise disjoint after every mutation
//! - The store agrees point-for-point with a brute-force model
//! - One-dimensional stores stay fully compressed
//! - `recompress_all` preserves content and reaches a canonical form
//! - Sentinel and extreme bounds behave like any other bound

use std::collections::BTreeMap;

use disjoint::domain::DiscreteDomain;
use disjoint::interval::Interval;
use disjoint::store::{DataStore, StoreConfig, StoreError, ValidData};
use proptest::prelude::*;

type D = DiscreteDomain<i32>;
type I = Interval<D>;
type D2 = (DiscreteDomain<i32>, DiscreteDomain<i32>);
type I2 = Interval<D2>;

// =============================================================================
// Helper Functions
// =============================================================================

fn data(value: &str, start: i32, end: i32) -> ValidData<String, D> {
    ValidData::new(value.to_string(), I::between(start, end))
}

fn at(v: i32) -> D {
    DiscreteDomain::Point(v)
}

fn p2(x: i32, y: i32) -> D2 {
    (DiscreteDomain::Point(x), DiscreteDomain::Point(y))
}

fn rect(x: (i32, i32), y: (i32, i32)) -> I2 {
    I2::cross(I::between(x.0, x.1), I::between(y.0, y.1))
}

fn assert_disjoint<V: std::fmt::Debug, Dm: disjoint::domain::Domain>(entries: &[ValidData<V, Dm>]) {
    for (i, a) in entries.iter().enumerate() {
        for b in &entries[i + 1..] {
            assert!(
                !a.interval.intersects(&b.interval),
                "{:?} overlaps {:?}",
                a,
                b
            );
        }
    }
}

/// A mutation applied to both the store and the model.
#[derive(Debug, Clone)]
enum Op<Iv> {
    Set(Iv, u8),
    Update(Iv, u8),
    Fill(Iv, u8),
    Remove(Iv),
    /// Sets every interval of the domain complement
    SetGaps(u8),
}

/// Axis values checked against the model: a small window plus both ends of `i32`.
fn sample_values(window: i32) -> Vec<i32> {
    let mut values: Vec<i32> = (-1..window).collect();
    values.extend([i32::MIN, i32::MIN + 1, i32::MIN + 2, i32::MAX - 2, i32::MAX - 1, i32::MAX]);
    values
}

/// A bound on one axis: mostly small values, sometimes a sentinel or an
/// extreme value.
fn bound(window: i32) -> impl Strategy<Value = D> + Clone {
    prop_oneof![
        6 => (0..window).prop_map(DiscreteDomain::Point),
        1 => Just(DiscreteDomain::Bottom),
        1 => Just(DiscreteDomain::Top),
        1 => (0i32..3).prop_map(|k| DiscreteDomain::Point(i32::MIN + k)),
        1 => (0i32..3).prop_map(|k| DiscreteDomain::Point(i32::MAX - k)),
    ]
}

/// Any well-formed interval over `bound`s.
fn axis_interval(window: i32) -> impl Strategy<Value = I> + Clone {
    (bound(window), bound(window)).prop_filter_map("empty sentinel interval", |(a, b)| {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        I::try_new(start, end).ok()
    })
}

fn interval_1d() -> impl Strategy<Value = I> + Clone {
    prop_oneof![
        3 => (0i32..50, 0i32..12).prop_map(|(start, len)| I::between(start, start + len)),
        1 => axis_interval(60),
    ]
}

fn interval_2d() -> impl Strategy<Value = I2> + Clone {
    (0i32..10, 0i32..4, 0i32..10, 0i32..4).prop_map(|(x, w, y, h)| rect((x, x + w), (y, y + h)))
}

fn interval_2d_wide() -> impl Strategy<Value = I2> + Clone {
    prop_oneof![
        3 => interval_2d(),
        1 => (axis_interval(14), axis_interval(14)).prop_map(|(x, y)| I2::cross(x, y)),
    ]
}

fn op<Iv: Clone + std::fmt::Debug>(interval: impl Strategy<Value = Iv> + Clone) -> impl Strategy<Value = Op<Iv>> {
    prop_oneof![
        3 => (interval.clone(), 0u8..3).prop_map(|(iv, v)| Op::Set(iv, v)),
        3 => (interval.clone(), 0u8..3).prop_map(|(iv, v)| Op::Update(iv, v)),
        3 => (interval.clone(), 0u8..3).prop_map(|(iv, v)| Op::Fill(iv, v)),
        3 => interval.prop_map(Op::Remove),
        1 => (0u8..3).prop_map(Op::SetGaps),
    ]
}

fn apply<Dm: disjoint::domain::Domain>(store: &DataStore<u8, Dm>, op: &Op<Interval<Dm>>) {
    match op {
        Op::Set(iv, v) => store.set(ValidData::new(*v, iv.clone())),
        Op::Update(iv, v) => store.update(ValidData::new(*v, iv.clone())),
        Op::Fill(iv, v) => store.fill(ValidData::new(*v, iv.clone())),
        Op::Remove(iv) => store.remove(iv),
        Op::SetGaps(v) => {
            for gap in store.domain_complement() {
                store.set(ValidData::new(*v, gap));
            }
        }
    }
}

/// Applies `op` to the model at every sample point.
fn model_step<P, Dm>(model: &mut BTreeMap<P, u8>, samples: &[(P, Dm)], op: &Op<Interval<Dm>>)
where
    P: Ord + Clone,
    Dm: disjoint::domain::Domain,
{
    for (key, point) in samples {
        match op {
            Op::Set(iv, v) if iv.contains(point) => {
                model.insert(key.clone(), *v);
            }
            Op::Update(iv, v) if iv.contains(point) => {
                if let Some(slot) = model.get_mut(key) {
                    *slot = *v;
                }
            }
            Op::Fill(iv, v) if iv.contains(point) => {
                model.entry(key.clone()).or_insert(*v);
            }
            Op::Remove(iv) if iv.contains(point) => {
                model.remove(key);
            }
            Op::SetGaps(v) => {
                model.entry(key.clone()).or_insert(*v);
            }
            _ => {}
        }
    }
}

fn samples_1d() -> Vec<(i32, D)> {
    sample_values(70).into_iter().map(|x| (x, at(x))).collect()
}

fn samples_2d(window: i32) -> Vec<((i32, i32), D2)> {
    let values = sample_values(window);
    let mut out = Vec::new();
    for x in &values {
        for y in &values {
            out.push(((*x, *y), p2(*x, *y)));
        }
    }
    out
}

// =============================================================================
// Scenarios
// =============================================================================

/// Setting an adjacent interval with the same value merges.
#[test]
fn test_scenario_adjacent_set_merges() {
    let store = DataStore::from_data(vec![data("A", 1, 4)], StoreConfig::default()).unwrap();
    store.set(data("A", 5, 9));
    assert_eq!(store.get_all(), vec![data("A", 1, 9)]);
}

/// Updating the middle splits the old entry in three.
#[test]
fn test_scenario_update_splits() {
    let store = DataStore::from_data(vec![data("A", 1, 9)], StoreConfig::default()).unwrap();
    store.update(data("B", 4, 5));
    assert_eq!(
        store.get_all(),
        vec![data("A", 1, 3), data("B", 4, 5), data("A", 6, 9)]
    );
}

/// Removing a prefix trims the entry.
#[test]
fn test_scenario_remove_prefix() {
    let store = DataStore::from_data(vec![data("A", 1, 9)], StoreConfig::default()).unwrap();
    store.remove(&I::between(1, 3));
    assert_eq!(store.get_all(), vec![data("A", 4, 9)]);
}

/// Fill never overwrites.
#[test]
fn test_scenario_fill_keeps_existing() {
    let store: DataStore<String, D> = DataStore::new();
    store.fill(data("X", 1, 9));
    store.fill(data("Y", 3, 5));
    assert_eq!(store.get_all(), vec![data("X", 1, 9)]);
    assert_eq!(store.get_at(&at(4)), Some("X".to_string()));
}

/// Strict loading reports the overlapping pair.
#[test]
fn test_strict_loading() {
    let err = DataStore::from_data(
        vec![data("A", 1, 5), data("B", 7, 9), data("C", 4, 6)],
        StoreConfig::default().strict(),
    )
    .unwrap_err();
    assert_eq!(err.code(), "DISJOINT_OVERLAPPING_DATA");
    assert!(matches!(err, StoreError::OverlappingData { .. }));
    assert!(err.is_fatal());

    let ok = DataStore::from_data(vec![data("A", 1, 3), data("B", 4, 9)], StoreConfig::default().strict());
    assert_eq!(ok.unwrap().len(), 2);
}

/// A store over the whole domain splits cleanly at the sentinels.
#[test]
fn test_unbounded_store_edits() {
    let store: DataStore<&str, D> = DataStore::of("base");
    store.set(ValidData::new("mid", I::between(-5, 5)));
    assert_eq!(
        store.get_all(),
        vec![
            ValidData::new("base", I::to_value(-6)),
            ValidData::new("mid", I::between(-5, 5)),
            ValidData::new("base", I::from_value(6)),
        ]
    );
    assert_eq!(store.domain(), vec![I::unbounded()]);
    store.remove(&I::from_value(0));
    assert_eq!(store.domain_complement(), vec![I::from_value(0)]);
}

/// Two-dimensional update leaves a frame around the hole.
#[test]
fn test_update_2d() {
    let store = DataStore::from_data(vec![ValidData::new('a', rect((0, 9), (0, 9)))], StoreConfig::verified()).unwrap();
    store.set(ValidData::new('b', rect((3, 5), (3, 5))));
    let all = store.get_all();
    assert_disjoint(&all);
    assert_eq!(all.iter().filter(|d| d.value == 'a').count(), 4);
    assert_eq!(store.get_at(&p2(4, 4)), Some('b'));
    assert_eq!(store.get_at(&p2(2, 4)), Some('a'));

    store.set(ValidData::new('a', rect((3, 5), (3, 5))));
    store.recompress_all();
    assert_eq!(store.get_all(), vec![ValidData::new('a', rect((0, 9), (0, 9)))]);
}

// =============================================================================
// Sentinel Bounds
// =============================================================================

/// Data ending at `i32::MAX` leaves no gap above it, so writing the
/// complement cannot overlap a later write that runs to `Top`.
#[test]
fn test_complement_next_to_max_value() {
    let store: DataStore<&str, D> = DataStore::with_config(StoreConfig::verified());
    store.set(ValidData::new("A", I::between(0, i32::MAX)));
    let gaps = store.domain_complement();
    assert_eq!(gaps, vec![I::to_value(-1)]);

    store.set(ValidData::new("B", I::from_value(5)));
    for gap in gaps {
        store.set(ValidData::new("C", gap));
    }
    let all = store.get_all();
    assert_disjoint(&all);
    assert_eq!(
        all,
        vec![
            ValidData::new("C", I::to_value(-1)),
            ValidData::new("A", I::between(0, 4)),
            ValidData::new("B", I::from_value(5)),
        ]
    );
    assert!(store.domain_complement().is_empty());
    assert_eq!(store.get_at(&at(i32::MAX)), Some("B"));
    assert_eq!(store.get_at(&DiscreteDomain::Top), None);
}

/// Writing the whole value range over an unbounded entry leaves nothing of
/// it behind; the sentinels themselves hold no data.
#[test]
fn test_full_value_range_replaces_unbounded() {
    let store: DataStore<&str, D> = DataStore::of("base");
    store.set(ValidData::new("all", I::between(i32::MIN, i32::MAX)));
    assert_eq!(store.get_all(), vec![ValidData::new("all", I::between(i32::MIN, i32::MAX))]);
    assert!(store.domain_complement().is_empty());

    store.remove(&I::between(i32::MIN, 0));
    assert_eq!(store.get_all(), vec![ValidData::new("all", I::between(1, i32::MAX))]);
    assert_eq!(store.domain_complement(), vec![I::to_value(0)]);
    store.recompress_all();
    assert_eq!(store.len(), 1);
}

// =============================================================================
// Model-Based Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every mutation keeps entries disjoint, matches the model, and leaves a
    /// one-dimensional store fully compressed.
    #[test]
    fn test_random_ops_1d(ops in prop::collection::vec(op(interval_1d()), 1..30)) {
        let store: DataStore<u8, D> = DataStore::with_config(StoreConfig::verified());
        let samples = samples_1d();
        let mut model = BTreeMap::new();
        for op in &ops {
            apply(&store, op);
            model_step(&mut model, &samples, op);
            if let Op::SetGaps(_) = op {
                prop_assert!(store.domain_complement().is_empty());
            }

            let all = store.get_all();
            assert_disjoint(&all);
            for pair in all.windows(2) {
                let mergeable = pair[0].value == pair[1].value
                    && pair[0].interval.is_left_adjacent_to(&pair[1].interval);
                prop_assert!(!mergeable, "uncompressed {:?}", pair);
            }
        }
        for (x, point) in &samples {
            prop_assert_eq!(store.get_at(point), model.get(x).copied(), "at {}", x);
        }
        prop_assert_eq!(store.get_at(&DiscreteDomain::Top), None);
        prop_assert_eq!(store.get_at(&DiscreteDomain::Bottom), None);

        store.recompress_all();
        assert_disjoint(&store.get_all());
        for (x, point) in &samples {
            prop_assert_eq!(store.get_at(point), model.get(x).copied(), "at {} after recompress", x);
        }
    }

    /// Two-dimensional mutations, sentinel bounds included, keep entries
    /// disjoint and match the model, before and after `recompress_all`.
    #[test]
    fn test_random_ops_2d(ops in prop::collection::vec(op(interval_2d_wide()), 1..20)) {
        let store: DataStore<u8, D2> = DataStore::with_config(StoreConfig::verified());
        let samples = samples_2d(16);
        let mut model = BTreeMap::new();
        for op in &ops {
            apply(&store, op);
            model_step(&mut model, &samples, op);
            assert_disjoint(&store.get_all());
        }
        for (key, point) in &samples {
            prop_assert_eq!(store.get_at(point), model.get(key).copied(), "at {:?}", key);
        }

        store.recompress_all();
        assert_disjoint(&store.get_all());
        for (key, point) in &samples {
            prop_assert_eq!(store.get_at(point), model.get(key).copied(), "at {:?} after recompress", key);
        }
    }

    /// `recompress_all` keeps content, is idempotent, and does not depend on
    /// how the content was split up.
    #[test]
    fn test_recompress_canonical(ops in prop::collection::vec(op(interval_2d()), 1..20)) {
        let store: DataStore<u8, D2> = DataStore::new();
        let grid: Vec<((i32, i32), D2)> = (0..20)
            .flat_map(|x| (0..20).map(move |y| ((x, y), p2(x, y))))
            .collect();
        let mut model = BTreeMap::new();
        for op in &ops {
            if let Op::SetGaps(_) = op {
                continue;
            }
            apply(&store, op);
            model_step(&mut model, &grid, op);
        }

        store.recompress_all();
        assert_disjoint(&store.get_all());
        for ((x, y), v) in &model {
            prop_assert_eq!(store.get_at(&p2(*x, *y)), Some(*v));
        }
        prop_assert_eq!(store.len() as u64, store.get_all().len() as u64);

        let once = store.get_all();
        store.recompress_all();
        prop_assert_eq!(&store.get_all(), &once);

        // The same function stored cell by cell
        let cells = model
            .iter()
            .map(|((x, y), v)| ValidData::new(*v, rect((*x, *x), (*y, *y))));
        let fine = DataStore::from_data(cells, StoreConfig::default()).unwrap();
        fine.recompress_all();
        prop_assert_eq!(fine.get_all(), once);
    }
}
