//! Hyperoctree over bounding boxes

use std::collections::HashSet;
use std::hash::Hash;

use super::config::BoxTreeConfig;
use super::geometry::BoundingBox;

/// A box tree mapping bounding boxes to payloads.
///
/// Payloads are small copyable handles; the same payload may be stored under
/// several boxes, and `query` returns each payload at most once.
#[derive(Debug, Clone)]
pub struct BoxTree<P> {
    root: Node<P>,
    config: BoxTreeConfig,
    len: usize,
}

/// Shape statistics, for observability only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxTreeStats {
    /// Total nodes, leaves included.
    pub nodes: usize,
    /// Nodes without children.
    pub leaves: usize,
    /// Deepest node depth (root is 0).
    pub depth: usize,
    /// Stored `(box, payload)` pairs.
    pub items: usize,
}

#[derive(Debug, Clone)]
struct Node<P> {
    boundary: BoundingBox,
    depth: usize,
    /// Boxes owned by this node: all of them for a leaf, the ones straddling
    /// a child boundary for a branch.
    items: Vec<(BoundingBox, P)>,
    children: Vec<Node<P>>,
}

impl<P: Copy + Eq + Hash> BoxTree<P> {
    /// Creates an empty tree over `boundary`.
    pub fn new(boundary: BoundingBox, config: BoxTreeConfig) -> Self {
        Self {
            root: Node::leaf(boundary, 0),
            config,
            len: 0,
        }
    }

    /// Bulk-loads a tree, with leaf capacity sized to the initial load.
    pub fn from_items(
        boundary: BoundingBox,
        items: impl IntoIterator<Item = (BoundingBox, P)>,
        config: BoxTreeConfig,
    ) -> Self {
        let items: Vec<_> = items.into_iter().collect();
        let mut tree = Self::new(boundary, config.sized_for(items.len()));
        for (bx, payload) in items {
            tree.insert(bx, payload);
        }
        tree
    }

    /// The region the tree covers
    pub fn boundary(&self) -> &BoundingBox {
        &self.root.boundary
    }

    /// Number of stored `(box, payload)` pairs
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a payload under a box.
    pub fn insert(&mut self, bx: BoundingBox, payload: P) {
        let bx = bx.clamped_to(&self.root.boundary);
        self.root.insert(bx, payload, &self.config);
        self.len += 1;
    }

    /// Removes the exact `(box, payload)` pair. Returns false if absent.
    pub fn remove(&mut self, bx: &BoundingBox, payload: P) -> bool {
        let bx = bx.clamped_to(&self.root.boundary);
        let removed = self.root.remove(&bx, payload, &self.config);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Every payload whose box overlaps `bx`, each reported once.
    ///
    /// A superset of the exact answer: callers must re-check candidates.
    pub fn query(&self, bx: &BoundingBox) -> Vec<P> {
        let bx = bx.clamped_to(&self.root.boundary);
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        self.root.collect(&bx, &mut out, &mut seen);
        out
    }

    /// Every stored payload, each reported once.
    pub fn payloads(&self) -> Vec<P> {
        let everything = self.root.boundary.clone();
        self.query(&everything)
    }

    /// Drops every item and all structure below the root.
    pub fn clear(&mut self) {
        self.root = Node::leaf(self.root.boundary.clone(), 0);
        self.len = 0;
    }

    /// Shape statistics
    pub fn stats(&self) -> BoxTreeStats {
        let mut stats = BoxTreeStats::default();
        self.root.accumulate(&mut stats);
        stats
    }
}

impl<P: Copy + Eq + Hash> Node<P> {
    fn leaf(boundary: BoundingBox, depth: usize) -> Self {
        Self {
            boundary,
            depth,
            items: Vec::new(),
            children: Vec::new(),
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn insert(&mut self, bx: BoundingBox, payload: P, config: &BoxTreeConfig) {
        if !self.is_leaf() {
            match self.children.iter_mut().find(|c| c.boundary.contains(&bx)) {
                Some(child) => child.insert(bx, payload, config),
                None => self.items.push((bx, payload)),
            }
            return;
        }

        self.items.push((bx, payload));
        if self.items.len() > config.capacity && self.depth < config.max_depth {
            self.split(config);
        }
    }

    fn split(&mut self, config: &BoxTreeConfig) {
        let depth = self.depth + 1;
        self.children = self
            .boundary
            .children()
            .into_iter()
            .map(|boundary| Node::leaf(boundary, depth))
            .collect();
        for (bx, payload) in std::mem::take(&mut self.items) {
            self.insert(bx, payload, config);
        }
    }

    fn remove(&mut self, bx: &BoundingBox, payload: P, config: &BoxTreeConfig) -> bool {
        if let Some(pos) = self.items.iter().position(|(b, p)| b == bx && *p == payload) {
            self.items.swap_remove(pos);
            return true;
        }

        let mut removed = false;
        for child in self.children.iter_mut().filter(|c| c.boundary.contains(bx)) {
            if child.remove(bx, payload, config) {
                removed = true;
                break;
            }
        }
        if removed {
            self.collapse_if_sparse(config);
        }
        removed
    }

    /// Folds leaf children back into this node once they hold few items.
    fn collapse_if_sparse(&mut self, config: &BoxTreeConfig) {
        if self.is_leaf() || !self.children.iter().all(Node::is_leaf) {
            return;
        }
        let total = self.items.len() + self.children.iter().map(|c| c.items.len()).sum::<usize>();
        if total <= config.capacity / 2 {
            for child in std::mem::take(&mut self.children) {
                self.items.extend(child.items);
            }
        }
    }

    fn collect(&self, bx: &BoundingBox, out: &mut Vec<P>, seen: &mut HashSet<P>) {
        for (b, payload) in &self.items {
            if b.intersects(bx) && seen.insert(*payload) {
                out.push(*payload);
            }
        }
        for child in &self.children {
            if child.boundary.intersects(bx) {
                child.collect(bx, out, seen);
            }
        }
    }

    fn accumulate(&self, stats: &mut BoxTreeStats) {
        stats.nodes += 1;
        stats.items += self.items.len();
        stats.depth = stats.depth.max(self.depth);
        if self.is_leaf() {
            stats.leaves += 1;
        }
        for child in &self.children {
            child.accumulate(stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bx(min: &[f64], max: &[f64]) -> BoundingBox {
        BoundingBox::new(min.to_vec(), max.to_vec())
    }

    fn tree_1d(capacity: usize) -> BoxTree<u32> {
        BoxTree::new(bx(&[0.0], &[1024.0]), BoxTreeConfig::new(capacity, 16))
    }

    #[test]
    fn test_insert_and_query() {
        let mut tree = tree_1d(4);
        for i in 0..100u32 {
            let lo = f64::from(i) * 10.0;
            tree.insert(bx(&[lo], &[lo + 5.0]), i);
        }
        assert_eq!(tree.len(), 100);

        let mut hits = tree.query(&bx(&[12.0], &[31.0]));
        hits.sort();
        assert_eq!(hits, vec![1, 2, 3]);
    }

    #[test]
    fn test_splits_past_capacity() {
        let mut tree = tree_1d(2);
        for i in 0..16u32 {
            let lo = f64::from(i) * 60.0;
            tree.insert(bx(&[lo], &[lo + 1.0]), i);
        }
        let stats = tree.stats();
        assert!(stats.nodes > 1);
        assert_eq!(stats.items, 16);
    }

    #[test]
    fn test_straddling_box_stays_findable() {
        let mut tree = tree_1d(1);
        tree.insert(bx(&[100.0], &[110.0]), 1);
        tree.insert(bx(&[500.0], &[600.0]), 2);
        // Straddles the root midpoint (512)
        assert_eq!(tree.query(&bx(&[550.0], &[560.0])), vec![2]);
        assert_eq!(tree.query(&bx(&[105.0], &[105.0])), vec![1]);
    }

    #[test]
    fn test_remove_exact_pair() {
        let mut tree = tree_1d(2);
        let shared = bx(&[5.0], &[6.0]);
        tree.insert(shared.clone(), 1);
        tree.insert(shared.clone(), 2);
        assert!(!tree.remove(&bx(&[5.0], &[7.0]), 1));
        assert!(tree.remove(&shared, 1));
        assert!(!tree.remove(&shared, 1));
        assert_eq!(tree.query(&shared), vec![2]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_identical_boxes_respect_depth_limit() {
        let mut tree = BoxTree::new(bx(&[0.0], &[1024.0]), BoxTreeConfig::new(1, 5));
        for i in 0..50u32 {
            tree.insert(bx(&[3.0], &[3.0]), i);
        }
        let stats = tree.stats();
        assert!(stats.depth <= 5);
        assert_eq!(tree.query(&bx(&[3.0], &[3.0])).len(), 50);
    }

    #[test]
    fn test_collapse_after_removals() {
        let mut tree = tree_1d(2);
        let boxes: Vec<_> = (0..8u32)
            .map(|i| (bx(&[f64::from(i) * 100.0], &[f64::from(i) * 100.0 + 1.0]), i))
            .collect();
        for (b, p) in &boxes {
            tree.insert(b.clone(), *p);
        }
        let grown = tree.stats().nodes;
        for (b, p) in &boxes {
            assert!(tree.remove(b, *p));
        }
        assert!(tree.is_empty());
        assert!(tree.stats().nodes < grown);
    }

    #[test]
    fn test_out_of_bounds_boxes_are_clamped() {
        let mut tree = tree_1d(4);
        tree.insert(bx(&[-50.0], &[-10.0]), 7);
        assert_eq!(tree.query(&bx(&[-100.0], &[-20.0])), vec![7]);
        assert!(tree.remove(&bx(&[-50.0], &[-10.0]), 7));
    }

    #[test]
    fn test_two_dimensional() {
        let mut tree = BoxTree::new(bx(&[0.0, 0.0], &[100.0, 100.0]), BoxTreeConfig::new(2, 8));
        let mut id = 0u32;
        for x in 0..10 {
            for y in 0..10 {
                let (x, y) = (f64::from(x) * 10.0, f64::from(y) * 10.0);
                tree.insert(bx(&[x, y], &[x + 5.0, y + 5.0]), id);
                id += 1;
            }
        }
        let hits = tree.query(&bx(&[22.0, 42.0], &[23.0, 43.0]));
        assert_eq!(hits, vec![24]);
        assert_eq!(tree.payloads().len(), 100);
    }

    #[test]
    fn test_bulk_load() {
        let items = (0..1000u32).map(|i| (bx(&[f64::from(i)], &[f64::from(i)]), i));
        let tree = BoxTree::from_items(bx(&[0.0], &[1024.0]), items, BoxTreeConfig::default());
        assert_eq!(tree.len(), 1000);
        assert_eq!(tree.query(&bx(&[10.0], &[12.0])).len(), 3);
    }
}
