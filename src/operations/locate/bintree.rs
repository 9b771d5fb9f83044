use crate::error::{OperationError, Result};

/// Closed interval `[min, max]` on the real line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    min: f64,
    max: f64,
}

impl Interval {
    /// Creates an interval, swapping the bounds if given out of order.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns the length of the interval.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Returns whether the two intervals share at least one point.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.min > other.max || self.max < other.min)
    }

    /// Whether both bounds are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Whether `other` lies entirely within this interval.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    fn expanded_to_include(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Scaled widths below `2^MIN_BINARY_EXPONENT` are treated as zero.
const MIN_BINARY_EXPONENT: i32 = -50;

/// Unbiased binary exponent of `d`.
fn exponent(d: f64) -> i32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let biased = ((d.to_bits() >> 52) & 0x7ff) as i32;
    biased - 1023
}

#[allow(clippy::float_cmp)]
fn is_zero_width(min: f64, max: f64) -> bool {
    let width = max - min;
    if width == 0.0 {
        return true;
    }
    let max_abs = min.abs().max(max.abs());
    exponent(width / max_abs) <= MIN_BINARY_EXPONENT
}

/// Levels above this would overflow the node size.
const MAX_BINARY_EXPONENT: i32 = 1023;

/// The aligned node interval and level that contain `item`.
///
/// Intervals too wide for any aligned node become their own key.
fn compute_key(item: &Interval) -> (Interval, i32) {
    let first = (exponent(item.width()) + 1).min(MAX_BINARY_EXPONENT);
    for level in first..=MAX_BINARY_EXPONENT {
        let interval = key_interval(level, item);
        if interval.contains(item) {
            return (interval, level);
        }
    }
    (*item, MAX_BINARY_EXPONENT)
}

fn key_interval(level: i32, item: &Interval) -> Interval {
    let size = 2f64.powi(level);
    let start = (item.min / size).floor() * size;
    Interval::new(start, start + size)
}

/// Which half of a node (split at `centre`) fully contains `interval`, if any.
fn subnode_index(interval: &Interval, centre: f64) -> Option<usize> {
    if interval.max <= centre {
        Some(0)
    } else if interval.min >= centre {
        Some(1)
    } else {
        None
    }
}

#[derive(Debug)]
struct Node<T> {
    interval: Interval,
    centre: f64,
    level: i32,
    items: Vec<(Interval, T)>,
    subnodes: [Option<Box<Node<T>>>; 2],
}

impl<T> Node<T> {
    fn new(interval: Interval, level: i32) -> Self {
        Self {
            interval,
            centre: (interval.min + interval.max) / 2.0,
            level,
            items: Vec::new(),
            subnodes: [None, None],
        }
    }

    fn for_interval(item: &Interval) -> Self {
        let (interval, level) = compute_key(item);
        Self::new(interval, level)
    }

    /// A node covering both `node` (if any) and `add`, with `node` reinserted
    /// as a descendant.
    fn expanded(node: Option<Box<Self>>, add: &Interval) -> Box<Self> {
        let target = match &node {
            Some(n) => add.expanded_to_include(&n.interval),
            None => *add,
        };
        let mut larger = Box::new(Self::for_interval(&target));
        if let Some(n) = node {
            larger.insert_node(n);
        }
        larger
    }

    fn insert_node(&mut self, node: Box<Self>) {
        let Some(index) = subnode_index(&node.interval, self.centre) else {
            // Node intervals are aligned, so a contained node always fits one half.
            self.items.extend((*node).into_items());
            return;
        };
        if node.level == self.level - 1 {
            self.subnodes[index] = Some(node);
        } else {
            let mut child = Box::new(self.create_subnode(index));
            child.insert_node(node);
            self.subnodes[index] = Some(child);
        }
    }

    fn into_items(self) -> Vec<(Interval, T)> {
        let Self { mut items, subnodes, .. } = self;
        for sub in subnodes.into_iter().flatten() {
            items.extend((*sub).into_items());
        }
        items
    }

    fn create_subnode(&self, index: usize) -> Self {
        let interval = if index == 0 {
            Interval::new(self.interval.min, self.centre)
        } else {
            Interval::new(self.centre, self.interval.max)
        };
        Self::new(interval, self.level - 1)
    }

    /// Stores `item` in the smallest node containing `interval`, descending
    /// only through existing nodes unless `create` is set.
    fn add_item(&mut self, interval: Interval, item: T, create: bool) {
        if let Some(index) = subnode_index(&interval, self.centre) {
            if create && self.subnodes[index].is_none() {
                let fresh = self.create_subnode(index);
                self.subnodes[index] = Some(Box::new(fresh));
            }
            if let Some(sub) = self.subnodes[index].as_deref_mut() {
                sub.add_item(interval, item, create);
                return;
            }
        }
        self.items.push((interval, item));
    }

    fn collect_overlapping<'a>(&'a self, search: Option<&Interval>, out: &mut Vec<&'a T>) {
        if let Some(s) = search {
            if !self.interval.overlaps(s) {
                return;
            }
        }
        collect_items(&self.items, &self.subnodes, search, out);
    }

    fn depth(&self) -> usize {
        1 + subnode_depth(&self.subnodes)
    }
}

fn collect_items<'a, T>(
    items: &'a [(Interval, T)],
    subnodes: &'a [Option<Box<Node<T>>>; 2],
    search: Option<&Interval>,
    out: &mut Vec<&'a T>,
) {
    out.extend(items.iter().map(|(_, item)| item));
    for sub in subnodes.iter().flatten() {
        sub.collect_overlapping(search, out);
    }
}

fn subnode_depth<T>(subnodes: &[Option<Box<Node<T>>>; 2]) -> usize {
    subnodes
        .iter()
        .flatten()
        .map(|n| n.depth())
        .max()
        .unwrap_or(0)
}

/// An interval index supporting insertion and overlap queries.
///
/// Queries return every item stored in a node whose interval overlaps the
/// search interval: a superset of the items whose own interval overlaps.
#[derive(Debug)]
pub struct Bintree<T> {
    items: Vec<(Interval, T)>,
    subnodes: [Option<Box<Node<T>>>; 2],
    min_extent: f64,
    len: usize,
}

impl<T> Default for Bintree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Bintree<T> {
    /// Root split point.
    const ORIGIN: f64 = 0.0;

    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            subnodes: [None, None],
            min_extent: 1.0,
            len: 0,
        }
    }

    /// Returns the number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the tree holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels, counting the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + subnode_depth(&self.subnodes)
    }

    /// Adds `item` keyed by `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if a bound is NaN or infinite.
    pub fn insert(&mut self, interval: Interval, item: T) -> Result<()> {
        if !interval.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "interval bounds must be finite: [{}, {}]",
                interval.min, interval.max
            ))
            .into());
        }
        let width = interval.width();
        if width < self.min_extent && width > 0.0 {
            self.min_extent = width;
        }
        let interval = self.ensure_extent(interval);
        self.len += 1;

        let Some(index) = subnode_index(&interval, Self::ORIGIN) else {
            self.items.push((interval, item));
            return Ok(());
        };

        let needs_expansion = self.subnodes[index]
            .as_ref()
            .map_or(true, |node| !node.interval.contains(&interval));
        if needs_expansion {
            let node = self.subnodes[index].take();
            self.subnodes[index] = Some(Node::expanded(node, &interval));
        }
        if let Some(tree) = self.subnodes[index].as_deref_mut() {
            insert_contained(tree, interval, item);
        }
        Ok(())
    }

    /// Zero-width intervals are widened to the smallest extent seen so far so
    /// that they can be keyed.
    #[allow(clippy::float_cmp)]
    fn ensure_extent(&self, interval: Interval) -> Interval {
        if interval.min != interval.max {
            return interval;
        }
        let half = self.min_extent / 2.0;
        Interval::new(interval.min - half, interval.max + half)
    }

    /// Items that may overlap `search`.
    #[must_use]
    pub fn query(&self, search: &Interval) -> Vec<&T> {
        let mut out = Vec::new();
        collect_items(&self.items, &self.subnodes, Some(search), &mut out);
        out
    }

    /// Every item in the tree.
    #[must_use]
    pub fn query_all(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        collect_items(&self.items, &self.subnodes, None, &mut out);
        out
    }
}

fn insert_contained<T>(tree: &mut Node<T>, interval: Interval, item: T) {
    // Near-zero widths would create arbitrarily deep chains of nodes.
    let create = !is_zero_width(interval.min, interval.max);
    tree.add_item(interval, item, create);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn key_contains_interval() {
        for (a, b) in [(0.3, 0.7), (5.0, 9.5), (-3.2, -1.1), (1024.0, 1024.5)] {
            let item = Interval::new(a, b);
            let (key, _) = compute_key(&item);
            assert!(key.contains(&item), "{key:?} should contain {item:?}");
        }
    }

    #[test]
    fn query_finds_overlapping_items() {
        let mut tree = Bintree::new();
        for i in 0..100 {
            let lo = f64::from(i);
            tree.insert(Interval::new(lo, lo + 0.5), i).unwrap();
        }
        assert_eq!(tree.len(), 100);
        let hits = tree.query(&Interval::new(42.2, 42.3));
        assert!(hits.contains(&&42));
        assert!(hits.len() < 100);
        assert!(tree.depth() > 1);
    }

    #[test]
    fn straddling_intervals_stay_at_root() {
        let mut tree = Bintree::new();
        tree.insert(Interval::new(-1.0, 1.0), "root").unwrap();
        tree.insert(Interval::new(2.0, 3.0), "right").unwrap();
        tree.insert(Interval::new(-3.0, -2.0), "left").unwrap();
        let hits = tree.query(&Interval::new(2.5, 2.5));
        assert!(hits.contains(&&"root"));
        assert!(hits.contains(&&"right"));
        assert!(!hits.contains(&&"left"));
        assert_eq!(tree.query_all().len(), 3);
    }

    #[test]
    fn zero_width_intervals_are_indexed() {
        let mut tree = Bintree::new();
        tree.insert(Interval::new(0.25, 0.5), 'a').unwrap();
        tree.insert(Interval::new(3.0, 3.0), 'b').unwrap();
        tree.insert(Interval::new(3.0, 3.0), 'c').unwrap();
        let hits = tree.query(&Interval::new(3.0, 3.0));
        assert!(hits.contains(&&'b'));
        assert!(hits.contains(&&'c'));
    }

    #[test]
    fn growing_node_keeps_earlier_items() {
        let mut tree = Bintree::new();
        tree.insert(Interval::new(1.0, 1.5), 1).unwrap();
        tree.insert(Interval::new(1.0, 100.0), 2).unwrap();
        tree.insert(Interval::new(70.0, 71.0), 3).unwrap();
        let hits = tree.query(&Interval::new(1.2, 1.3));
        assert!(hits.contains(&&1));
        assert!(hits.contains(&&2));
        assert_eq!(tree.query_all().len(), 3);
    }

    #[test]
    fn non_finite_intervals_are_rejected() {
        let mut tree = Bintree::new();
        assert!(tree.insert(Interval::new(f64::NAN, 1.0), 0).is_err());
        assert!(tree.insert(Interval::new(2.0, f64::INFINITY), 1).is_err());
        assert!(tree.is_empty());
    }

    #[test]
    fn huge_intervals_get_a_key() {
        let item = Interval::new(1.0, f64::MAX);
        let (key, _) = compute_key(&item);
        assert!(key.contains(&item));

        let mut tree = Bintree::new();
        tree.insert(item, 'h').unwrap();
        tree.insert(Interval::new(3.0, 4.0), 's').unwrap();
        assert!(tree.query(&Interval::new(1.0e300, 1.0e300)).contains(&&'h'));
    }

    #[test]
    fn zero_width_detection() {
        assert!(is_zero_width(5.0, 5.0));
        assert!(is_zero_width(1.0e6, 1.0e6 + 1.0e-12));
        assert!(!is_zero_width(0.0, 1.0));
    }
}
