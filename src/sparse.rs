//! Sorted-vector pivot cache for targets processed in ascending order.

use crate::{PivotCache, PivotStore};

/// Pivot cache that stores only the pivots it is given, in a sorted vector.
///
/// Intended for the strategy that processes target indices in sorted order
/// and keeps just the pivots bracketing consecutive targets, so the stored
/// count stays bounded by the number of targets rather than the range width.
/// Insertion is an ordered insert, predecessor/successor are binary searches.
/// Unlike [`DensePivotCache`](crate::DensePivotCache) no storage proportional
/// to the range is ever allocated, which is the entire point when the range
/// is huge and the targets are few.
pub struct SparsePivotCache {
    left: usize,
    right: usize,
    /// Stored pivots, ascending, no duplicates.
    pivots: Vec<usize>,
}

impl SparsePivotCache {
    /// Creates an empty cache supporting indices in `[left, right]`
    /// inclusive. Panics if `left > right`.
    pub fn new(left: usize, right: usize) -> Self {
        assert!(left <= right, "invalid range: left {left} > right {right}");
        Self {
            left,
            right,
            pivots: Vec::new(),
        }
    }

    /// As [`new`](Self::new), pre-allocating room for `count` pivots. Useful
    /// when the driver knows its target count up front.
    pub fn with_capacity(left: usize, right: usize, count: usize) -> Self {
        assert!(left <= right, "invalid range: left {left} > right {right}");
        Self {
            left,
            right,
            pivots: Vec::with_capacity(count),
        }
    }

    /// Number of pivots currently stored.
    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    /// True if no pivot has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }
}

impl PivotStore for SparsePivotCache {
    fn add(&mut self, index: usize) {
        debug_assert!(self.left <= index && index <= self.right);
        if let Err(pos) = self.pivots.binary_search(&index) {
            self.pivots.insert(pos, index);
        }
    }
}

impl PivotCache for SparsePivotCache {
    fn left(&self) -> usize {
        self.left
    }

    fn right(&self) -> usize {
        self.right
    }

    fn sparse(&self) -> bool {
        true
    }

    fn contains(&self, k: usize) -> bool {
        debug_assert!(self.left <= k && k <= self.right);
        self.pivots.binary_search(&k).is_ok()
    }

    fn previous_pivot(&self, k: usize) -> Option<usize> {
        debug_assert!(self.left <= k && k <= self.right);
        // Count of stored pivots <= k.
        let n = self.pivots.partition_point(|&p| p <= k);
        n.checked_sub(1).map(|i| self.pivots[i])
    }

    fn next_pivot(&self, k: usize) -> Option<usize> {
        debug_assert!(self.left <= k && k <= self.right);
        let i = self.pivots.partition_point(|&p| p < k);
        self.pivots.get(i).copied()
    }
}
