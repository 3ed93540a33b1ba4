//! Pivot index caches for multi-target selection.
//!
//! A pivot is an array position whose value already equals the value it would
//! hold in the fully sorted array. Quickselect-family algorithms that resolve
//! several order statistics (say, a handful of percentiles) in one array
//! discover pivots as a side effect of partitioning. Recording those pivots
//! lets the search for every later target index `k` be restricted to the
//! tightest known bracket `[previous_pivot(k), next_pivot(k)]`, so no region
//! of the array is ever partitioned twice.
//!
//! The cache stores array *indices* only. It never sees array values, never
//! verifies that an index really is a pivot, and never removes anything: the
//! pivot set grows monotonically for the lifetime of one selection session.
//!
//! Two layouts cover the two usual processing strategies:
//!
//! - [`DensePivotCache`]: targets processed in any order, every pivot found
//!   is kept. Bitmap plus a summary level; queries stay near constant time
//!   even at full density.
//! - [`SparsePivotCache`]: targets processed in sorted order, only the few
//!   pivots between consecutive targets are kept. Sorted vector; memory is
//!   bounded by the target count, not the range width.
//!
//! Given the same insertions both layouts answer every query identically;
//! choosing one is purely a cost-model decision made at construction time.
//!
//! Queries are defined only for `k` within the supported range `[left,
//! right]` fixed at construction. Out-of-range arguments are outside the
//! contract: this crate checks them with `debug_assert!` and does nothing in
//! release builds, keeping validation off the hot path.

pub mod dense;
pub mod sparse;

pub use dense::DensePivotCache;
pub use sparse::SparsePivotCache;

/// Write side of a pivot cache. The partition routine reports each pivot
/// index it establishes through this.
pub trait PivotStore {
    /// Records `index` as a pivot, permanently. Re-adding a stored index is
    /// a no-op.
    ///
    /// The caller guarantees `left() <= index <= right()`.
    fn add(&mut self, index: usize);
}

/// Query side of a pivot cache: the supported range and nearest-pivot
/// lookups a selection driver uses to bracket its next partition step,
/// typically as `[previous_pivot(k), next_pivot_or_else(k, right() + 1)]`.
///
/// All query arguments must satisfy `left() <= k <= right()`.
pub trait PivotCache: PivotStore {
    /// Start (inclusive) of the supported range.
    fn left(&self) -> usize;

    /// End (inclusive) of the supported range.
    fn right(&self) -> usize;

    /// True if this cache keeps only a sparse subset representation.
    /// Advertises the cost model, not the semantics: a sparse cache answers
    /// exactly like a dense one over what was stored.
    fn sparse(&self) -> bool;

    /// True iff `k` is a stored pivot.
    fn contains(&self, k: usize) -> bool;

    /// Nearest stored pivot `p <= k`, or `None` if there is none yet.
    /// Returns `Some(k)` when `k` itself is stored.
    fn previous_pivot(&self, k: usize) -> Option<usize>;

    /// Nearest stored pivot `p >= k`, or `None` if there is none yet.
    /// Returns `Some(k)` when `k` itself is stored.
    fn next_pivot(&self, k: usize) -> Option<usize>;

    /// Nearest stored pivot `p >= k`, or `other` if there is none. A thin
    /// wrapper over [`next_pivot`](Self::next_pivot); convenient for the
    /// upper end of a bracket, where the natural miss value is
    /// `right() + 1`.
    fn next_pivot_or_else(&self, k: usize, other: usize) -> usize {
        self.next_pivot(k).unwrap_or(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    /// Lomuto partition over `data[left..=right]`. Returns the final
    /// position of the pivot value.
    fn partition(data: &mut [u32], left: usize, right: usize, pivot: usize) -> usize {
        if left >= right {
            return left;
        }
        data.swap(pivot, right);
        let mut store = left;
        for i in left..right {
            if data[i] < data[right] {
                data.swap(store, i);
                store += 1;
            }
        }
        data.swap(right, store);
        store
    }

    /// Drives quickselect for one target `k`, bracketing every partition
    /// step with the cache and reporting every pivot found back to it.
    fn select_target(data: &mut [u32], cache: &mut impl PivotCache, k: usize) {
        if cache.contains(k) {
            return;
        }
        let mut lo = match cache.previous_pivot(k) {
            Some(p) => p + 1,
            None => cache.left(),
        };
        let mut hi = match cache.next_pivot(k) {
            Some(p) => p - 1,
            None => cache.right(),
        };
        loop {
            let p = partition(data, lo, hi, lo + (hi - lo) / 2);
            cache.add(p);
            if p == k {
                return;
            }
            if k < p {
                hi = p - 1;
            } else {
                lo = p + 1;
            }
        }
    }

    #[test]
    fn dense_and_sparse_answer_identically() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..25 {
            let left = rng.random_range(0..1000);
            let right = left + rng.random_range(0..3000);
            let mut dense = DensePivotCache::new(left, right);
            let mut sparse = SparsePivotCache::new(left, right);
            for _ in 0..rng.random_range(0..80) {
                let p = rng.random_range(left..=right);
                dense.add(p);
                sparse.add(p);
            }
            for k in left..=right {
                assert_eq!(dense.contains(k), sparse.contains(k), "contains({k})");
                assert_eq!(
                    dense.previous_pivot(k),
                    sparse.previous_pivot(k),
                    "previous_pivot({k})"
                );
                assert_eq!(dense.next_pivot(k), sparse.next_pivot(k), "next_pivot({k})");
                assert_eq!(
                    dense.next_pivot_or_else(k, right + 1),
                    sparse.next_pivot_or_else(k, right + 1),
                    "next_pivot_or_else({k})"
                );
            }
        }
    }

    #[test]
    fn equivalence_under_interleaved_inserts() {
        // Queries interleaved with inserts, not just after a full fill.
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (left, right) = (0, 4999);
        let mut dense = DensePivotCache::new(left, right);
        let mut sparse = SparsePivotCache::new(left, right);
        for _ in 0..500 {
            if rng.random_bool(0.4) {
                let p = rng.random_range(left..=right);
                dense.add(p);
                sparse.add(p);
            }
            let k = rng.random_range(left..=right);
            assert_eq!(dense.previous_pivot(k), sparse.previous_pivot(k));
            assert_eq!(dense.next_pivot(k), sparse.next_pivot(k));
            assert_eq!(dense.contains(k), sparse.contains(k));
        }
    }

    #[test]
    fn multi_target_selection_with_dense_cache() {
        // Targets in arbitrary order; every pivot found is stored.
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let n = 2000;
        let mut data: Vec<u32> = (0..n as u32).collect();
        data.shuffle(&mut rng);

        let mut targets: Vec<usize> = (0..20).map(|_| rng.random_range(0..n)).collect();
        targets.shuffle(&mut rng);

        let mut cache = DensePivotCache::new(0, n - 1);
        for &k in &targets {
            select_target(&mut data, &mut cache, k);
        }
        // With distinct values 0..n the sorted value at index k is k.
        for &k in &targets {
            assert!(cache.contains(k));
            assert_eq!(data[k], k as u32);
        }
    }

    #[test]
    fn multi_target_selection_with_sparse_cache() {
        // Targets in sorted order, as the sparse strategy expects.
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let n = 2000;
        let mut data: Vec<u32> = (0..n as u32).collect();
        data.shuffle(&mut rng);

        let mut targets: Vec<usize> = (0..20).map(|_| rng.random_range(0..n)).collect();
        targets.sort_unstable();
        targets.dedup();

        let mut cache = SparsePivotCache::with_capacity(0, n - 1, targets.len() * 2);
        for &k in &targets {
            select_target(&mut data, &mut cache, k);
        }
        for &k in &targets {
            assert_eq!(data[k], k as u32);
        }
    }

    #[test]
    fn bracket_shrinks_as_pivots_accumulate() {
        let mut cache = DensePivotCache::new(0, 99);
        let bracket = |c: &DensePivotCache, k: usize| {
            (
                c.previous_pivot(k).unwrap_or(c.left()),
                c.next_pivot_or_else(k, c.right() + 1),
            )
        };
        assert_eq!(bracket(&cache, 50), (0, 100));
        cache.add(10);
        assert_eq!(bracket(&cache, 50), (10, 100));
        cache.add(80);
        assert_eq!(bracket(&cache, 50), (10, 80));
        cache.add(49);
        cache.add(51);
        assert_eq!(bracket(&cache, 50), (49, 51));
    }
}
