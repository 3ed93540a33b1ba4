//! Bitmap-backed pivot cache for unordered multi-target selection.

use crate::{PivotCache, PivotStore};

/// Indices covered by one bitmap word.
const WORD_BITS: usize = u64::BITS as usize;

/// Position of the highest set bit. `word` must be non-zero.
#[inline]
fn high_bit(word: u64) -> usize {
    debug_assert!(word != 0);
    (u64::BITS - 1 - word.leading_zeros()) as usize
}

/// Position of the lowest set bit. `word` must be non-zero.
#[inline]
fn low_bit(word: u64) -> usize {
    debug_assert!(word != 0);
    word.trailing_zeros() as usize
}

/// Pivot cache that stores every pivot in `[left, right]` as one bit.
///
/// Intended for the strategy that processes target indices in any order and
/// keeps every pivot found, so the set may approach full density. A second
/// bitmap level marks which words contain any set bit; predecessor and
/// successor queries mask the word holding `k`, then walk the summary to the
/// nearest non-empty word (4096 indices per summary word), then refine with a
/// leading/trailing-zero count. Queries never rescan the whole range bit by
/// bit.
///
/// Memory is one bit per index in the range plus a 64x smaller summary,
/// allocated up front. For ranges far wider than the number of pivots that
/// will ever be stored, prefer [`SparsePivotCache`](crate::SparsePivotCache).
pub struct DensePivotCache {
    left: usize,
    right: usize,
    /// One bit per index in `[left, right]`, offset by `left`.
    words: Vec<u64>,
    /// Bit `w` is set iff `words[w]` is non-zero.
    summary: Vec<u64>,
}

impl DensePivotCache {
    /// Creates an empty cache supporting indices in `[left, right]`
    /// inclusive. Panics if `left > right`.
    pub fn new(left: usize, right: usize) -> Self {
        assert!(left <= right, "invalid range: left {left} > right {right}");
        let len = (right - left) / WORD_BITS + 1;
        let summary_len = (len - 1) / WORD_BITS + 1;
        Self {
            left,
            right,
            words: vec![0; len],
            summary: vec![0; summary_len],
        }
    }
}

impl PivotStore for DensePivotCache {
    fn add(&mut self, index: usize) {
        debug_assert!(self.left <= index && index <= self.right);
        let i = index - self.left;
        let w = i / WORD_BITS;
        self.words[w] |= 1 << (i % WORD_BITS);
        self.summary[w / WORD_BITS] |= 1 << (w % WORD_BITS);
    }
}

impl PivotCache for DensePivotCache {
    fn left(&self) -> usize {
        self.left
    }

    fn right(&self) -> usize {
        self.right
    }

    fn sparse(&self) -> bool {
        false
    }

    fn contains(&self, k: usize) -> bool {
        debug_assert!(self.left <= k && k <= self.right);
        let i = k - self.left;
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    fn previous_pivot(&self, k: usize) -> Option<usize> {
        debug_assert!(self.left <= k && k <= self.right);
        let i = k - self.left;
        let w = i / WORD_BITS;
        // Bits at or below position i within its own word.
        let bits = self.words[w] & (u64::MAX >> (WORD_BITS - 1 - i % WORD_BITS));
        if bits != 0 {
            return Some(self.left + w * WORD_BITS + high_bit(bits));
        }
        // Nearest earlier non-empty word, via the summary. The first summary
        // word is masked to words strictly before w.
        let mut s = w / WORD_BITS;
        let mut mask = self.summary[s] & !(u64::MAX << (w % WORD_BITS));
        loop {
            if mask != 0 {
                let w = s * WORD_BITS + high_bit(mask);
                return Some(self.left + w * WORD_BITS + high_bit(self.words[w]));
            }
            if s == 0 {
                return None;
            }
            s -= 1;
            mask = self.summary[s];
        }
    }

    fn next_pivot(&self, k: usize) -> Option<usize> {
        debug_assert!(self.left <= k && k <= self.right);
        let i = k - self.left;
        let w = i / WORD_BITS;
        // Bits at or above position i within its own word.
        let bits = self.words[w] & (u64::MAX << (i % WORD_BITS));
        if bits != 0 {
            return Some(self.left + w * WORD_BITS + low_bit(bits));
        }
        // Nearest later non-empty word. The double shift avoids overflow
        // when w sits in the top bit of its summary word.
        let mut s = w / WORD_BITS;
        let mut mask = self.summary[s] & ((u64::MAX << (w % WORD_BITS)) << 1);
        loop {
            if mask != 0 {
                let w = s * WORD_BITS + low_bit(mask);
                return Some(self.left + w * WORD_BITS + low_bit(self.words[w]));
            }
            s += 1;
            if s == self.summary.len() {
                return None;
            }
            mask = self.summary[s];
        }
    }
}
