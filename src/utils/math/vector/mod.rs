pub mod math;

use std::fmt::{self, Debug};

use num::Float;

/// TermVec is a sparse vector over term ids.
/// It keeps `indices` and `values` as two parallel arrays (SoA).
///
/// Indices are guaranteed to be strictly ascending, and only
/// non-zero values are stored. A missing index reads as zero.
#[derive(Clone, PartialEq)]
pub struct TermVec<N>
where
    N: Float,
{
    inds: Vec<u32>,
    vals: Vec<N>,
}

impl<N> TermVec<N>
where
    N: Float,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            inds: Vec::new(),
            vals: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
        }
    }

    /// Build from arbitrary `(index, value)` pairs.
    /// Pairs are sorted by index; zero values are skipped and
    /// a repeated index keeps the sum of its values.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, N)>,
    {
        let mut pairs: Vec<(u32, N)> = pairs.into_iter().collect();
        pairs.sort_by_key(|(idx, _)| *idx);
        let mut vec = Self::with_capacity(pairs.len());
        for (idx, val) in pairs {
            match vec.inds.last() {
                Some(&last) if last == idx => {
                    let slot = vec.vals.len() - 1;
                    vec.vals[slot] = vec.vals[slot] + val;
                }
                _ => {
                    vec.inds.push(idx);
                    vec.vals.push(val);
                }
            }
        }
        vec.retain_non_zero();
        vec
    }

    /// Append an element at the end.
    /// Returns false (and stores nothing) when `value` is not strictly positive.
    ///
    /// # Panics
    /// Debug builds panic if `index` is not larger than the last stored index.
    #[inline]
    pub fn push_positive(&mut self, index: u32, value: N) -> bool {
        debug_assert!(
            self.inds.last().map_or(true, |&last| last < index),
            "indices must be pushed in ascending order"
        );
        if value > N::zero() {
            self.inds.push(index);
            self.vals.push(value);
            true
        } else {
            false
        }
    }

    /// Number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inds.is_empty()
    }

    #[inline]
    pub fn get(&self, index: u32) -> N {
        match self.inds.binary_search(&index) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// Iterate `(index, value)` in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (u32, N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.inds
    }

    #[inline]
    pub fn values(&self) -> &[N] {
        &self.vals
    }

    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    fn retain_non_zero(&mut self) {
        let mut write = 0;
        for read in 0..self.inds.len() {
            if self.vals[read] != N::zero() {
                self.inds[write] = self.inds[read];
                self.vals[write] = self.vals[read];
                write += 1;
            }
        }
        self.inds.truncate(write);
        self.vals.truncate(write);
    }
}

impl<N> Default for TermVec<N>
where
    N: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Debug for TermVec<N>
where
    N: Float + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.raw_iter()).finish()
    }
}
