use std::cmp::Ordering;

use num::Float;

use super::TermVec;

impl<N> TermVec<N>
where
    N: Float,
{
    /// Dot product by merge-join over both index lists.
    /// Only indices present in both vectors contribute.
    #[inline]
    pub fn dot(&self, other: &Self) -> N {
        let (a_inds, a_vals) = (self.indices(), self.values());
        let (b_inds, b_vals) = (other.indices(), other.values());

        let mut result = N::zero();
        let mut i = 0;
        let mut j = 0;
        while i < a_inds.len() && j < b_inds.len() {
            match a_inds[i].cmp(&b_inds[j]) {
                Ordering::Equal => {
                    result = result + a_vals[i] * b_vals[j];
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    #[inline]
    pub fn norm_sq(&self) -> N {
        self.values()
            .iter()
            .fold(N::zero(), |acc, &v| acc + v * v)
    }

    /// Euclidean norm
    #[inline]
    pub fn norm(&self) -> N {
        self.norm_sq().sqrt()
    }
}
