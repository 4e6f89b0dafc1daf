use std::hash::Hash;

use indexmap::IndexMap;

use crate::{
    retriever::{config::WeightingScheme, stats::IndexStats},
    utils::math::vector::TermVec,
};

/// Weighted query vector, rebuilt for every query and expansion round.
///
/// Terms unknown to the index are kept in `weights` (they count toward the
/// query norm under binary/tf) but have no term id, so they never match.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVector {
    weights: IndexMap<Box<str>, f64>,
    term_vec: TermVec<f64>,
    norm: f64,
}

impl QueryVector {
    /// Build from a token sequence; repeated tokens raise the term frequency.
    pub fn build<K, T>(query: &[T], stats: &IndexStats<K>, scheme: WeightingScheme) -> Self
    where
        K: Clone + Eq + Hash,
        T: AsRef<str>,
    {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for token in query {
            *counts.entry(token.as_ref()).or_insert(0) += 1;
        }

        let query_len = query.len();
        let mut weights: IndexMap<Box<str>, f64> = IndexMap::with_capacity(counts.len());
        let mut known: Vec<(u32, f64)> = Vec::with_capacity(counts.len());
        for (term, count) in counts {
            let term_id = stats.term_id(term);
            let idf = term_id.map_or(0.0, |id| stats.idf_by_id(id));
            let weight = scheme.query_weight(count, query_len, idf);
            if weight <= 0.0 {
                continue;
            }
            if let Some(id) = term_id {
                known.push((id, weight));
            }
            weights.insert(Box::from(term), weight);
        }

        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        Self {
            weights,
            term_vec: TermVec::from_pairs(known),
            norm,
        }
    }

    /// Weight of `term`, 0 when absent
    #[inline]
    pub fn get(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(t, &w)| (&**t, w))
    }

    /// Euclidean norm over every query term, known or not
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Known terms only, addressed by term id
    #[inline]
    pub fn term_vec(&self) -> &TermVec<f64> {
        &self.term_vec
    }
}
