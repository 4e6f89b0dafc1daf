use std::fmt::{self, Debug};
use std::hash::Hash;

use rayon::prelude::*;

use crate::retriever::{query::QueryVector, DocVector, Retriever};

/// A single ranked document
#[derive(Debug, Clone, PartialEq)]
pub struct HitEntry<K> {
    pub key: K,
    pub score: f64,
}

/// Structure to store search results, best first
#[derive(Clone, PartialEq)]
pub struct Hits<K> {
    pub list: Vec<HitEntry<K>>,
}

impl<K> Hits<K> {
    /// Create a new Hits instance
    pub fn new(list: Vec<HitEntry<K>>) -> Self {
        Hits { list }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn get(&self, rank: usize) -> Option<&HitEntry<K>> {
        self.list.get(rank)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitEntry<K>> + '_ {
        self.list.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|hit| &hit.key)
    }

    pub fn into_keys(self) -> Vec<K> {
        self.list.into_iter().map(|hit| hit.key).collect()
    }

    /// Keep the best `k` entries
    pub fn truncate(&mut self, k: usize) -> &mut Self {
        self.list.truncate(k);
        self
    }

    /// Best score first. Stable, so equal scores keep their current order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }
}

impl<K> Debug for Hits<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // one hit per line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?}: {:.6}", hit.key, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|hit| (&hit.key, hit.score)))
                .finish()
        }
    }
}

/// Cosine similarity between a query and a document
/// cosθ = q・d / (|d||q|)
///
/// Only terms of the query contribute to the dot product.
/// The query norm is a positive constant per query, so it does not change the
/// ranking; it is kept so scores stay in [0, 1] and compare across queries.
/// Zero when either norm is zero.
#[inline]
pub fn cosine_similarity(query: &QueryVector, doc: &DocVector) -> f64 {
    let denom = doc.norm * query.norm();
    if denom > 0.0 {
        query.term_vec().dot(&doc.term_vec) / denom
    } else {
        0.0
    }
}

impl<K> Retriever<K>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
{
    /// Score every document against `query` and rank all of them, best first.
    ///
    /// Ties keep document set order, so the ranking is deterministic.
    pub fn perform_query(&self, query: &QueryVector) -> Hits<K> {
        let scores: Vec<f64> = self
            .documents()
            .par_iter()
            .map(|doc| cosine_similarity(query, doc))
            .collect();

        // scores come back in document order
        let mut hits = Hits::new(
            self.document_set()
                .iter()
                .zip(scores)
                .map(|(key, score)| HitEntry {
                    key: key.clone(),
                    score,
                })
                .collect(),
        );
        hits.sort_by_score();
        hits
    }

    /// One ranking pass over a raw token query, truncated to `k`
    pub fn rank<T>(&self, query: &[T], k: usize) -> Hits<K>
    where
        T: AsRef<str>,
    {
        let query_vector = self.compute_query_vector(query);
        let mut hits = self.perform_query(&query_vector);
        hits.truncate(k);
        hits
    }
}
