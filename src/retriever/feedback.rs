//! Pseudo relevance feedback.
//!
//! Two rounds per query:
//! 1. rank the original query and keep the top `top_k`
//! 2. mine the first `feedback_docs` of them for the heaviest terms, append
//!    those terms to the query, rank again, and merge both result lists

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use tracing::debug;

use crate::retriever::{
    scoring::{HitEntry, Hits},
    Retriever,
};

/// Merge two ranked lists into at most `k` distinct documents.
///
/// A document is placed by the best rank it reaches in either list; at equal
/// rank the initial list goes first. Each kept entry carries the score from
/// the list it was taken from.
pub fn merge_ranked<K>(initial: &Hits<K>, expanded: &Hits<K>, k: usize) -> Hits<K>
where
    K: Clone + Eq + Hash,
{
    let mut seen: HashSet<&K> = HashSet::with_capacity(k);
    let mut merged = Vec::with_capacity(k);
    let depth = initial.len().max(expanded.len());

    'ranks: for rank in 0..depth {
        for hit in [initial.get(rank), expanded.get(rank)].into_iter().flatten() {
            if merged.len() >= k {
                break 'ranks;
            }
            if seen.insert(&hit.key) {
                merged.push(HitEntry {
                    key: hit.key.clone(),
                    score: hit.score,
                });
            }
        }
    }
    Hits::new(merged)
}

impl<K> Retriever<K>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
{
    /// Sum the stored weights of every term over `top_docs` and return the
    /// `t` heaviest terms. Equal sums keep first-seen order.
    pub fn extract_top_terms(&self, top_docs: &[K], t: usize) -> Vec<String> {
        let mut term_scores: IndexMap<u32, f64> = IndexMap::new();
        for key in top_docs {
            let Some(doc) = self.document_vector(key) else {
                continue;
            };
            for (term_id, weight) in doc.term_vec.raw_iter() {
                *term_scores.entry(term_id).or_insert(0.0) += weight;
            }
        }

        let mut ranked: Vec<(u32, f64)> = term_scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
            .into_iter()
            .take(t)
            .filter_map(|(term_id, _)| self.stats().term(term_id).map(str::to_string))
            .collect()
    }

    /// Original query followed by the `t` top terms of `top_docs`.
    /// Terms already in the query are appended again, raising their weight.
    pub fn pseudo_relevance_feedback<T>(
        &self,
        original_query: &[T],
        top_docs: &[K],
        t: usize,
    ) -> Vec<String>
    where
        T: AsRef<str>,
    {
        let mut expanded: Vec<String> = original_query
            .iter()
            .map(|term| term.as_ref().to_string())
            .collect();
        expanded.extend(self.extract_top_terms(top_docs, t));
        expanded
    }

    /// Run a query and return at most `top_k` scored documents,
    /// with the feedback round when it is enabled.
    pub fn search<T>(&self, query: &[T]) -> Hits<K>
    where
        T: AsRef<str>,
    {
        let top_k = self.config().top_k;
        let initial = self.rank(query, top_k);
        debug!("initial top {}: {:?}", top_k, initial);

        let prf = self.config().prf;
        if !prf.enabled {
            return initial;
        }

        let feedback_docs: Vec<K> = initial.keys().take(prf.feedback_docs).cloned().collect();
        let expanded_query =
            self.pseudo_relevance_feedback(query, &feedback_docs, prf.expansion_terms);
        debug!("expanded query: {:?}", expanded_query);

        let expanded = self.rank(&expanded_query, top_k);
        debug!("expanded top {}: {:?}", top_k, expanded);

        merge_ranked(&initial, &expanded, top_k)
    }

    /// Document ids for a query, best first, at most `top_k` of them
    pub fn for_query<T>(&self, query: &[T]) -> Vec<K>
    where
        T: AsRef<str>,
    {
        self.search(query).into_keys()
    }
}
