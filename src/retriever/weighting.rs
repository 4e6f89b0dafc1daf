use std::hash::Hash;

use crate::{
    postings::PostingsIndex,
    retriever::{config::WeightingScheme, stats::IndexStats, DocVector},
    utils::math::vector::TermVec,
};

/// Smoothing constant of the max-normalized term frequency.
/// Lower values hurt retrieval quality.
pub const SMOOTHING: f64 = 0.16;

/// Smoothed max-normalized TF
/// `a + (1 - a) * tf / max_tf`, or 0 when `max_tf` is 0.
#[inline]
pub fn normalized_tf(raw_tf: u32, max_tf: u32) -> f64 {
    if max_tf == 0 {
        return 0.0;
    }
    SMOOTHING + (1.0 - SMOOTHING) * raw_tf as f64 / max_tf as f64
}

impl WeightingScheme {
    /// Weight of a term inside a document.
    /// Only called for terms that occur in the document, so binary is always 1.
    #[inline]
    pub fn document_weight(&self, normalized_tf: f64, idf: f64) -> f64 {
        match self {
            WeightingScheme::Binary => 1.0,
            WeightingScheme::TermFrequency => normalized_tf,
            WeightingScheme::TfIdf => normalized_tf * idf,
        }
    }

    /// Weight of a term inside a query of `query_len` tokens.
    /// Binary and TF both use the plain relative frequency.
    #[inline]
    pub fn query_weight(&self, count: usize, query_len: usize, idf: f64) -> f64 {
        if query_len == 0 {
            return 0.0;
        }
        let tf = count as f64 / query_len as f64;
        match self {
            WeightingScheme::Binary | WeightingScheme::TermFrequency => tf,
            WeightingScheme::TfIdf => tf * idf,
        }
    }
}

/// Build every document vector in two passes over the postings.
///
/// 1. max raw frequency per document
/// 2. weight of each (term, document) pair, keeping only positive weights
///
/// The result is indexed like `stats.document_set()`.
pub fn build_document_vectors<K>(
    index: &PostingsIndex<K>,
    stats: &IndexStats<K>,
    scheme: WeightingScheme,
) -> Vec<DocVector>
where
    K: Clone + Eq + Hash,
{
    let doc_num = stats.doc_num();

    let mut max_tf = vec![0u32; doc_num];
    for postings in index.values() {
        for (doc, &tf) in postings {
            if let Some(doc_idx) = stats.doc_index(doc) {
                max_tf[doc_idx] = max_tf[doc_idx].max(tf);
            }
        }
    }

    // terms are visited in id order, so every push is ascending
    let mut term_vecs: Vec<TermVec<f64>> = (0..doc_num).map(|_| TermVec::new()).collect();
    for (term_id, postings) in index.values().enumerate() {
        let term_id = term_id as u32;
        let idf = stats.idf_by_id(term_id);
        for (doc, &tf) in postings {
            let Some(doc_idx) = stats.doc_index(doc) else {
                continue;
            };
            let weight = scheme.document_weight(normalized_tf(tf, max_tf[doc_idx]), idf);
            term_vecs[doc_idx].push_positive(term_id, weight);
        }
    }

    term_vecs
        .into_iter()
        .map(|mut term_vec| {
            term_vec.shrink_to_fit();
            let norm = term_vec.norm();
            DocVector { term_vec, norm }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    fn worked_example() -> PostingsIndex<String> {
        let mut index: PostingsIndex<String> = IndexMap::new();
        let a = index.entry("a".to_string()).or_default();
        a.insert("d1".to_string(), 2);
        a.insert("d2".to_string(), 1);
        index
            .entry("b".to_string())
            .or_default()
            .insert("d1".to_string(), 1);
        index
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn normalized_tf_matches_formula() {
        assert!(close(normalized_tf(2, 2), 1.0));
        assert!(close(normalized_tf(1, 2), 0.58));
        assert!(close(normalized_tf(1, 1), 1.0));
        assert_eq!(normalized_tf(3, 0), 0.0);
    }

    #[test]
    fn term_frequency_vectors() {
        let index = worked_example();
        let stats = IndexStats::from_postings(&index).unwrap();
        let docs = build_document_vectors(&index, &stats, WeightingScheme::TermFrequency);

        let (a, b) = (stats.term_id("a").unwrap(), stats.term_id("b").unwrap());
        let d1 = &docs[stats.doc_index(&"d1".to_string()).unwrap()];
        let d2 = &docs[stats.doc_index(&"d2".to_string()).unwrap()];
        // d2's only term is its own max
        assert!(close(d2.norm, 1.0));
        assert!(close(d1.term_vec.get(a), 1.0));
        assert!(close(d1.term_vec.get(b), 0.58));
        assert!(close(d2.term_vec.get(a), 1.0));
        assert_eq!(d2.term_vec.get(b), 0.0);
        assert!(close(d1.norm, (1.0f64 + 0.58 * 0.58).sqrt()));
    }

    #[test]
    fn binary_vectors_are_all_ones() {
        let index = worked_example();
        let stats = IndexStats::from_postings(&index).unwrap();
        let docs = build_document_vectors(&index, &stats, WeightingScheme::Binary);
        for doc in &docs {
            assert!(doc.term_vec.values().iter().all(|&w| w == 1.0));
        }
        assert_eq!(docs[0].term_vec.nnz(), 2);
        assert_eq!(docs[1].term_vec.nnz(), 1);
    }

    #[test]
    fn tfidf_vectors_scale_by_idf() {
        // "a" occurs in both documents: idf = 1, weights survive
        let index = worked_example();
        let stats = IndexStats::from_postings(&index).unwrap();
        let docs = build_document_vectors(&index, &stats, WeightingScheme::TfIdf);
        let a = stats.term_id("a").unwrap();
        let b = stats.term_id("b").unwrap();
        assert!(close(docs[0].term_vec.get(a), 1.0));
        assert!(close(docs[0].term_vec.get(b), 0.58 * (1.0 + 2f64.ln())));
        for doc in &docs {
            assert!(doc.term_vec.values().iter().all(|&w| w > 0.0));
        }
    }

    #[test]
    fn query_weight_falls_back_to_relative_frequency() {
        assert!(close(WeightingScheme::Binary.query_weight(2, 4, 3.0), 0.5));
        assert!(close(WeightingScheme::TermFrequency.query_weight(2, 4, 3.0), 0.5));
        assert!(close(WeightingScheme::TfIdf.query_weight(2, 4, 3.0), 1.5));
        assert_eq!(WeightingScheme::TfIdf.query_weight(1, 0, 3.0), 0.0);
    }
}
