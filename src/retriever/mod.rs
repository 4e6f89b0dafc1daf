pub mod config;
pub mod feedback;
pub mod query;
pub mod scoring;
pub mod stats;
pub mod weighting;

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexSet;
use tracing::info;

use crate::{
    error::Result,
    postings::PostingsIndex,
    retriever::{
        config::{RetrieverConfig, WeightingScheme},
        query::QueryVector,
        stats::IndexStats,
        weighting::build_document_vectors,
    },
    utils::math::vector::TermVec,
};

/// Vector space retriever over a fixed postings index.
///
/// Everything derived from the index (document set, IDF table, weighted
/// document vectors) is computed once in [`Retriever::new`] and never
/// changes afterwards, so a `Retriever` can be shared between threads and
/// queried concurrently.
///
/// `Retriever<K>` is generic over the document key type `K` (e.g. `String`, `u32`).
#[derive(Debug, Clone)]
pub struct Retriever<K>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
{
    config: RetrieverConfig,
    stats: IndexStats<K>,
    /// Document vectors, indexed like `stats.document_set()`
    documents: Vec<DocVector>,
}

/// Weighted document vector
#[derive(Debug, Clone)]
pub struct DocVector {
    /// positive weights by term id
    pub term_vec: TermVec<f64>,
    /// Euclidean norm of `term_vec`
    pub norm: f64,
}

impl<K> Retriever<K>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
{
    /// Build a retriever; validates the config and the index once.
    pub fn new(index: &PostingsIndex<K>, config: RetrieverConfig) -> Result<Self> {
        config.validate()?;
        let stats = IndexStats::from_postings(index)?;
        let documents = build_document_vectors(index, &stats, config.scheme);
        info!(
            "retriever ready: {} documents, {} terms, scheme={}, prf={}",
            stats.doc_num(),
            stats.vocab_size(),
            config.scheme,
            config.prf.enabled
        );
        Ok(Self {
            config,
            stats,
            documents,
        })
    }

    #[inline]
    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    #[inline]
    pub fn scheme(&self) -> WeightingScheme {
        self.config.scheme
    }

    #[inline]
    pub fn stats(&self) -> &IndexStats<K> {
        &self.stats
    }

    #[inline]
    pub fn document_set(&self) -> &IndexSet<K> {
        self.stats.document_set()
    }

    #[inline]
    pub fn doc_num(&self) -> usize {
        self.stats.doc_num()
    }

    /// IDF of `term`, 0 when unknown
    #[inline]
    pub fn idf(&self, term: &str) -> f64 {
        self.stats.idf(term)
    }

    pub fn document_vector(&self, key: &K) -> Option<&DocVector> {
        self.stats
            .doc_index(key)
            .and_then(|idx| self.documents.get(idx))
    }

    /// Stored weight of `term` in document `key`, 0 when not stored
    pub fn document_weight(&self, key: &K, term: &str) -> f64 {
        match (self.document_vector(key), self.stats.term_id(term)) {
            (Some(doc), Some(term_id)) => doc.term_vec.get(term_id),
            _ => 0.0,
        }
    }

    pub fn compute_query_vector<T>(&self, query: &[T]) -> QueryVector
    where
        T: AsRef<str>,
    {
        QueryVector::build(query, &self.stats, self.config.scheme)
    }

    pub(crate) fn documents(&self) -> &[DocVector] {
        &self.documents
    }
}
