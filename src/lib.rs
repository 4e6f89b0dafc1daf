//! This crate is a vector space retriever over a precomputed postings index,
//! with binary, TF and TF-IDF weighting and optional pseudo relevance feedback.

pub mod error;
pub mod postings;
pub mod retriever;
pub mod utils;

/// Vector Space Retriever
/// The top-level struct of this crate.
/// It turns a postings index (term -> document -> raw frequency) into weighted
/// document vectors once, then ranks documents for any number of queries by
/// cosine similarity.
///
/// Internally, it holds:
/// - The document set, in first-seen order
/// - The term vocabulary and its IDF table
/// - A sparse weighted vector per document
/// - The retrieval config (scheme, PRF, top_k)
///
/// `Retriever<K>` is generic over the document key type `K` (e.g. `String`, `u32`).
///
/// Immutable after construction, so it can be shared across threads.
pub use retriever::Retriever;

/// Retrieval settings
/// Weighting scheme, pseudo relevance feedback and result count.
/// Serializable; missing fields fall back to their defaults.
pub use retriever::config::{PrfConfig, RetrieverConfig, WeightingScheme};

/// Ranked search results
pub use retriever::scoring::{HitEntry, Hits};

/// Weighted query vector built per query
pub use retriever::query::QueryVector;

/// Collection statistics: document set, vocabulary, document frequency and IDF
pub use retriever::stats::IndexStats;

/// Rank-preserving merge of the two feedback rounds
pub use retriever::feedback::merge_ranked;

/// TF smoothing constant
pub use retriever::weighting::SMOOTHING;

/// Postings index type and its CBOR codec
pub use postings::{read_postings_cbor, write_postings_cbor, PostingsIndex};

pub use error::{Error, Result};
