//! Error types for the retriever.

use thiserror::Error;

/// Errors raised while building a retriever or loading its input.
///
/// Query time never fails: empty queries and unknown terms score zero.
#[derive(Error, Debug)]
pub enum Error {
    /// The postings index holds no documents.
    #[error("empty index")]
    EmptyIndex,

    /// A posting carries a raw frequency of zero.
    #[error("zero frequency posting for term {term:?}")]
    ZeroFrequency { term: String },

    /// The vocabulary does not fit into `u32` term ids.
    #[error("too many terms: {0}")]
    TooManyTerms(usize),

    /// A posting list is longer than a `u32` document frequency can count.
    #[error("too many documents for term {term:?}: {count}")]
    TooManyDocuments { term: String, count: usize },

    /// Configuration was rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Weighting scheme name was not recognised.
    #[error("unknown weighting scheme: {0}")]
    UnknownScheme(String),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CBOR (de)serialization error
    #[error("cbor error: {0}")]
    Cbor(#[from] serde_cbor::Error),
}

/// Result type alias for retriever operations.
pub type Result<T> = std::result::Result<T, Error>;
