use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Term weighting scheme, fixed when the retriever is built.
/// Applied to both document and query vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeightingScheme {
    /// 1 when the term occurs in the document
    #[serde(rename = "binary")]
    Binary,
    /// smoothed max-normalized term frequency
    #[serde(rename = "tf")]
    TermFrequency,
    /// normalized term frequency times IDF
    #[default]
    #[serde(rename = "tfidf")]
    TfIdf,
}

impl WeightingScheme {
    pub const ALL: [WeightingScheme; 3] = [
        WeightingScheme::Binary,
        WeightingScheme::TermFrequency,
        WeightingScheme::TfIdf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightingScheme::Binary => "binary",
            WeightingScheme::TermFrequency => "tf",
            WeightingScheme::TfIdf => "tfidf",
        }
    }
}

impl fmt::Display for WeightingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightingScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "binary" => Ok(WeightingScheme::Binary),
            "tf" | "term-frequency" => Ok(WeightingScheme::TermFrequency),
            "tfidf" | "tf-idf" => Ok(WeightingScheme::TfIdf),
            _ => Err(Error::UnknownScheme(s.to_string())),
        }
    }
}

/// Pseudo relevance feedback settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrfConfig {
    /// Run the expansion round
    #[serde(default)]
    pub enabled: bool,

    /// Number of top ranked documents mined for expansion terms
    #[serde(default = "default_feedback_docs")]
    pub feedback_docs: usize,

    /// Number of terms appended to the query
    #[serde(default = "default_expansion_terms")]
    pub expansion_terms: usize,
}

fn default_feedback_docs() -> usize {
    5
}

fn default_expansion_terms() -> usize {
    5
}

impl Default for PrfConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            feedback_docs: default_feedback_docs(),
            expansion_terms: default_expansion_terms(),
        }
    }
}

/// Retriever configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieverConfig {
    #[serde(default)]
    pub scheme: WeightingScheme,

    #[serde(default)]
    pub prf: PrfConfig,

    /// Length of the result list returned by `for_query`
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    10
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            scheme: WeightingScheme::default(),
            prf: PrfConfig::default(),
            top_k: default_top_k(),
        }
    }
}

impl RetrieverConfig {
    pub fn new(scheme: WeightingScheme) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    pub fn with_prf(mut self, enabled: bool) -> Self {
        self.prf.enabled = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be > 0"));
        }
        if self.prf.enabled && self.prf.feedback_docs == 0 {
            return Err(Error::InvalidConfig("prf.feedback_docs must be > 0"));
        }
        Ok(())
    }
}
