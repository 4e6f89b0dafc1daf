use std::hash::Hash;

use indexmap::IndexSet;
use tracing::warn;

use crate::{error::{Error, Result}, postings::PostingsIndex};

/// Collection statistics derived once from the postings index.
///
/// Holds:
/// - the document set (first-seen order, which is the tie-break order of rankings)
/// - the vocabulary, interning every term into a `u32` id
/// - IDF per term id
#[derive(Debug, Clone)]
pub struct IndexStats<K>
where
    K: Clone + Eq + Hash,
{
    documents: IndexSet<K>,
    vocabulary: IndexSet<Box<str>>,
    idf: Vec<f64>,
}

/// IDF: `1 + ln(N / df)`.
/// Zero when `df` is zero.
#[inline]
pub fn idf_calc(doc_num: usize, doc_freq: u32) -> f64 {
    if doc_freq == 0 || doc_num == 0 {
        return 0.0;
    }
    1.0 + (doc_num as f64 / doc_freq as f64).ln()
}

/// Posting list length as a `u32` document frequency
fn document_frequency(term: &str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::TooManyDocuments {
        term: term.to_string(),
        count: len,
    })
}

impl<K> IndexStats<K>
where
    K: Clone + Eq + Hash,
{
    /// Scan the postings once and derive every statistic.
    ///
    /// Fails on a zero frequency posting or when no document is present.
    pub fn from_postings(index: &PostingsIndex<K>) -> Result<Self> {
        if index.len() > u32::MAX as usize {
            return Err(Error::TooManyTerms(index.len()));
        }

        let mut documents: IndexSet<K> = IndexSet::new();
        let mut vocabulary: IndexSet<Box<str>> = IndexSet::with_capacity(index.len());
        let mut doc_freq: Vec<u32> = Vec::with_capacity(index.len());
        for (term, postings) in index {
            if postings.is_empty() {
                warn!("term {:?} has an empty posting list; its idf is 0", term);
            }
            for (doc, &tf) in postings {
                if tf == 0 {
                    return Err(Error::ZeroFrequency { term: term.clone() });
                }
                if !documents.contains(doc) {
                    documents.insert(doc.clone());
                }
            }
            vocabulary.insert(term.as_str().into());
            doc_freq.push(document_frequency(term, postings.len())?);
        }

        if documents.is_empty() {
            return Err(Error::EmptyIndex);
        }

        let doc_num = documents.len();
        let idf = doc_freq.iter().map(|&df| idf_calc(doc_num, df)).collect();

        Ok(Self {
            documents,
            vocabulary,
            idf,
        })
    }

    /// Set of every document id appearing in any posting list
    #[inline]
    pub fn document_set(&self) -> &IndexSet<K> {
        &self.documents
    }

    #[inline]
    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[inline]
    pub fn doc_index(&self, key: &K) -> Option<usize> {
        self.documents.get_index_of(key)
    }

    #[inline]
    pub fn term_id(&self, term: &str) -> Option<u32> {
        self.vocabulary.get_index_of(term).map(|id| id as u32)
    }

    #[inline]
    pub fn term(&self, term_id: u32) -> Option<&str> {
        self.vocabulary.get_index(term_id as usize).map(|t| &**t)
    }

    /// Precomputed IDF, 0 for an unknown term
    pub fn idf(&self, term: &str) -> f64 {
        self.term_id(term).map_or(0.0, |id| self.idf_by_id(id))
    }

    #[inline]
    pub fn idf_by_id(&self, term_id: u32) -> f64 {
        self.idf.get(term_id as usize).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    fn postings(entries: Vec<(&str, Vec<(&str, u32)>)>) -> PostingsIndex<String> {
        entries
            .into_iter()
            .map(|(term, docs)| {
                let list: IndexMap<String, u32> =
                    docs.into_iter().map(|(d, tf)| (d.to_string(), tf)).collect();
                (term.to_string(), list)
            })
            .collect()
    }

    #[test]
    fn document_set_is_union_of_postings() {
        let index =
            postings(vec![("a", vec![("d1", 2), ("d2", 1)]), ("b", vec![("d3", 1), ("d1", 1)])]);
        let stats = IndexStats::from_postings(&index).unwrap();
        let docs: Vec<&str> = stats.document_set().iter().map(|d| d.as_str()).collect();
        assert_eq!(docs, vec!["d1", "d2", "d3"]);
        assert_eq!(stats.doc_num(), 3);
        assert_eq!(stats.vocab_size(), 2);
    }

    #[test]
    fn idf_of_term_in_every_document_is_one() {
        let index = postings(vec![
            ("common", vec![("d1", 4), ("d2", 1), ("d3", 7)]),
            ("rare", vec![("d2", 1)]),
        ]);
        let stats = IndexStats::from_postings(&index).unwrap();
        assert_eq!(stats.idf("common"), 1.0);
        assert!((stats.idf("rare") - (1.0 + 3f64.ln())).abs() < 1e-12);
        assert!(stats.idf("rare") > stats.idf("common"));
    }

    #[test]
    fn unknown_term_has_zero_idf() {
        let index = postings(vec![("a", vec![("d1", 1)])]);
        let stats = IndexStats::from_postings(&index).unwrap();
        assert_eq!(stats.idf("missing"), 0.0);
        assert_eq!(stats.term_id("missing"), None);
    }

    #[test]
    fn empty_posting_list_gets_zero_idf() {
        let index = postings(vec![("a", vec![("d1", 1)]), ("ghost", vec![])]);
        let stats = IndexStats::from_postings(&index).unwrap();
        assert_eq!(stats.term_id("ghost"), Some(1));
        assert_eq!(stats.idf("ghost"), 0.0);
        assert_eq!(idf_calc(10, 0), 0.0);
    }

    #[test]
    fn rejects_empty_and_zero_frequency() {
        let empty: PostingsIndex<String> = IndexMap::new();
        assert!(matches!(IndexStats::from_postings(&empty), Err(Error::EmptyIndex)));

        let only_ghosts = postings(vec![("ghost", vec![])]);
        assert!(matches!(IndexStats::from_postings(&only_ghosts), Err(Error::EmptyIndex)));

        let zero = postings(vec![("a", vec![("d1", 0)])]);
        assert!(matches!(
            IndexStats::from_postings(&zero),
            Err(Error::ZeroFrequency { term }) if term == "a"
        ));
    }

    #[test]
    fn document_frequency_must_fit_u32() {
        assert_eq!(document_frequency("a", 3).unwrap(), 3);
        assert_eq!(document_frequency("a", u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn document_frequency_overflow_is_an_error() {
        let len = u32::MAX as usize + 1;
        assert!(matches!(
            document_frequency("huge", len),
            Err(Error::TooManyDocuments { term, count }) if term == "huge" && count == len
        ));
    }

    #[test]
    fn term_ids_round_trip() {
        let index = postings(vec![("x", vec![("d1", 1)]), ("y", vec![("d1", 1)])]);
        let stats = IndexStats::from_postings(&index).unwrap();
        let id = stats.term_id("y").unwrap();
        assert_eq!(id, 1);
        assert_eq!(stats.term(id), Some("y"));
        assert_eq!(stats.term(99), None);
    }
}
