//! Postings index input.
//!
//! The retriever never builds postings itself; an external indexer hands over
//! `term -> {document -> raw frequency}`. Insertion order of both levels is
//! kept, and it fixes the document order used to break score ties.

use std::hash::Hash;
use std::io::{Read, Write};

use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// Per-term posting list: document id -> raw occurrence count
pub type PostingList<K> = IndexMap<K, u32>;

/// term -> posting list
pub type PostingsIndex<K> = IndexMap<String, PostingList<K>>;

/// Read a CBOR encoded postings index.
pub fn read_postings_cbor<K, R>(reader: R) -> Result<PostingsIndex<K>>
where
    K: DeserializeOwned + Eq + Hash,
    R: Read,
{
    Ok(serde_cbor::from_reader(reader)?)
}

/// Write a postings index as CBOR.
pub fn write_postings_cbor<K, W>(index: &PostingsIndex<K>, writer: W) -> Result<()>
where
    K: Serialize + Eq + Hash,
    W: Write,
{
    serde_cbor::to_writer(writer, index)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cbor_keeps_insertion_order() {
        let mut index: PostingsIndex<String> = IndexMap::new();
        index
            .entry("zeta".to_string())
            .or_default()
            .insert("d2".to_string(), 3);
        index
            .entry("alpha".to_string())
            .or_default()
            .insert("d1".to_string(), 1);

        let mut buf = Vec::new();
        write_postings_cbor(&index, &mut buf).unwrap();
        let loaded: PostingsIndex<String> = read_postings_cbor(buf.as_slice()).unwrap();

        let terms: Vec<&str> = loaded.keys().map(|s| s.as_str()).collect();
        assert_eq!(terms, vec!["zeta", "alpha"]);
        assert_eq!(loaded["zeta"]["d2"], 3);
    }

    #[test]
    fn garbage_input_is_a_cbor_error() {
        let res: Result<PostingsIndex<String>> = read_postings_cbor(&[0xffu8, 0x00, 0x13][..]);
        assert!(matches!(res, Err(crate::Error::Cbor(_))));
    }
}
