use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use num::{Float, NumCast};

use crate::{error::InvalidCorpusError, vectorizer::token::TermFrequency};

/// term -> ids of the documents containing it, in canonical term order
pub type InvertedIndex<K> = IndexMap<Box<str>, IndexSet<K>>;

/// term -> idf, in canonical term order
pub type IDFMap = IndexMap<Box<str>, f64>;

/// TF-IDF calculation engine
///
/// Owns the numeric contract of the vector space: how a document frequency turns into
/// an IDF weight, and how a document's TF combines with the corpus IDF map into a
/// vector aligned to the canonical term order.
pub trait TFIDFEngine {
    /// IDF of one term
    /// # Arguments
    /// * `doc_num` - number of documents in the corpus
    /// * `doc_freq` - number of documents containing the term (1..=doc_num)
    fn idf_calc(doc_num: u64, doc_freq: u64) -> f64;

    /// IDF map over every term of the inverted index, in the same order.
    ///
    /// Fails when a term claims more documents than the corpus holds.
    fn idf_map<K>(inverted_index: &InvertedIndex<K>, doc_num: u64) -> Result<IDFMap, InvalidCorpusError>
    where
        K: Eq + Hash,
    {
        let mut idf = IDFMap::with_capacity(inverted_index.len());
        for (term, doc_ids) in inverted_index {
            let doc_freq = doc_ids.len() as u64;
            if doc_freq > doc_num {
                return Err(InvalidCorpusError::DocFrequencyOverflow {
                    term: term.to_string(),
                    doc_freq,
                    doc_num,
                });
            }
            debug_assert!(doc_freq > 0, "term {term:?} indexed without any document");
            idf.insert(term.clone(), Self::idf_calc(doc_num, doc_freq));
        }
        Ok(idf)
    }

    /// TF-IDF vector
    /// One entry per term of `idf`, in its order: `tf * idf` when the document
    /// contains the term, zero otherwise.
    fn tf_idf_vec<N>(freq: &TermFrequency, idf: &IDFMap) -> Vec<N>
    where
        N: Float,
    {
        idf.iter()
            .map(|(term, &idf)| match freq.term_count(term) {
                0 => N::zero(),
                count => <N as NumCast>::from(count as f64 * idf).unwrap_or_else(N::zero),
            })
            .collect()
    }
}

/// Default engine: `idf = ln(N / df)` with no smoothing, weight = raw TF × IDF.
///
/// A term present in every document gets an IDF of exactly 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        (doc_num as f64 / doc_freq as f64).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(entries: &[(&str, &[&str])]) -> InvertedIndex<String> {
        entries
            .iter()
            .map(|(term, docs)| {
                (
                    Box::<str>::from(*term),
                    docs.iter().map(|d| d.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn idf_is_natural_log_of_ratio() {
        assert_eq!(DefaultTFIDFEngine::idf_calc(3, 2), (1.5f64).ln());
        assert_eq!(DefaultTFIDFEngine::idf_calc(10, 1), (10.0f64).ln());
    }

    #[test]
    fn term_in_every_document_has_zero_idf() {
        assert_eq!(DefaultTFIDFEngine::idf_calc(4, 4), 0.0);
        assert_eq!(DefaultTFIDFEngine::idf_calc(1, 1), 0.0);
    }

    #[test]
    fn idf_map_keeps_index_order() {
        let inv = index(&[("for", &["a", "b"]), ("i", &["a", "c"]), ("x", &["c"])]);
        let idf = DefaultTFIDFEngine::idf_map(&inv, 3).unwrap();
        let keys: Vec<&str> = idf.keys().map(|k| k.as_ref()).collect();
        assert_eq!(keys, vec!["for", "i", "x"]);
        assert!((idf["x"] - 3f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn doc_frequency_above_doc_count_is_rejected() {
        let inv = index(&[("for", &["a", "b", "c"])]);
        let err = DefaultTFIDFEngine::idf_map(&inv, 2).unwrap_err();
        assert_eq!(
            err,
            InvalidCorpusError::DocFrequencyOverflow {
                term: "for".to_string(),
                doc_freq: 3,
                doc_num: 2,
            }
        );
    }

    #[test]
    fn tf_idf_vec_follows_idf_order_and_zero_fills() {
        let inv = index(&[("for", &["a", "b"]), ("i", &["a", "c"]), ("hello", &["a", "b"])]);
        let idf = DefaultTFIDFEngine::idf_map(&inv, 3).unwrap();
        let freq = TermFrequency::from_terms(&["hello", "for"]);
        let vec: Vec<f64> = DefaultTFIDFEngine::tf_idf_vec(&freq, &idf);
        let w = (1.5f64).ln();
        assert_eq!(vec, vec![w, 0.0, w]);

        let vec32: Vec<f32> = DefaultTFIDFEngine::tf_idf_vec(&freq, &idf);
        assert_eq!(vec32.len(), 3);
        assert_eq!(vec32[1], 0.0);
    }
}
