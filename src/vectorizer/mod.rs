pub mod compute;
pub mod corpus;
pub mod document;
pub mod evaluate;
pub mod tfidf;
pub mod token;

use std::{fmt::Debug, hash::Hash, marker::PhantomData, sync::Arc};

use log::debug;
use num::Float;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    error::{IncompatibleVectorError, InvalidCorpusError},
    vectorizer::{
        compute::compare::{Compare, DefaultCompare},
        corpus::CorpusIndex,
        document::{ScoredDocument, TokenizedDocument},
        evaluate::scoring::SimilarityPairs,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    },
};

/// Element type of a TF-IDF vector (`f32` or `f64`).
pub trait Weight: Float + Into<f64> + Send + Sync + Debug {}

impl<T> Weight for T where T: Float + Into<f64> + Send + Sync + Debug {}

/// TF-IDF Vector
/// Dense, one entry per term of the corpus index it was built against,
/// in that index's canonical term order.
///
/// Vectors produced from a `CorpusIndex` carry its fingerprint, and comparing
/// vectors stamped by different indexes fails even when their lengths agree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TFIDFVector<N = f64>
where
    N: Weight,
{
    tfidf_vec: Vec<N>,
    #[serde(skip)]
    index_fingerprint: Option<u64>,
}

impl<N> TFIDFVector<N>
where
    N: Weight,
{
    /// Vector not tied to any index; only its length is checked on comparison.
    pub fn new(tfidf_vec: Vec<N>) -> Self {
        Self {
            tfidf_vec,
            index_fingerprint: None,
        }
    }

    pub fn with_index(tfidf_vec: Vec<N>, index_fingerprint: u64) -> Self {
        Self {
            tfidf_vec,
            index_fingerprint: Some(index_fingerprint),
        }
    }

    /// Fingerprint of the index this vector was built against.
    #[inline]
    pub fn index_fingerprint(&self) -> Option<u64> {
        self.index_fingerprint
    }

    #[inline]
    pub fn as_slice(&self) -> &[N] {
        &self.tfidf_vec
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tfidf_vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tfidf_vec.is_empty()
    }

    /// true when every entry is zero (or the vector is empty)
    pub fn is_zero(&self) -> bool {
        self.tfidf_vec.iter().all(|v| v.is_zero())
    }

    /// Non-zero entries as `(position, value)`.
    pub fn nonzero_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.tfidf_vec
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| !v.is_zero())
    }

    pub fn norm(&self) -> f64 {
        DefaultCompare::norm(self.as_slice())
    }

    /// Cosine similarity with `other`; both must come from the same index.
    pub fn cosine_similarity(&self, other: &Self) -> Result<f64, IncompatibleVectorError> {
        if self.len() == other.len() {
            if let (Some(left), Some(right)) = (self.index_fingerprint, other.index_fingerprint) {
                if left != right {
                    return Err(IncompatibleVectorError::Index { left, right });
                }
            }
        }
        DefaultCompare::cosine_similarity(self.as_slice(), other.as_slice())
    }

    pub fn into_vec(self) -> Vec<N> {
        self.tfidf_vec
    }
}

/// Build a corpus index from a fixed document collection.
pub fn build_index<K>(documents: &[TokenizedDocument<K>]) -> Result<CorpusIndex<K>, InvalidCorpusError>
where
    K: Clone + Eq + Hash + Debug,
{
    CorpusIndex::new(documents)
}

/// TF-IDF vector of `document` in `index`'s canonical term order.
pub fn vectorize<K>(document: &TokenizedDocument<K>, index: &CorpusIndex<K>) -> TFIDFVector<f64> {
    document.calculate_tf_idf(index)
}

/// Cosine similarity of two vectors built against the same index.
pub fn similarity<N>(a: &TFIDFVector<N>, b: &TFIDFVector<N>) -> Result<f64, IncompatibleVectorError>
where
    N: Weight,
{
    a.cosine_similarity(b)
}

/// TF-IDF Vectorizer
/// A corpus index together with every document of the corpus scored against it.
///
/// `TFIDFVectorizer<N, K, E>`:
/// - `N`: vector element type (`f32`, `f64`)
/// - `K`: document key type (e.g. `String` path, `usize`)
/// - `E`: TF-IDF calculation engine
///
/// The index is held as `Arc<CorpusIndex<K>>` so it can be handed to other threads
/// or scoring code after the build.
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<N = f64, K = String, E = DefaultTFIDFEngine>
where
    N: Weight,
    E: TFIDFEngine,
{
    /// Corpus index reference
    corpus_ref: Arc<CorpusIndex<K>>,
    /// Scored documents, in the index's doc-id order
    documents: Vec<ScoredDocument<N, K>>,
    _marker: PhantomData<E>,
}

impl<N, K, E> TFIDFVectorizer<N, K, E>
where
    N: Weight,
    K: Clone + Eq + Hash + Debug + Send + Sync,
    E: TFIDFEngine,
{
    /// Build the index from `documents`, then vectorize every document against it.
    pub fn build(documents: Vec<TokenizedDocument<K>>) -> Result<Self, InvalidCorpusError> {
        let corpus_ref = Arc::new(CorpusIndex::build_with::<E>(&documents)?);
        let documents: Vec<ScoredDocument<N, K>> = documents
            .into_par_iter()
            .map(|doc| doc.into_scored_with::<N, E>(&corpus_ref))
            .collect();
        debug!(
            "vectorized {} documents over {} terms",
            documents.len(),
            corpus_ref.vocab_size()
        );
        Ok(Self {
            corpus_ref,
            documents,
            _marker: PhantomData,
        })
    }

    pub fn corpus_index(&self) -> &CorpusIndex<K> {
        &self.corpus_ref
    }

    /// Shared handle to the index, for scoring outside this vectorizer.
    pub fn corpus_ref(&self) -> Arc<CorpusIndex<K>> {
        Arc::clone(&self.corpus_ref)
    }

    pub fn documents(&self) -> &[ScoredDocument<N, K>] {
        &self.documents
    }

    /// Scored document by key
    pub fn get(&self, key: &K) -> Option<&ScoredDocument<N, K>> {
        self.corpus_ref
            .doc_position(key)
            .and_then(|position| self.documents.get(position))
    }

    pub fn contains_doc(&self, key: &K) -> bool {
        self.corpus_ref.contains_doc(key)
    }

    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    /// Cosine similarity between two documents of the corpus.
    /// `None` when either key is unknown.
    pub fn similarity(&self, a: &K, b: &K) -> Result<Option<f64>, IncompatibleVectorError> {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => a.calculate_cosine_similarity(b).map(Some),
            _ => Ok(None),
        }
    }

    /// Every unordered pair of documents, sorted by descending score.
    pub fn pairwise(&self) -> Result<SimilarityPairs<K>, IncompatibleVectorError> {
        let mut pairs = SimilarityPairs::pairwise(&self.documents)?;
        pairs.sort_by_score();
        Ok(pairs)
    }

    /// The `n` documents closest to `key`, best first. `None` when `key` is unknown.
    pub fn most_similar(&self, key: &K, n: usize) -> Result<Option<SimilarityPairs<K>>, IncompatibleVectorError> {
        let Some(query) = self.get(key) else {
            return Ok(None);
        };
        let mut pairs = SimilarityPairs::against(query, &self.documents)?;
        pairs.sort_by_score().truncate(n);
        Ok(Some(pairs))
    }
}
