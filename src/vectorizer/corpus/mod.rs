use std::{
    collections::hash_map::DefaultHasher,
    fmt::Debug,
    hash::{Hash, Hasher},
};

use indexmap::IndexSet;
use log::{debug, trace};

use crate::{
    error::InvalidCorpusError,
    vectorizer::{
        document::TokenizedDocument,
        tfidf::{DefaultTFIDFEngine, IDFMap, InvertedIndex, TFIDFEngine},
    },
};

/// Corpus-wide statistics for a fixed document collection.
///
/// Holds the inverted index (term -> documents containing it) and the IDF map built
/// from it. Both share one canonical term order: first occurrence when walking the
/// documents in collection order and each document's terms in tokenization order.
/// Every TF-IDF vector built against this index uses that order, which is what makes
/// vectors of different documents comparable position by position.
///
/// Built once and read-only afterwards; share it behind an `Arc` if needed.
#[derive(Debug, Clone)]
pub struct CorpusIndex<K = String> {
    inverted_index: InvertedIndex<K>,
    idf: IDFMap,
    /// document ids in collection order
    doc_ids: IndexSet<K>,
    /// hash of doc ids, terms and idf; stamped on every vector built against this index
    fingerprint: u64,
}

impl<K> CorpusIndex<K>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Build with the default `ln(N / df)` IDF.
    pub fn new(documents: &[TokenizedDocument<K>]) -> Result<Self, InvalidCorpusError> {
        Self::build_with::<DefaultTFIDFEngine>(documents)
    }

    pub fn build_with<E>(documents: &[TokenizedDocument<K>]) -> Result<Self, InvalidCorpusError>
    where
        E: TFIDFEngine,
    {
        if documents.is_empty() {
            return Err(InvalidCorpusError::Empty);
        }

        let mut doc_ids = IndexSet::with_capacity(documents.len());
        for doc in documents {
            if !doc_ids.insert(doc.id().clone()) {
                return Err(InvalidCorpusError::DuplicateDocument(format!("{:?}", doc.id())));
            }
        }

        let inverted_index = Self::build_inverted_index(documents);
        let idf = E::idf_map(&inverted_index, doc_ids.len() as u64)?;
        let fingerprint = Self::calculate_fingerprint(&doc_ids, &idf);
        debug!(
            "corpus index built: {} documents, {} terms, fingerprint {:016x}",
            doc_ids.len(),
            idf.len(),
            fingerprint
        );

        Ok(Self {
            inverted_index,
            idf,
            doc_ids,
            fingerprint,
        })
    }

    /// Identical inputs give identical fingerprints, so rebuilding an index keeps
    /// its vectors comparable.
    fn calculate_fingerprint(doc_ids: &IndexSet<K>, idf: &IDFMap) -> u64 {
        let mut hasher = DefaultHasher::new();
        doc_ids.len().hash(&mut hasher);
        for id in doc_ids {
            id.hash(&mut hasher);
        }
        idf.len().hash(&mut hasher);
        for (term, value) in idf {
            term.hash(&mut hasher);
            value.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }

    /// term -> set of ids of the documents containing it at least once.
    ///
    /// A document appears once per term however often it repeats the term.
    pub fn build_inverted_index(documents: &[TokenizedDocument<K>]) -> InvertedIndex<K> {
        let mut inverted_index = InvertedIndex::new();
        for doc in documents {
            // tf keys are the distinct terms in first-occurrence order
            for (term, _) in doc.tf().iter() {
                match inverted_index.get_mut(term) {
                    Some(doc_ids) => {
                        doc_ids.insert(doc.id().clone());
                    }
                    None => {
                        let mut doc_ids = IndexSet::new();
                        doc_ids.insert(doc.id().clone());
                        inverted_index.insert(term.into(), doc_ids);
                    }
                }
            }
            trace!("indexed {:?}: {} distinct terms", doc.id(), doc.term_num());
        }
        inverted_index
    }

    /// Ids of the documents containing `term`.
    pub fn postings(&self, term: &str) -> Option<&IndexSet<K>> {
        self.inverted_index.get(term)
    }

    pub fn contains_doc(&self, id: &K) -> bool {
        self.doc_ids.contains(id)
    }

    /// Position of a document in collection order.
    pub fn doc_position(&self, id: &K) -> Option<usize> {
        self.doc_ids.get_index_of(id)
    }
}

impl<K> PartialEq for CorpusIndex<K>
where
    K: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.doc_ids == other.doc_ids
            && self.inverted_index == other.inverted_index
            && self.idf == other.idf
    }
}

/// Read accessors
impl<K> CorpusIndex<K> {
    /// N, the number of documents.
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_ids.len() as u64
    }

    /// Number of distinct terms; the length of every vector built against this index.
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.idf.len()
    }

    /// Vocabulary in canonical order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.idf.keys().map(|term| term.as_ref())
    }

    /// Vector position of `term`.
    pub fn term_position(&self, term: &str) -> Option<usize> {
        self.idf.get_index_of(term)
    }

    /// Term at vector position `position`.
    pub fn term_at(&self, position: usize) -> Option<&str> {
        self.idf.get_index(position).map(|(term, _)| term.as_ref())
    }

    /// Document frequency, 0 for unknown terms.
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.inverted_index
            .get(term)
            .map_or(0, |doc_ids| doc_ids.len() as u64)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }

    pub fn idf_map(&self) -> &IDFMap {
        &self.idf
    }

    pub fn inverted_index(&self) -> &InvertedIndex<K> {
        &self.inverted_index
    }

    pub fn doc_ids(&self) -> &IndexSet<K> {
        &self.doc_ids
    }

    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}
