//! Document lifecycle: raw text, then terms and TF, then a TF-IDF vector.
//!
//! Each stage is immutable and only produced from the previous one, so a document
//! never exists with its TF or vector half computed.

use serde::Serialize;

use crate::{
    engine::tokenizer::Tokenizer,
    error::IncompatibleVectorError,
    vectorizer::{
        corpus::CorpusIndex,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::TermFrequency,
        TFIDFVector, Weight,
    },
};

/// A document as loaded: identifier and raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument<K = String> {
    id: K,
    text: String,
}

impl<K> RawDocument<K> {
    pub fn new(id: K, text: impl Into<String>) -> Self {
        Self { id, text: text.into() }
    }

    pub fn id(&self) -> &K {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Run the tokenizer over the text. The raw text is dropped.
    pub fn tokenize<T>(self, tokenizer: &T) -> TokenizedDocument<K>
    where
        T: Tokenizer + ?Sized,
    {
        let terms = tokenizer.tokenize(&self.text);
        TokenizedDocument::new(self.id, terms)
    }
}

/// A document reduced to its normalized terms and their raw frequencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenizedDocument<K = String> {
    id: K,
    terms: Vec<String>,
    tf: TermFrequency,
}

impl<K> TokenizedDocument<K> {
    /// Build from a pre-tokenized term sequence. TF is computed here, once.
    pub fn new(id: K, terms: Vec<String>) -> Self {
        let tf = Self::calculate_tf(&terms);
        Self { id, terms, tf }
    }

    pub fn from_terms<T>(id: K, terms: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        Self::new(id, terms.iter().map(|t| t.as_ref().to_string()).collect())
    }

    /// Raw count of every distinct term.
    pub fn calculate_tf<T>(terms: &[T]) -> TermFrequency
    where
        T: AsRef<str>,
    {
        TermFrequency::from_terms(terms)
    }

    pub fn id(&self) -> &K {
        &self.id
    }

    /// Terms in tokenization order, duplicates kept.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn tf(&self) -> &TermFrequency {
        &self.tf
    }

    #[inline]
    pub fn tf_count(&self, term: &str) -> u32 {
        self.tf.term_count(term)
    }

    /// Length of the term sequence.
    #[inline]
    pub fn token_sum(&self) -> usize {
        self.terms.len()
    }

    /// Number of distinct terms.
    #[inline]
    pub fn term_num(&self) -> usize {
        self.tf.term_num()
    }

    /// TF-IDF vector against `index`, with the default engine.
    pub fn calculate_tf_idf<N>(&self, index: &CorpusIndex<K>) -> TFIDFVector<N>
    where
        N: Weight,
    {
        self.calculate_tf_idf_with::<N, DefaultTFIDFEngine>(index)
    }

    /// TF-IDF vector against `index`.
    /// Length and positions come from the index's canonical term order,
    /// not from this document's own vocabulary.
    pub fn calculate_tf_idf_with<N, E>(&self, index: &CorpusIndex<K>) -> TFIDFVector<N>
    where
        N: Weight,
        E: TFIDFEngine,
    {
        TFIDFVector::with_index(E::tf_idf_vec(&self.tf, index.idf_map()), index.fingerprint())
    }

    /// Move on to the scored stage.
    pub fn into_scored<N>(self, index: &CorpusIndex<K>) -> ScoredDocument<N, K>
    where
        N: Weight,
    {
        self.into_scored_with::<N, DefaultTFIDFEngine>(index)
    }

    pub fn into_scored_with<N, E>(self, index: &CorpusIndex<K>) -> ScoredDocument<N, K>
    where
        N: Weight,
        E: TFIDFEngine,
    {
        let vector = self.calculate_tf_idf_with::<N, E>(index);
        ScoredDocument { doc: self, vector }
    }
}

/// A tokenized document together with its TF-IDF vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDocument<N = f64, K = String>
where
    N: Weight,
{
    doc: TokenizedDocument<K>,
    vector: TFIDFVector<N>,
}

impl<N, K> ScoredDocument<N, K>
where
    N: Weight,
{
    pub fn id(&self) -> &K {
        self.doc.id()
    }

    pub fn terms(&self) -> &[String] {
        self.doc.terms()
    }

    pub fn tf(&self) -> &TermFrequency {
        self.doc.tf()
    }

    pub fn vector(&self) -> &TFIDFVector<N> {
        &self.vector
    }

    /// Size of the vocabulary this vector was built against.
    pub fn vocab_size(&self) -> usize {
        self.vector.len()
    }

    /// Cosine similarity between this document's vector and `other`'s.
    ///
    /// Both must come from the same corpus index. A zero vector on either side gives 0.0.
    pub fn calculate_cosine_similarity(&self, other: &Self) -> Result<f64, IncompatibleVectorError> {
        self.vector.cosine_similarity(&other.vector)
    }

    pub fn into_parts(self) -> (TokenizedDocument<K>, TFIDFVector<N>) {
        (self.doc, self.vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<TokenizedDocument<&'static str>> {
        vec![
            TokenizedDocument::from_terms("a", &["for", "i", "i", "hello"]),
            TokenizedDocument::from_terms("b", &["for", "hello"]),
            TokenizedDocument::from_terms("c", &["i"]),
        ]
    }

    #[test]
    fn tf_keys_are_distinct_terms_and_sum_to_length() {
        let doc = TokenizedDocument::from_terms("a", &["for", "i", "i", "hello"]);
        assert_eq!(doc.tf_count("for"), 1);
        assert_eq!(doc.tf_count("i"), 2);
        assert_eq!(doc.tf_count("hello"), 1);
        assert_eq!(doc.term_num(), 3);
        assert_eq!(doc.tf().term_sum() as usize, doc.token_sum());
    }

    #[test]
    fn vector_matches_worked_example() {
        let docs = corpus();
        let index = CorpusIndex::new(&docs).unwrap();
        let w = (3.0f64 / 2.0).ln();

        let a: TFIDFVector = docs[0].calculate_tf_idf(&index);
        let b: TFIDFVector = docs[1].calculate_tf_idf(&index);
        assert_eq!(a.as_slice(), &[w, 2.0 * w, w]);
        assert_eq!(b.as_slice(), &[w, 0.0, w]);
    }

    #[test]
    fn vector_length_is_vocabulary_size() {
        let docs = corpus();
        let index = CorpusIndex::new(&docs).unwrap();
        for doc in &docs {
            let v: TFIDFVector<f32> = doc.calculate_tf_idf(&index);
            assert_eq!(v.len(), index.vocab_size());
        }
    }

    #[test]
    fn cosine_similarity_between_scored_documents() {
        let docs = corpus();
        let index = CorpusIndex::new(&docs).unwrap();
        let scored: Vec<ScoredDocument<f64, &str>> =
            docs.into_iter().map(|d| d.into_scored(&index)).collect();

        let ab = scored[0].calculate_cosine_similarity(&scored[1]).unwrap();
        let ba = scored[1].calculate_cosine_similarity(&scored[0]).unwrap();
        assert!((ab - 1.0 / 3f64.sqrt()).abs() < 1e-12);
        assert_eq!(ab, ba);

        // b and c share no term
        assert_eq!(scored[1].calculate_cosine_similarity(&scored[2]).unwrap(), 0.0);
        assert!((scored[2].calculate_cosine_similarity(&scored[2]).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn vectors_from_different_indexes_are_incompatible() {
        let docs = corpus();
        let index = CorpusIndex::new(&docs).unwrap();
        let other_docs = vec![TokenizedDocument::from_terms("z", &["only"])];
        let other_index = CorpusIndex::new(&other_docs).unwrap();

        let a: ScoredDocument<f64, &str> = docs[0].clone().into_scored(&index);
        let z: ScoredDocument<f64, &str> = other_docs[0].clone().into_scored(&other_index);
        let err = a.calculate_cosine_similarity(&z).unwrap_err();
        assert_eq!(err, IncompatibleVectorError::Length { left: 3, right: 1 });
    }

    #[test]
    fn same_sized_vectors_from_different_indexes_are_incompatible() {
        let left_docs = vec![
            TokenizedDocument::from_terms("a", &["x", "y"]),
            TokenizedDocument::from_terms("b", &["x"]),
        ];
        let right_docs = vec![
            TokenizedDocument::from_terms("p", &["x", "y"]),
            TokenizedDocument::from_terms("q", &["y"]),
        ];
        let left_index = CorpusIndex::new(&left_docs).unwrap();
        let right_index = CorpusIndex::new(&right_docs).unwrap();
        assert_eq!(left_index.vocab_size(), right_index.vocab_size());

        let a: ScoredDocument<f64, &str> = left_docs[0].clone().into_scored(&left_index);
        let p: ScoredDocument<f64, &str> = right_docs[0].clone().into_scored(&right_index);
        assert_eq!(
            a.calculate_cosine_similarity(&p).unwrap_err(),
            IncompatibleVectorError::Index {
                left: left_index.fingerprint(),
                right: right_index.fingerprint(),
            }
        );

        // unstamped vectors fall back to the length check
        let raw_a = TFIDFVector::new(a.vector().as_slice().to_vec());
        let raw_p = TFIDFVector::new(p.vector().as_slice().to_vec());
        assert!(raw_a.cosine_similarity(&raw_p).is_ok());
    }

    #[test]
    fn single_document_corpus_has_zero_vector() {
        let docs = vec![TokenizedDocument::from_terms("only", &["x", "y", "x"])];
        let index = CorpusIndex::new(&docs).unwrap();
        let scored: ScoredDocument<f64, &str> = docs[0].clone().into_scored(&index);
        assert!(scored.vector().is_zero());
        assert_eq!(scored.calculate_cosine_similarity(&scored).unwrap(), 0.0);
    }
}
