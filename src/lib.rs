/// This crate is a source-code similarity engine built on a TF-IDF vector space.
pub mod config;
pub mod engine;
pub mod error;
pub mod vectorizer;

/// TF-IDF Vectorizer
/// The top-level struct of this crate.
/// It builds a corpus index over a fixed document collection, vectorizes every
/// document against it and scores document pairs by cosine similarity.
///
/// Internally, it holds:
/// - The corpus index (inverted index, IDF map, canonical term order)
/// - Every document with its TF and dense TF-IDF vector
///
/// `TFIDFVectorizer<N, K, E>` has the following generic parameters:
/// - `N`: Vector element type (f32, f64)
/// - `K`: Document key type (e.g., String path, usize)
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
///
/// The index is shared as `Arc<CorpusIndex>` and never changes after the build.
/// Adding a document means building a new vectorizer.
pub use vectorizer::TFIDFVectorizer;

/// Corpus Index
/// Corpus-wide statistics for a fixed document collection:
/// - The inverted index (term -> ids of the documents containing it)
/// - The IDF of every term
/// - The canonical term order shared by every vector built against it
///
/// Read-only after the build, so it can be shared among threads.
pub use vectorizer::corpus::CorpusIndex;

/// Term Frequency structure
/// Raw occurrence counts of the terms of one document.
/// It manages:
/// - The count of occurrences of each term
/// - The total number of terms in the document
pub use vectorizer::token::TermFrequency;

/// Document stages
/// - `RawDocument`: identifier and raw text
/// - `TokenizedDocument`: identifier, terms and term frequencies
/// - `ScoredDocument`: a tokenized document and its TF-IDF vector
pub use vectorizer::document::{RawDocument, ScoredDocument, TokenizedDocument};

/// Dense TF-IDF vector, aligned to a corpus index's canonical term order.
pub use vectorizer::{TFIDFVector, Weight};

/// Query surface over plain data: index, vectorize, compare.
pub use vectorizer::{build_index, similarity, vectorize};

/// TF IDF Calculation Engine Trait
/// A trait that defines how document frequencies become IDF weights and how
/// TF and IDF combine into a vector.
///
/// A default implementation, `DefaultTFIDFEngine`, computes `ln(N / df)` without
/// smoothing and weights raw TF by it.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Vector comparison: dot product, norm, cosine similarity.
pub use vectorizer::compute::{Compare, DefaultCompare};

/// Similarity Pairs structures
/// - `SimilarityPairs`: scored document pairs with sorting and filtering
/// - `SimilarityPair`: one pair of document keys and its cosine similarity
pub use vectorizer::evaluate::scoring::{SimilarityPair, SimilarityPairs};

/// Tokenizers
/// `Tokenizer` turns raw text into terms. `SourceTokenizer` splits program
/// source on punctuation and identifier case boundaries.
pub use engine::tokenizer::{SourceTokenizer, Tokenizer};

/// Corpus loading from a directory tree.
pub use engine::loader::{load_corpus, tokenize_corpus};

pub use config::{CorpusConfig, ReportConfig};

pub use error::{Error, IncompatibleVectorError, InvalidCorpusError, Result};
