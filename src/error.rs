//! Error types for index building, scoring and corpus loading.

use std::path::PathBuf;

use thiserror::Error;

/// The document collection cannot produce a meaningful IDF map.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidCorpusError {
    #[error("corpus contains no documents")]
    Empty,

    #[error("term {term:?} appears in {doc_freq} documents but the corpus holds only {doc_num}")]
    DocFrequencyOverflow {
        term: String,
        doc_freq: u64,
        doc_num: u64,
    },

    #[error("duplicate document identifier: {0}")]
    DuplicateDocument(String),
}

/// Two vectors were not built against the same corpus index.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompatibleVectorError {
    #[error("vector length mismatch: {left} vs {right} (built against different corpus indexes?)")]
    Length { left: usize, right: usize },

    #[error("vectors built against different corpus indexes ({left:016x} vs {right:016x})")]
    Index { left: u64, right: u64 },
}

/// Crate-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    InvalidCorpus(#[from] InvalidCorpusError),

    #[error(transparent)]
    IncompatibleVector(#[from] IncompatibleVectorError),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk corpus directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
