use std::fmt::{self, Debug, Display};

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    error::IncompatibleVectorError,
    vectorizer::{document::ScoredDocument, Weight},
};

/// Cosine similarity of one document pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityPair<K> {
    pub left: K,
    pub right: K,
    pub score: f64,
}

/// Structure to store similarity results
#[derive(Clone, PartialEq, Serialize)]
pub struct SimilarityPairs<K> {
    pub list: Vec<SimilarityPair<K>>,
}

impl<K> Default for SimilarityPairs<K> {
    fn default() -> Self {
        Self { list: Vec::new() }
    }
}

impl<K> SimilarityPairs<K>
where
    K: Clone + Send + Sync,
{
    /// Score every unordered pair `(i, j)`, `i < j`, in collection order.
    pub fn pairwise<N>(documents: &[ScoredDocument<N, K>]) -> Result<Self, IncompatibleVectorError>
    where
        N: Weight,
    {
        let n = documents.len();
        let list = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| (i + 1..n).map(move |j| (i, j)))
            .map(|(i, j)| {
                let (a, b) = (&documents[i], &documents[j]);
                a.calculate_cosine_similarity(b).map(|score| SimilarityPair {
                    left: a.id().clone(),
                    right: b.id().clone(),
                    score,
                })
            })
            .collect::<Result<Vec<_>, IncompatibleVectorError>>()?;
        Ok(Self { list })
    }

    /// Score `query` against every other document.
    /// Documents sharing the query's id are skipped.
    pub fn against<N>(query: &ScoredDocument<N, K>, documents: &[ScoredDocument<N, K>]) -> Result<Self, IncompatibleVectorError>
    where
        N: Weight,
        K: PartialEq,
    {
        let list = documents
            .par_iter()
            .filter(|doc| doc.id() != query.id())
            .map(|doc| {
                query.calculate_cosine_similarity(doc).map(|score| SimilarityPair {
                    left: query.id().clone(),
                    right: doc.id().clone(),
                    score,
                })
            })
            .collect::<Result<Vec<_>, IncompatibleVectorError>>()?;
        Ok(Self { list })
    }
}

impl<K> SimilarityPairs<K> {
    pub fn new(list: Vec<SimilarityPair<K>>) -> Self {
        Self { list }
    }

    /// Sort by descending score, equal scores keep their order. NaN scores are dropped.
    pub fn sort_by_score(&mut self) -> &mut Self {
        self.list.retain(|pair| !pair.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    /// Keep pairs scoring at least `threshold` (inclusive).
    pub fn retain_at_least(&mut self, threshold: f64) -> &mut Self {
        self.list.retain(|pair| pair.score >= threshold);
        self
    }

    /// Keep the first `n` pairs.
    pub fn truncate(&mut self, n: usize) -> &mut Self {
        self.list.truncate(n);
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimilarityPair<K>> {
        self.list.iter()
    }
}

impl<K> Debug for SimilarityPairs<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "SimilarityPairs [")?;
            for pair in &self.list {
                writeln!(f, "    {:?} <-> {:?}: {:.6}", pair.left, pair.right, pair.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

/// One `left <-> right: score` line per pair.
impl<K> Display for SimilarityPairs<K>
where
    K: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pair in &self.list {
            writeln!(f, "{} <-> {}: {:.6}", pair.left, pair.right, pair.score)?;
        }
        Ok(())
    }
}
