use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TermFrequency
/// Raw occurrence counts of the terms of one document.
///
/// Keys are exactly the distinct terms that were added, in first-occurrence order.
/// A term that never occurred is absent, never stored with a zero count.
///
/// # Examples
/// ```
/// use tf_idf_similarity::TermFrequency;
/// let mut freq = TermFrequency::new();
/// freq.add_terms(&["for", "i", "i", "hello"]);
///
/// assert_eq!(freq.term_count("i"), 2);
/// assert_eq!(freq.tf("hello"), 1.0);
/// assert_eq!(freq.term_sum(), 4);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u32>,
    total_term_count: u64,
}

/// term の追加
impl TermFrequency {
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Count every term of `terms` (exact, case-sensitive match).
    pub fn from_terms<T>(terms: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        let mut freq = Self::new();
        freq.add_terms(terms);
        freq
    }

    /// Add one occurrence of `term`.
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        // avoid allocating for terms already seen
        match self.term_count.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.term_count.insert(term.to_string(), 1);
            }
        }
        self.total_term_count += 1;
        self
    }

    /// Add one occurrence of each term.
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }
}

/// TF
impl TermFrequency {
    /// Raw term frequency as a real number, `0.0` for absent terms.
    #[inline]
    pub fn tf(&self, term: &str) -> f64 {
        self.term_count(term) as f64
    }
}

/// 情報取得
impl TermFrequency {
    /// Occurrences of `term`, 0 when absent.
    #[inline]
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total number of occurrences, i.e. the length of the source term sequence.
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms.
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    /// `(term, count)` pairs in first-occurrence order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }
}
