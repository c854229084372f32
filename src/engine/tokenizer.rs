//! Tokenizers: raw text -> ordered sequence of normalized terms.

use std::sync::OnceLock;

use rust_stemmers::{Algorithm, Stemmer};

/// English Snowball stemmer, built on first use
static STEMMER: OnceLock<Stemmer> = OnceLock::new();

fn get_stemmer() -> &'static Stemmer {
    STEMMER.get_or_init(|| Stemmer::create(Algorithm::English))
}

/// Tokenizer capability
///
/// Given the raw text of one document, returns its normalized terms in order,
/// duplicates kept. The vector space performs no normalization of its own, so
/// whatever the tokenizer emits is compared exactly (case-sensitive).
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Any `Fn(&str) -> Vec<String>` is a tokenizer.
impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Tokenizer for program source.
///
/// 1. splits on ASCII punctuation and whitespace (`_` and `$` included),
/// 2. splits identifiers at case and digit boundaries
///    (`camelCase` -> `camel` `Case`, `MAXNumber` -> `MAX` `Number`,
///    `top1Results` -> `top` `1` `Results`),
/// 3. drops pieces that are not identifiers (`1` above),
/// 4. keeps case as written,
/// 5. with stemming enabled, reduces each piece to its English stem
///    (`values` -> `valu`, `printing` -> `print`).
///
/// Stemming is off by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceTokenizer {
    stemming: bool,
}

impl SourceTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stemming(mut self, stemming: bool) -> Self {
        self.stemming = stemming;
        self
    }

    pub fn stemming(&self) -> bool {
        self.stemming
    }
}

impl Tokenizer for SourceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let pieces = text
            .split(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
            .filter(|word| !word.is_empty())
            .flat_map(split_identifier)
            .filter(|part| is_identifier(part));

        if !self.stemming {
            return pieces.map(str::to_string).collect();
        }
        let stemmer = get_stemmer();
        pieces.map(|part| stemmer.stem(part).into_owned()).collect()
    }
}

/// Split one word at identifier boundaries.
///
/// A boundary sits before a char `c` (never at the start) when
/// - `c` is upper case and the previous char is not,
/// - `c` is upper case and the next char is lower case,
/// - `c` is an ASCII digit.
pub fn split_identifier(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;
    for k in 1..chars.len() {
        let (pos, c) = chars[k];
        let prev = chars[k - 1].1;
        let next = chars.get(k + 1).map(|&(_, n)| n);
        let boundary = (c.is_uppercase() && !prev.is_uppercase())
            || (c.is_uppercase() && next.is_some_and(char::is_lowercase))
            || c.is_ascii_digit();
        if boundary {
            parts.push(&word[start..pos]);
            start = pos;
        }
    }
    if start < word.len() {
        parts.push(&word[start..]);
    }
    parts
}

/// Starts with a letter, continues with letters or digits.
pub fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => chars.all(char::is_alphanumeric),
        _ => false,
    }
}
