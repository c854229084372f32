//! Run settings for loading a corpus and reporting its similar pairs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::vectorizer::evaluate::scoring::SimilarityPairs;

/// Default size limit per file, 1 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1 << 20;

/// Which files under `root` make up the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub root: PathBuf,
    /// Accepted file extensions without the dot, matched case-insensitively.
    /// Empty accepts every file.
    pub extensions: Vec<String>,
    /// Files larger than this are skipped.
    pub max_file_bytes: u64,
    pub follow_links: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: vec!["java".to_string()],
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            follow_links: false,
        }
    }
}

impl CorpusConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Replace the accepted extensions. A leading `.` is stripped.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// true when `path` has one of the accepted extensions
    pub fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    }
}

/// How the pair list is cut down before printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Keep the best `top` pairs, 0 keeps all.
    pub top: usize,
    /// Drop pairs scoring below this; a pair scoring exactly `threshold` is kept.
    pub threshold: f64,
    pub json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top: 10,
            threshold: 0.0,
            json: false,
        }
    }
}

impl ReportConfig {
    /// Sort best first, drop pairs under the threshold, then keep the top ones.
    pub fn apply<K>(&self, pairs: &mut SimilarityPairs<K>) {
        pairs.sort_by_score().retain_at_least(self.threshold);
        if self.top > 0 {
            pairs.truncate(self.top);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::evaluate::scoring::SimilarityPair;

    #[test]
    fn defaults() {
        let config = CorpusConfig::default();
        assert_eq!(config.extensions, vec!["java"]);
        assert_eq!(config.max_file_bytes, 1024 * 1024);
        assert!(!config.follow_links);
        assert_eq!(ReportConfig::default().top, 10);
    }

    #[test]
    fn extension_filter() {
        let config = CorpusConfig::new("src").with_extensions([".java", "KT"]);
        assert!(config.accepts(Path::new("a/Main.java")));
        assert!(config.accepts(Path::new("a/Main.JAVA")));
        assert!(config.accepts(Path::new("Util.kt")));
        assert!(!config.accepts(Path::new("README.md")));
        assert!(!config.accepts(Path::new("Makefile")));

        let all = CorpusConfig::new("src").with_extensions(Vec::<String>::new());
        assert!(all.accepts(Path::new("Makefile")));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: CorpusConfig =
            serde_json::from_str(r#"{ "root": "/tmp/subs", "extensions": ["c", "h"] }"#).unwrap();
        assert_eq!(config.root, PathBuf::from("/tmp/subs"));
        assert_eq!(config.extensions, vec!["c", "h"]);
        assert_eq!(config.max_file_bytes, DEFAULT_MAX_FILE_BYTES);

        let report: ReportConfig = serde_json::from_str(r#"{ "json": true }"#).unwrap();
        assert_eq!(report, ReportConfig { json: true, ..ReportConfig::default() });
    }

    #[test]
    fn report_filters_then_truncates() {
        let pair = |left: &'static str, score: f64| SimilarityPair { left, right: "z", score };
        let mut pairs = SimilarityPairs::new(vec![
            pair("a", 0.2),
            pair("b", 0.9),
            pair("c", 0.5),
            pair("d", 0.7),
        ]);
        let report = ReportConfig { top: 2, threshold: 0.3, json: false };
        report.apply(&mut pairs);
        let lefts: Vec<&str> = pairs.iter().map(|p| p.left).collect();
        assert_eq!(lefts, vec!["b", "d"]);

        let mut pairs = SimilarityPairs::new(vec![pair("a", 0.2), pair("b", 0.9)]);
        ReportConfig { top: 0, threshold: 0.0, json: false }.apply(&mut pairs);
        assert_eq!(pairs.len(), 2);
    }
}
