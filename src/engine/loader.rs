//! Corpus loading: directory tree -> ordered raw documents -> tokenized documents.

use std::{fs, path::Path};

use log::{debug, info, trace, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::{
    config::CorpusConfig,
    engine::tokenizer::Tokenizer,
    error::{Error, Result},
    vectorizer::document::{RawDocument, TokenizedDocument},
};

/// Read every accepted file under `config.root`.
///
/// Documents are keyed by their path relative to the root, `/`-separated, and
/// returned sorted by that key so the corpus order does not depend on the
/// file system. A root that is itself a file yields one document keyed by its
/// file name.
pub fn load_corpus(config: &CorpusConfig) -> Result<Vec<RawDocument<String>>> {
    let mut documents = Vec::new();
    let mut skipped = 0usize;

    for entry in WalkDir::new(&config.root).follow_links(config.follow_links) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !config.accepts(path) {
            trace!("ignoring {}", path.display());
            continue;
        }

        let size = entry.metadata()?.len();
        if size > config.max_file_bytes {
            warn!(
                "skipping {}: {} bytes exceeds the {} byte limit",
                path.display(),
                size,
                config.max_file_bytes
            );
            skipped += 1;
            continue;
        }

        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let id = document_id(&config.root, path);
        debug!("loaded {id} ({size} bytes)");
        documents.push(RawDocument::new(id, text));
    }

    documents.sort_by(|a, b| a.id().cmp(b.id()));
    info!(
        "loaded {} documents from {} ({} skipped)",
        documents.len(),
        config.root.display(),
        skipped
    );
    Ok(documents)
}

/// `path` relative to `root`, with `/` separators.
pub fn document_id(root: &Path, path: &Path) -> String {
    let relative = match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => path.file_name().map(Path::new).unwrap_or(path),
        Ok(rel) => rel,
        Err(_) => path,
    };
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Tokenize every document in parallel. Output order matches input order.
pub fn tokenize_corpus<K, T>(documents: Vec<RawDocument<K>>, tokenizer: &T) -> Vec<TokenizedDocument<K>>
where
    K: Send,
    T: Tokenizer + ?Sized,
{
    documents
        .into_par_iter()
        .map(|doc| doc.tokenize(tokenizer))
        .collect()
}
