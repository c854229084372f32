use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use log::info;
use tf_idf_similarity::{
    config::DEFAULT_MAX_FILE_BYTES, load_corpus, tokenize_corpus, CorpusConfig, ReportConfig, Result,
    SourceTokenizer, TFIDFVectorizer,
};

/// Report the most similar source files under a directory, by TF-IDF cosine similarity.
#[derive(Parser, Debug)]
#[command(name = "tfidf-sim", version)]
struct Args {
    /// Directory (or single file) to scan
    root: PathBuf,

    /// File extension to include; repeat for several, `-e ''` disables the filter
    #[arg(short = 'e', long = "ext", value_name = "EXT", default_value = "java")]
    extensions: Vec<String>,

    /// Number of pairs to print, 0 for all
    #[arg(short = 'n', long, default_value_t = 10)]
    top: usize,

    /// Minimum similarity of a printed pair, inclusive
    #[arg(short, long, default_value_t = 0.0)]
    threshold: f64,

    /// Skip files larger than this many bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_FILE_BYTES)]
    max_file_bytes: u64,

    /// Follow symbolic links while walking
    #[arg(long)]
    follow_links: bool,

    /// Reduce terms to their English stem (`values` and `value` match)
    #[arg(long)]
    stem: bool,

    /// Print pairs as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn corpus_config(&self) -> CorpusConfig {
        CorpusConfig::new(&self.root)
            .with_extensions(&self.extensions)
            .with_max_file_bytes(self.max_file_bytes)
            .with_follow_links(self.follow_links)
    }

    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            top: self.top,
            threshold: self.threshold,
            json: self.json,
        }
    }

    fn tokenizer(&self) -> SourceTokenizer {
        SourceTokenizer::new().with_stemming(self.stem)
    }
}

/// Load, score and render the report.
fn run(args: &Args) -> Result<String> {
    let corpus_config = args.corpus_config();
    let report_config = args.report_config();

    let raw = load_corpus(&corpus_config)?;
    let documents = tokenize_corpus(raw, &args.tokenizer());
    let vectorizer: TFIDFVectorizer = TFIDFVectorizer::build(documents)?;
    info!(
        "{} documents, {} terms",
        vectorizer.doc_num(),
        vectorizer.corpus_index().vocab_size()
    );

    let mut pairs = vectorizer.pairwise()?;
    report_config.apply(&mut pairs);

    if report_config.json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&pairs)?))
    } else {
        Ok(pairs.to_string())
    }
}

/// Print the outcome of `run`; the error goes to stderr once. Returns the exit status.
fn finish(result: Result<String>) -> u8 {
    match result {
        Ok(report) => {
            print!("{report}");
            0
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    ExitCode::from(finish(run(&args)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["tfidf-sim", "subs"]).unwrap();
        assert_eq!(args.root, PathBuf::from("subs"));
        assert_eq!(args.extensions, vec!["java"]);
        assert_eq!(args.top, 10);
        assert_eq!(args.threshold, 0.0);
        assert_eq!(args.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
        assert!(!args.json && !args.verbose && !args.follow_links);
        assert_eq!(args.corpus_config(), CorpusConfig::new("subs"));
        assert_eq!(args.report_config(), ReportConfig::default());
    }

    #[test]
    fn repeated_extensions_and_options() {
        let args = Args::try_parse_from([
            "tfidf-sim", "-e", "c", "--ext", ".h", "-n", "0", "-t", "0.8", "--json", "-v", "subs",
        ])
        .unwrap();
        let corpus = args.corpus_config();
        assert_eq!(corpus.extensions, vec!["c", "h"]);
        let report = args.report_config();
        assert_eq!(report.top, 0);
        assert_eq!(report.threshold, 0.8);
        assert!(report.json);
        assert!(args.verbose);
    }

    #[test]
    fn root_is_required() {
        assert!(Args::try_parse_from(["tfidf-sim"]).is_err());
    }

    fn submissions() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, text) in [
            ("Sum.java", "int total = 0; for (int i = 0; i < values.length; i++) { total += values[i]; }"),
            ("Copy.java", "int sum = 0; for (int k = 0; k < values.length; k++) { sum += values[k]; }"),
            ("Hello.java", "System.out.println(\"Hello, world\");"),
            ("notes.txt", "int int int"),
        ] {
            std::fs::write(dir.path().join(name), text).unwrap();
        }
        dir
    }

    fn args(extra: &[&str], root: &std::path::Path) -> Args {
        let mut argv = vec!["tfidf-sim"];
        argv.extend_from_slice(extra);
        let root = root.to_str().unwrap();
        argv.push(root);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn text_report_lists_best_pair_first() {
        let dir = submissions();
        let report = run(&args(&["-n", "1"], dir.path())).unwrap();
        assert_eq!(report.lines().count(), 1);
        assert!(report.starts_with("Copy.java <-> Sum.java: "));
    }

    #[test]
    fn json_report_holds_every_pair() {
        let dir = submissions();
        let report = run(&args(&["--json", "-n", "0", "--stem"], dir.path())).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report).unwrap();
        let list = json["list"].as_array().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0]["left"], "Copy.java");
        assert_eq!(list[0]["right"], "Sum.java");
        assert!(list[0]["score"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn threshold_drops_unrelated_pairs() {
        let dir = submissions();
        let report = run(&args(&["-t", "0.01", "-n", "0"], dir.path())).unwrap();
        assert_eq!(report.lines().count(), 1);
    }

    #[test]
    fn exit_status_reflects_the_outcome() {
        let dir = submissions();
        assert_eq!(finish(run(&args(&[], dir.path()))), 0);

        let empty = tempfile::tempdir().unwrap();
        let result = run(&args(&[], empty.path()));
        assert!(matches!(
            result,
            Err(tf_idf_similarity::Error::InvalidCorpus(tf_idf_similarity::InvalidCorpusError::Empty))
        ));
        assert_eq!(finish(result), 1);
    }
}
