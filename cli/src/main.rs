use anyhow::Result;
use bitquery_core::{Config, DocId, FsSource, IngestError, Pipeline, PostingStore, QueryEngine, QueryError};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "bitquery")]
#[command(about = "Index text files and run boolean queries over them", long_about = None)]
struct Cli {
    /// JSON file with stopword and stemming settings
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for files to index, then for queries
    Repl,
    /// Index the given files and run one query
    Search {
        /// Query, e.g. "kernel && (panic || !oops)"
        #[arg(long)]
        query: String,
        /// Descend into directories instead of rejecting them
        #[arg(long, default_value_t = false)]
        recursive: bool,
        /// Files (or directories with --recursive) to index
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let mut store = PostingStore::new(Box::new(Pipeline::from_config(&config)?));

    match cli.command {
        Commands::Repl => repl(&mut store),
        Commands::Search { query, recursive, paths } => {
            let source = FsSource::new();
            for name in expand(&paths, recursive) {
                add(&mut store, &source, &name);
            }
            tracing::info!(num_docs = store.len(), num_terms = store.terms(), "ingested documents");
            print_result(QueryEngine::new(&store).evaluate(&query))?;
            Ok(())
        }
    }
}

fn repl(store: &mut PostingStore) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let source = FsSource::new();

    loop {
        prompt("File to add to index (empty line to start querying): ")?;
        match lines.next().transpose()? {
            Some(name) if !name.is_empty() => add(store, &source, &name),
            _ => break,
        }
    }

    let engine = QueryEngine::new(store);
    loop {
        prompt("Query: ")?;
        let Some(query) = lines.next().transpose()? else {
            return Ok(());
        };
        if let Err(e) = print_result(engine.evaluate(&query)) {
            println!("[Error] {e}");
        }
    }
}

fn add(store: &mut PostingStore, source: &FsSource, name: &str) {
    println!("{}", ingest_report(name, &store.ingest(name, source)));
}

fn ingest_report(name: &str, outcome: &Result<DocId, IngestError>) -> String {
    match outcome {
        Ok(doc_id) => format!("[Success] {name} indexed as document {doc_id}"),
        Err(e) => format!("[Error] {e}"),
    }
}

fn print_result(result: Result<Option<Vec<String>>, QueryError>) -> Result<(), QueryError> {
    match result? {
        None => println!("no query"),
        Some(names) if names.is_empty() => println!("no documents matched"),
        Some(names) => {
            for name in names {
                println!("{name}");
            }
        }
    }
    Ok(())
}

/// Paths as document names; with `recursive`, directories become their files in name order.
fn expand(paths: &[PathBuf], recursive: bool) -> Vec<String> {
    let mut names = Vec::new();
    for path in paths {
        if recursive && path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file() {
                    names.push(display_name(entry.path()));
                }
            }
        } else {
            names.push(display_name(path));
        }
    }
    names
}

fn display_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn prompt(text: &str) -> io::Result<()> {
    print!("{text}");
    io::stdout().flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn expand_walks_directories_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("sub/c.txt"), "c").unwrap();

        let names = expand(&[dir.path().to_path_buf()], true);
        let rel: Vec<String> = names
            .iter()
            .map(|n| Path::new(n).strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(rel, vec!["a.txt", "b.txt", "sub/c.txt"]);
    }

    #[test]
    fn expand_keeps_directories_without_recursion() {
        let dir = tempfile::tempdir().unwrap();
        let names = expand(&[dir.path().to_path_buf()], false);
        assert_eq!(names, vec![display_name(dir.path())]);
    }

    #[test]
    fn ingest_reports_use_success_and_error_tags() {
        assert_eq!(ingest_report("a.txt", &Ok(1)), "[Success] a.txt indexed as document 1");
        let dup = Err(IngestError::DuplicateDocument("a.txt".into()));
        assert_eq!(ingest_report("a.txt", &dup), "[Error] document \"a.txt\" is already in the index");

        let dir = tempfile::tempdir().unwrap();
        let mut store = PostingStore::default();
        let missing = dir.path().join("missing.txt");
        let outcome = store.ingest(&display_name(&missing), &FsSource::new());
        assert!(ingest_report("missing.txt", &outcome).starts_with("[Error] content of"));
    }

    #[test]
    fn cli_parses_search() {
        let cli = Cli::try_parse_from(["bitquery", "search", "--query", "a && b", "x.txt", "y.txt"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.json"));
        match cli.command {
            Commands::Search { query, recursive, paths } => {
                assert_eq!(query, "a && b");
                assert!(!recursive);
                assert_eq!(paths.len(), 2);
            }
            Commands::Repl => panic!("expected search"),
        }
    }
}
