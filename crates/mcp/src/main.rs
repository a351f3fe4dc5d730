#![forbid(unsafe_code)]

mod entry;
mod server;
mod support;
mod tools;

pub(crate) use support::*;

use lr_core::classify::Classifier;
use lr_storage::{KnowledgeCache, KnowledgeStore};
use std::process::ExitCode;
use std::sync::Arc;

// Protocol baseline echoed when the client does not declare a version.
const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "lexreview-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) struct McpServer {
    initialized: bool,
    store: KnowledgeStore,
    classifier: Classifier,
}

fn usage() -> &'static str {
    "lr_mcp — legal case review MCP server (stdio, read-only knowledge store)\n\n\
USAGE:\n\
  lr_mcp [--db PATH] [--classifier-config PATH] [--cache-capacity N]\n\
\n\
FLAGS:\n\
  --db PATH                  Knowledge database (env LEXREVIEW_DB, default data/case_types.db)\n\
  --classifier-config PATH   YAML keyword-stage tunables (env LEXREVIEW_CLASSIFIER_CONFIG)\n\
  --cache-capacity N         Entries per query cache, 0 disables (env LEXREVIEW_CACHE_CAPACITY)\n\
  -h, --help                 Print this help and exit\n\
  -V, --version              Print version/build and exit\n\
\n\
NOTES:\n\
  - Logs go to stderr; filter with RUST_LOG (default info)\n"
}

fn version_line() -> String {
    format!("lr_mcp {SERVER_VERSION} build={}", crate::build_fingerprint())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lr_mcp: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().collect::<Vec<_>>();
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print!("{}", usage());
        return Ok(());
    }
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-V" | "--version"))
    {
        println!("{}", version_line());
        return Ok(());
    }

    init_tracing();

    let db_path = parse_db_path();
    let classifier_config = match parse_classifier_config_path() {
        Some(path) => load_classifier_config(&path)?,
        None => Default::default(),
    };
    let cache_capacity = parse_cache_capacity()?;

    let cache = Arc::new(KnowledgeCache::new(cache_capacity));
    let store = KnowledgeStore::open(&db_path)?.with_cache(cache);
    let classifier = Classifier::new(classifier_config);
    tracing::info!(
        db = %db_path.display(),
        cache_capacity,
        version = SERVER_VERSION,
        "serving stdio"
    );

    let mut server = McpServer::new(store, classifier);
    entry::run_stdio(&mut server)?;
    tracing::info!("stdin closed, shutting down");
    Ok(())
}
