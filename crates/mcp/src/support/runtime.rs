#![forbid(unsafe_code)]

use lr_core::classify::ClassifierConfig;
use lr_storage::cache::DEFAULT_CACHE_CAPACITY;
use std::path::{Path, PathBuf};

const DEFAULT_DB_PATH: &str = "data/case_types.db";

/// Value following `flag` on the command line; a flag given twice keeps its first value.
fn flag_value<I>(args: I, flag: &str) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg.as_str() == flag {
            return args.next();
        }
        if let Some(value) = arg.strip_prefix(flag).and_then(|rest| rest.strip_prefix('=')) {
            return Some(value.to_string());
        }
    }
    None
}

fn cli_or_env(flag: &str, env_key: &str) -> Option<String> {
    flag_value(std::env::args().skip(1), flag)
        .or_else(|| std::env::var(env_key).ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn parse_db_path() -> PathBuf {
    cli_or_env("--db", "LEXREVIEW_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

pub(crate) fn parse_classifier_config_path() -> Option<PathBuf> {
    cli_or_env("--classifier-config", "LEXREVIEW_CLASSIFIER_CONFIG").map(PathBuf::from)
}

pub(crate) fn parse_cache_capacity() -> Result<usize, Box<dyn std::error::Error>> {
    match cli_or_env("--cache-capacity", "LEXREVIEW_CACHE_CAPACITY") {
        Some(raw) => parse_capacity(&raw),
        None => Ok(DEFAULT_CACHE_CAPACITY),
    }
}

fn parse_capacity(raw: &str) -> Result<usize, Box<dyn std::error::Error>> {
    raw.parse::<usize>()
        .map_err(|e| format!("invalid cache capacity {raw:?}: {e}").into())
}

/// Reads the keyword-stage tunables. Missing keys keep their defaults; unknown keys and
/// out-of-range values are rejected.
pub(crate) fn load_classifier_config(
    path: &Path,
) -> Result<ClassifierConfig, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("read classifier config {}: {e}", path.display()))?;
    let config = parse_classifier_config(&raw)
        .map_err(|e| format!("classifier config {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "classifier config loaded");
    Ok(config)
}

fn parse_classifier_config(raw: &str) -> Result<ClassifierConfig, Box<dyn std::error::Error>> {
    if raw.trim().is_empty() {
        return Ok(ClassifierConfig::default());
    }
    let config: ClassifierConfig = serde_yaml::from_str(raw)?;
    config.validate()?;
    Ok(config)
}
