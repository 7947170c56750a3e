// File reference extraction from message text

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Matches fenced blocks tagged `image` or `file` and captures the body
/// as a candidate local path. The body may be separated from the fence by
/// real whitespace or by an escaped `\n` sequence surviving in the text.
static FILEPATH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:image|file)(?:\\n|\s)+([\s\S]*?)(?:\\n|\s)+```")
        .expect("file reference pattern is valid")
});

/// Extract candidate file paths from a single message text, trimmed of
/// surrounding whitespace.
pub fn extract_candidates(text: &str) -> Vec<PathBuf> {
    FILEPATH_PATTERN
        .captures_iter(text)
        .map(|captures| PathBuf::from(captures[1].trim()))
        .collect()
}

/// Scan every message text under consideration and collect the referenced
/// paths. With `require_existing` set, candidates that do not exist on the
/// local filesystem are silently dropped.
pub fn collect_file_paths(texts: &[&str], require_existing: bool) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = texts
        .iter()
        .flat_map(|text| extract_candidates(text))
        .collect();
    debug!("Extracted file candidates: {:?}", paths);

    if require_existing {
        paths.retain(|path| Path::new(path).exists());
        debug!("Existing file paths: {:?}", paths);
    }
    paths
}
