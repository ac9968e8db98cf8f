//! Shared CLI utilities.

use crate::config::CliConfig;
use envfile::{Loader, MemoryEnv, Resolver, DEFAULT_FILE};
use std::path::PathBuf;

/// Files to process: command-line arguments, else the configured list, else
/// the default file.
pub fn resolve_files(cli_files: &[String], config: &CliConfig) -> Vec<PathBuf> {
    let files = config.files_or(cli_files);
    if files.is_empty() {
        vec![PathBuf::from(DEFAULT_FILE)]
    } else {
        files.iter().map(PathBuf::from).collect()
    }
}

/// Build a loader honoring the configured pass ceiling.
pub fn build_loader(cli_max_passes: Option<usize>, config: &CliConfig) -> Loader {
    let mut resolver = Resolver::new();
    if let Some(max) = cli_max_passes.or(config.max_passes) {
        resolver = resolver.with_max_passes(max);
    }
    Loader::new().with_resolver(resolver)
}

/// Copy of the process environment, so files can be applied in order
/// without touching the real one.
pub fn snapshot_env() -> MemoryEnv {
    std::env::vars_os()
        .map(|(k, v)| (k.to_string_lossy().into_owned(), v.to_string_lossy().into_owned()))
        .collect()
}

/// Re-escape control characters so a value fits on one line.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}

/// Quote a value for POSIX shells.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
