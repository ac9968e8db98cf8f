//! Parse pipeline and environment injection

use crate::domain::Entry;
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::load::LoadReport;
use crate::parse::parse_lines;
use crate::resolve::{unescape, Resolver};
use crate::DEFAULT_FILE;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Runs files through parsing, resolution and unescaping, and applies the
/// results to an environment.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    resolver: Resolver,
    base_dir: Option<PathBuf>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Resolve relative paths passed to [`Loader::load`] against `dir`
    /// instead of the working directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Parse and fully resolve the file at `path`.
    pub fn parse_path<P, E>(&self, path: P, env: &E) -> Result<Vec<Entry>>
    where
        P: AsRef<Path>,
        E: Environment + ?Sized,
    {
        let path = path.as_ref();
        let file_name = path.display().to_string();
        let file = File::open(path).map_err(|e| Error::io(&file_name, e))?;
        self.parse_reader(BufReader::new(file), &file_name, env)
    }

    /// Parse and fully resolve lines from `reader`, reporting errors against
    /// `file_name`.
    pub fn parse_reader<R, E>(&self, reader: R, file_name: &str, env: &E) -> Result<Vec<Entry>>
    where
        R: BufRead,
        E: Environment + ?Sized,
    {
        let mut entries = parse_lines(reader, file_name)?;
        let passes = self.resolver.resolve(file_name, &mut entries, env)?;
        for entry in &mut entries {
            entry.value = unescape(&entry.value);
        }
        tracing::debug!(
            "Parsed {}: {} entries resolved in {} passes",
            file_name,
            entries.len(),
            passes
        );
        Ok(entries)
    }

    /// Load every file in order into `env`, stopping at the first error.
    ///
    /// With no paths, the conventional `.envfile` in the working directory
    /// (or the base directory, when set) is loaded.
    pub fn load<I, P, E>(&self, paths: I, env: &mut E) -> Result<LoadReport>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        E: Environment + ?Sized,
    {
        let mut paths: Vec<PathBuf> = paths.into_iter().map(|p| self.locate(p.as_ref())).collect();
        if paths.is_empty() {
            paths.push(self.locate(Path::new(DEFAULT_FILE)));
        }

        let mut report = LoadReport::default();
        for path in &paths {
            let entries = self.parse_path(path, &*env)?;
            let applied = apply(&path.display().to_string(), &entries, env)?;
            report.merge(applied);
        }
        Ok(report)
    }

    fn locate(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Write resolved entries into `env` following their directives.
///
/// - neither directive: never written
/// - `export`: written only when the variable is unset
/// - `overload`: written unless the variable already holds the same value
pub fn apply<E>(file_name: &str, entries: &[Entry], env: &mut E) -> Result<LoadReport>
where
    E: Environment + ?Sized,
{
    let mut report = LoadReport { files_read: 1, ..LoadReport::default() };

    for entry in entries {
        if !entry.is_exposed() {
            report.private += 1;
            continue;
        }

        match env.get(&entry.key) {
            Some(_) if !entry.overload => {
                tracing::trace!("{}: keeping existing {}", file_name, entry.key);
                report.skipped_existing += 1;
                continue;
            }
            Some(current) if current == entry.value => {
                report.unchanged += 1;
                continue;
            }
            _ => {}
        }

        env.set(&entry.key, &entry.value).map_err(|source| Error::EnvWrite {
            file: file_name.to_string(),
            line: entry.line,
            source,
        })?;
        tracing::trace!("{}: set {}", file_name, entry.key);
        report.loaded += 1;
    }

    tracing::debug!("Loaded {}: {} variables set", file_name, report.loaded);
    Ok(report)
}
