//! envfile: load `KEY = value` files into the process environment
//!
//! Values may reference other keys of the same file, or variables already in
//! the environment, with `{ NAME }`. Doubled braces (`{{`, `}}`) produce literal
//! braces and `\n`, `\t`, `\\` produce control characters.
//!
//! ```text
//! # comment
//! HOST = localhost
//! export PORT = 3000
//! overload DATABASE_URL = postgres://{ HOST }:{ PORT }/app
//! ```
//!
//! Entries marked `export` are written unless the variable is already set,
//! entries marked `overload` are always written, and unmarked entries only
//! exist to be referenced.

pub mod domain;
pub mod env;
pub mod error;
pub mod load;
pub mod parse;
pub mod resolve;

use std::io::BufRead;
use std::path::Path;

pub use domain::{Entry, Reference, Segment};
pub use env::{Environment, MemoryEnv, ProcessEnv, SetVarError};
pub use error::{BraceErrorKind, Error, ErrorKind, Result, SyntaxErrorKind};
pub use load::{LoadReport, Loader};
pub use resolve::Resolver;

/// File loaded when no file names are given.
pub const DEFAULT_FILE: &str = ".envfile";

/// Load files into the process environment, in order.
///
/// An empty list loads [`DEFAULT_FILE`]. Processing stops at the first error.
pub fn load<I, P>(paths: I) -> Result<LoadReport>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    Loader::new().load(paths, &mut ProcessEnv)
}

/// Like [`load`], but against any [`Environment`].
pub fn load_with<I, P, E>(paths: I, env: &mut E) -> Result<LoadReport>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    E: Environment + ?Sized,
{
    Loader::new().load(paths, env)
}

/// Parse and resolve a file without touching the environment.
///
/// References to names not defined in the file are looked up in the process
/// environment.
pub fn parse<P: AsRef<Path>>(path: P) -> Result<Vec<Entry>> {
    Loader::new().parse_path(path, &ProcessEnv)
}

/// Like [`parse`], but resolving unknown names against `env`.
pub fn parse_with<P, E>(path: P, env: &E) -> Result<Vec<Entry>>
where
    P: AsRef<Path>,
    E: Environment + ?Sized,
{
    Loader::new().parse_path(path, env)
}

/// Parse and resolve lines from any reader.
pub fn parse_reader<R, E>(reader: R, file_name: &str, env: &E) -> Result<Vec<Entry>>
where
    R: BufRead,
    E: Environment + ?Sized,
{
    Loader::new().parse_reader(reader, file_name, env)
}

/// Parse and resolve an in-memory source.
pub fn parse_str<E>(source: &str, file_name: &str, env: &E) -> Result<Vec<Entry>>
where
    E: Environment + ?Sized,
{
    parse_reader(source.as_bytes(), file_name, env)
}
