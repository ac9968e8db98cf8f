//! Error taxonomy
//!
//! Every error carries the file it came from and, when one applies, the line
//! of the entry that caused it. Messages render as `[file] line N: cause`.

use crate::env::SetVarError;
use std::io;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("[{file}] {source}")]
    Io {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("[{file}] line {line}: {kind}")]
    Syntax { file: String, line: usize, kind: SyntaxErrorKind },

    #[error("[{file}] line {line}: {kind}")]
    Brace { file: String, line: usize, kind: BraceErrorKind },

    #[error("[{file}] line {line}: variable '{name}' does not exist")]
    Resolution { file: String, line: usize, name: String },

    #[error(
        "[{file}] references still unresolved after {passes} passes (possible cycle between: {})",
        .keys.join(", ")
    )]
    Cycle { file: String, passes: usize, keys: Vec<String> },

    #[error("[{file}] line {line}: {source}")]
    EnvWrite {
        file: String,
        line: usize,
        #[source]
        source: SetVarError,
    },
}

/// Coarse classification of [`Error`], convenient for matching in callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Syntax,
    Brace,
    Resolution,
    Cycle,
    EnvWrite,
}

/// Reasons a line is rejected by the line parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("can't split line into key and value")]
    MissingSeparator,
    #[error("key name is empty")]
    EmptyKey,
    #[error("invalid key name '{0}'")]
    InvalidKey(String),
    #[error("duplicate key '{0}'")]
    DuplicateKey(String),
}

/// Reasons a value is rejected by the brace tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BraceErrorKind {
    #[error("excess opening curly brace '{{' at the end")]
    ExcessOpeningAtEnd,
    #[error("can't find the closing curly brace '}}'")]
    MissingClosing,
    #[error("excess closing curly brace '}}'")]
    ExcessClosing,
    #[error("excess opening curly brace '{{'")]
    ExcessOpening,
    #[error("excess closing curly brace '}}' at the beginning")]
    ExcessClosingAtStart,
    #[error("can't find the opening curly brace '{{'")]
    MissingOpening,
    #[error("variable name is empty")]
    EmptyName,
    #[error("key '{0}' is used recursively")]
    SelfReference(String),
}

impl Error {
    pub fn io(file: impl Into<String>, source: io::Error) -> Self {
        Self::Io { file: file.into(), source }
    }

    pub fn syntax(file: impl Into<String>, line: usize, kind: SyntaxErrorKind) -> Self {
        Self::Syntax { file: file.into(), line, kind }
    }

    pub fn brace(file: impl Into<String>, line: usize, kind: BraceErrorKind) -> Self {
        Self::Brace { file: file.into(), line, kind }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::Brace { .. } => ErrorKind::Brace,
            Self::Resolution { .. } => ErrorKind::Resolution,
            Self::Cycle { .. } => ErrorKind::Cycle,
            Self::EnvWrite { .. } => ErrorKind::EnvWrite,
        }
    }

    /// Name of the file the error was raised for.
    pub fn file(&self) -> &str {
        match self {
            Self::Io { file, .. }
            | Self::Syntax { file, .. }
            | Self::Brace { file, .. }
            | Self::Resolution { file, .. }
            | Self::Cycle { file, .. }
            | Self::EnvWrite { file, .. } => file,
        }
    }

    /// Source line of the offending entry, when the error is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. }
            | Self::Brace { line, .. }
            | Self::Resolution { line, .. }
            | Self::EnvWrite { line, .. } => Some(*line),
            Self::Io { .. } | Self::Cycle { .. } => None,
        }
    }
}
