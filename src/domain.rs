//! Core data types shared by the parser, resolver and loader

use serde::Serialize;
use std::ops::Range;

/// One `KEY = value` line of an env file together with its directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// 1-based line number in the source file
    pub line: usize,
    pub export: bool,
    pub overload: bool,
    pub key: String,
    /// Raw value until resolution finishes, literal afterwards
    pub value: String,
}

impl Entry {
    pub fn new(line: usize, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { line, export: false, overload: false, key: key.into(), value: value.into() }
    }

    /// Whether the loader should consider this entry for the environment at all.
    pub fn is_exposed(&self) -> bool {
        self.export || self.overload
    }
}

/// A piece of a tokenized value: either literal text or a `{ NAME }` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Reference(Reference<'a>),
}

impl Segment<'_> {
    pub fn is_reference(&self) -> bool {
        matches!(self, Segment::Reference(_))
    }
}

/// A variable reference found inside a value.
///
/// `leading` and `trailing` hold the escaped braces that surround the consumed
/// brace pair (`{{{ A }}}` keeps `{{` and `}}`), so rebuilding a value is
/// `leading + substitution + trailing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Trimmed variable name
    pub name: &'a str,
    /// Byte span of the untrimmed name inside the owning value
    pub span: Range<usize>,
    pub leading: &'a str,
    pub trailing: &'a str,
}
