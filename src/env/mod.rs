//! Access to the ambient environment
//!
//! The resolver reads from an [`Environment`] when a reference names no
//! sibling entry, and the loader writes exported entries into one. The real
//! process table is [`ProcessEnv`]; [`MemoryEnv`] is a map-backed stand-in.

use std::collections::BTreeMap;
use thiserror::Error;

/// A named-variable store that can be read and written.
pub trait Environment {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), SetVarError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetVarError {
    #[error("can't set variable with invalid name '{0}'")]
    InvalidName(String),
    #[error("can't set variable '{0}': value contains a NUL byte")]
    NulInValue(String),
}

/// Reject names and values the operating system would refuse.
fn validate(key: &str, value: &str) -> Result<(), SetVarError> {
    if key.is_empty() || key.contains(['=', '\0']) {
        return Err(SetVarError::InvalidName(key.to_string()));
    }
    if value.contains('\0') {
        return Err(SetVarError::NulInValue(key.to_string()));
    }
    Ok(())
}

/// The environment of the running process.
///
/// Writes are not synchronized; callers must make sure no other thread
/// touches the environment while a load is in progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SetVarError> {
        validate(key, value)?;
        std::env::set_var(key, value);
        Ok(())
    }
}

/// An in-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl Environment for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SetVarError> {
        validate(key, value)?;
        self.vars.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
