//! Fixed-point substitution of `{ NAME }` references
//!
//! Every pass tokenizes all current values and rebuilds each one that holds
//! references from its segment list. Lookups read the snapshot left by the
//! previous pass, so a value that substitutes in another unresolved value is
//! simply picked up again on the next pass. Resolution ends with the first
//! pass that finds no references at all.

use crate::domain::{Entry, Segment};
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::parse::tokenize;
use std::collections::HashMap;

/// Passes allowed beyond one per entry before giving up on a cycle.
const PASS_SLACK: usize = 64;

#[derive(Debug, Clone, Default)]
pub struct Resolver {
    max_passes: Option<usize>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of substitution passes. Defaults to the entry count
    /// plus a fixed slack of 64.
    ///
    /// Every environment variable whose value itself holds a reference costs
    /// one extra pass, so a chain of more than 64 such variables needs a
    /// higher ceiling to resolve.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    /// Replace every reference in `entries` with the value it names.
    ///
    /// Names are looked up among the entries first and in `env` second.
    /// Values are rewritten in place only when resolution succeeds. Returns
    /// the number of substitution passes performed.
    pub fn resolve<E>(&self, file: &str, entries: &mut [Entry], env: &E) -> Result<usize>
    where
        E: Environment + ?Sized,
    {
        let limit = self.max_passes.unwrap_or(entries.len() + PASS_SLACK);
        let index: HashMap<&str, usize> =
            entries.iter().enumerate().map(|(i, e)| (e.key.as_str(), i)).collect();
        let mut values: Vec<String> = entries.iter().map(|e| e.value.clone()).collect();
        let mut passes = 0usize;

        loop {
            let tokenized = entries
                .iter()
                .zip(&values)
                .map(|(entry, value)| {
                    tokenize(&entry.key, value).map_err(|kind| Error::brace(file, entry.line, kind))
                })
                .collect::<Result<Vec<_>>>()?;

            let referring: Vec<usize> = tokenized
                .iter()
                .enumerate()
                .filter(|(_, segments)| segments.iter().any(Segment::is_reference))
                .map(|(i, _)| i)
                .collect();

            if referring.is_empty() {
                break;
            }

            if passes >= limit {
                return Err(Error::Cycle {
                    file: file.to_string(),
                    passes,
                    keys: referring.iter().map(|&i| entries[i].key.clone()).collect(),
                });
            }

            let mut next = values.clone();
            for &i in &referring {
                let entry = &entries[i];
                let mut rebuilt = String::with_capacity(values[i].len());
                for segment in &tokenized[i] {
                    match segment {
                        Segment::Literal(text) => rebuilt.push_str(text),
                        Segment::Reference(reference) => {
                            rebuilt.push_str(reference.leading);
                            match index.get(reference.name) {
                                Some(&target) => rebuilt.push_str(&values[target]),
                                None => {
                                    let value = env.get(reference.name).ok_or_else(|| {
                                        Error::Resolution {
                                            file: file.to_string(),
                                            line: entry.line,
                                            name: reference.name.to_string(),
                                        }
                                    })?;
                                    rebuilt.push_str(&value);
                                }
                            }
                            rebuilt.push_str(reference.trailing);
                        }
                    }
                }
                next[i] = rebuilt;
            }

            values = next;
            passes += 1;
            tracing::trace!("{}: pass {} rewrote {} values", file, passes, referring.len());
        }

        for (entry, value) in entries.iter_mut().zip(values) {
            entry.value = value;
        }

        Ok(passes)
    }
}
