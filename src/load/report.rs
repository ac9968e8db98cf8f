//! Load summary

use serde::Serialize;

/// What a load did to the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LoadReport {
    pub files_read: usize,
    /// Variables written
    pub loaded: usize,
    /// Export-only entries whose variable was already set
    pub skipped_existing: usize,
    /// Overload entries whose variable already held the same value
    pub unchanged: usize,
    /// Entries with neither directive
    pub private: usize,
}

impl LoadReport {
    pub fn merge(&mut self, other: LoadReport) {
        self.files_read += other.files_read;
        self.loaded += other.loaded;
        self.skipped_existing += other.skipped_existing;
        self.unchanged += other.unchanged;
        self.private += other.private;
    }
}
