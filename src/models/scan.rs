//! Scan result models.

use std::path::PathBuf;

/// Outcome of validating a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The file decoded or probed cleanly.
    Valid,
    /// The file failed validation, with a human-readable reason.
    Corrupt(String),
}

impl Verdict {
    pub fn corrupt<S: Into<String>>(reason: S) -> Self {
        Verdict::Corrupt(reason.into())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

/// A row of the CSV report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning one section (or the audio library).
#[derive(Debug, Clone)]
pub struct SectionReport {
    /// Section name, e.g. "Movies" or "Audio".
    pub name: String,
    /// Number of media files validated.
    pub files_scanned: usize,
    /// Files that failed validation, sorted by path.
    pub corrupted: Vec<CorruptFile>,
    /// Report path.
    pub output_file: PathBuf,
    /// Whether the report file was written.
    pub written: bool,
}

impl SectionReport {
    pub fn corrupted_count(&self) -> usize {
        self.corrupted.len()
    }
}
