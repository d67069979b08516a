//! Media file discovery.
//!
//! Walks the configured directories recursively and collects files whose
//! extension matches the requested media kind.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported audio file extensions.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a"];

/// Supported video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "avi", "mp4", "mov", "wmv", "mpg", "mpeg", "3gp", "m4v",
];

/// Kind of media a scan looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Extensions (lowercase, without dot) belonging to this kind.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            MediaKind::Audio => AUDIO_EXTENSIONS,
            MediaKind::Video => VIDEO_EXTENSIONS,
        }
    }

    /// Check if a file extension belongs to this kind.
    pub fn matches_extension(self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.extensions().contains(&ext_lower.as_str())
    }
}

/// Result of discovering media files.
#[derive(Debug, Default)]
pub struct DiscoveryResult {
    /// Media files found, sorted and deduplicated.
    pub files: Vec<PathBuf>,
    /// Configured directories that do not exist or are not directories.
    pub missing_dirs: Vec<PathBuf>,
    /// Total files visited.
    pub total_files_scanned: usize,
}

/// Check if a filename is an AppleDouble resource fork (`._name`).
fn is_resource_fork(filename: &str) -> bool {
    filename.starts_with("._")
}

/// Check if a path is a media file of the given kind.
pub fn is_media_file(path: &Path, kind: MediaKind) -> bool {
    let filename = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    if is_resource_fork(filename) {
        return false;
    }
    path.extension()
        .map(|ext| kind.matches_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

/// Collect media files of `kind` from every directory in `dirs`.
///
/// Directories that are missing are logged and reported in
/// `missing_dirs`; they never abort the discovery.
pub fn collect_media_files(dirs: &[PathBuf], kind: MediaKind) -> DiscoveryResult {
    let mut result = DiscoveryResult::default();
    let mut files = BTreeSet::new();

    for dir in dirs {
        if !dir.is_dir() {
            tracing::warn!("Skipping missing directory: {}", dir.display());
            result.missing_dirs.push(dir.clone());
            continue;
        }

        for entry in WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::debug!("Walk error under {}: {}", dir.display(), err);
                    None
                }
            })
        {
            // Symlinked files are scanned; symlinked directories are not descended.
            if !(entry.file_type().is_file() || entry.path().is_file()) {
                continue;
            }
            result.total_files_scanned += 1;

            if is_media_file(entry.path(), kind) {
                files.insert(entry.path().to_path_buf());
            }
        }
    }

    result.files = files.into_iter().collect();

    tracing::info!(
        "Scanned {} files in {} directories: {} {:?} files",
        result.total_files_scanned,
        dirs.len() - result.missing_dirs.len(),
        result.files.len(),
        kind
    );

    result
}
