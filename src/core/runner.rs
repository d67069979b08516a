//! Scan orchestration.
//!
//! Runs a validator over a list of files with bounded concurrency, tracks
//! progress, and collects the files that failed.

use crate::models::scan::{CorruptFile, Verdict};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::PathBuf;

/// Create the progress bar used for one scan section.
fn section_progress_bar(label: &str, total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template(
            "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {per_sec} | ETA: {eta} | {pos}/{len} files",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    pb.set_style(style);
    pb.set_message(format!("Processing {}", label));
    pb
}

/// Validate every file in `files`, keeping at most `workers` validations in flight.
///
/// Returns the corrupt files sorted by path. A validator never fails the
/// section as a whole; it reports problems through its `Verdict`.
pub async fn run_section<F, Fut>(
    label: &str,
    files: &[PathBuf],
    workers: usize,
    validate: F,
) -> Vec<CorruptFile>
where
    F: Fn(PathBuf) -> Fut,
    Fut: Future<Output = Verdict>,
{
    let pb = section_progress_bar(label, files.len());

    let mut corrupted: Vec<CorruptFile> = stream::iter(files.iter().cloned())
        .map(|path| {
            let check = validate(path.clone());
            async move { (path, check.await) }
        })
        .buffer_unordered(workers.max(1))
        .filter_map(|(path, verdict)| {
            pb.inc(1);
            let row = match verdict {
                Verdict::Valid => None,
                Verdict::Corrupt(reason) => {
                    tracing::debug!("Corrupt: {} ({})", path.display(), reason);
                    Some(CorruptFile { path, reason })
                }
            };
            async move { row }
        })
        .collect()
        .await;

    pb.finish_with_message(format!("Processed {}", label));

    corrupted.sort_by(|a, b| a.path.cmp(&b.path));
    corrupted
}
