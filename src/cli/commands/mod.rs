//! CLI command implementations.

pub mod audio;
pub mod check;
pub mod config;
pub mod menu;
pub mod setup;
pub mod video;

use crate::cli::args::ScanTuning;
use crate::models::config::Config;
use colored::Colorize;
use std::path::PathBuf;

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_tuning(config: &mut Config, tuning: &ScanTuning) {
    if let Some(workers) = tuning.workers {
        config.max_workers = Some(workers);
    }
    if let Some(timeout) = tuning.timeout {
        config.video.timeout_secs = timeout;
    }
}

/// Warn about configured directories that could not be scanned.
fn print_missing_dirs(missing: &[PathBuf]) {
    for dir in missing {
        println!(
            "{} {}",
            "Directory not found, skipping:".yellow(),
            dir.display()
        );
    }
}
