//! Audio scan command implementation.

use super::print_missing_dirs;
use crate::core::report::{self, ReportKind};
use crate::core::scanner::{self, MediaKind};
use crate::core::{runner, validator};
use crate::models::config::Config;
use crate::models::scan::SectionReport;
use crate::Result;
use colored::Colorize;
use std::time::Instant;

/// Scan every configured audio directory and write the audio report.
pub async fn scan_audio(config: &Config) -> Result<SectionReport> {
    config.validate_audio()?;

    let start = Instant::now();
    let workers = config.workers();
    let timeout = config.timeout();

    println!("{}", "🎵 Starting corruption scan for audio files...".bold().green());
    println!(
        "Started at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!();
    println!("Using {} threads for scanning.", workers);
    println!();

    let discovery = scanner::collect_media_files(&config.audio.directories, MediaKind::Audio);
    print_missing_dirs(&discovery.missing_dirs);
    println!(
        "{}",
        format!("Found {} audio files to scan.", discovery.files.len())
            .blue()
            .bold()
    );
    println!();

    let corrupted = runner::run_section("Audio", &discovery.files, workers, |path| async move {
        validator::validate_audio(&path, timeout).await
    })
    .await;

    let output_file = config.audio_report_path();
    let written = report::write_report(&output_file, ReportKind::Audio, &corrupted)?;

    println!();
    println!("{}", "Scan complete!".green().bold());
    println!("Total corrupted files: {}", corrupted.len());
    println!("Time elapsed: {}", report::format_elapsed(start.elapsed()));
    println!();
    println!("Results saved to: {}", output_file.display());
    println!();

    Ok(SectionReport {
        name: "Audio".to_string(),
        files_scanned: discovery.files.len(),
        corrupted,
        output_file,
        written,
    })
}
