//! Video scan command implementation.
//!
//! Scans each configured section in order, writing one report per section.

use super::print_missing_dirs;
use crate::core::report::{self, ReportKind};
use crate::core::scanner::{self, MediaKind};
use crate::core::validator::{self, ValidationMode, VideoCheck};
use crate::core::runner;
use crate::models::config::{Config, SectionConfig};
use crate::models::scan::SectionReport;
use crate::services::ffmpeg::Decoder;
use crate::Result;
use colored::Colorize;
use std::time::Instant;

/// Scan all video sections with the given validation method.
pub async fn scan_video(
    config: &Config,
    mode: ValidationMode,
    decoder: Decoder,
) -> Result<Vec<SectionReport>> {
    config.validate_video()?;

    let start = Instant::now();
    let workers = config.workers();
    let check = VideoCheck {
        mode,
        decoder,
        timeout: config.timeout(),
        sample_secs: config.video.sample_secs.max(1),
    };

    println!("{}", "🎬 Starting corruption scan for video files...".bold().green());
    println!(
        "Started at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    match mode {
        ValidationMode::Metadata => println!("Validation: {}", mode),
        _ => println!("Validation: {} ({} decoding)", mode, decoder),
    }
    println!();
    println!("Using {} threads for scanning.", workers);
    println!();

    let mut reports = Vec::with_capacity(config.video.sections.len());
    for section in &config.video.sections {
        reports.push(scan_section(config, section, workers, &check).await?);
    }

    println!("{}", "Summary:".green().bold());
    for section in &reports {
        println!("{}: {} corrupted files", section.name, section.corrupted_count());
    }
    println!();
    println!("Time elapsed: {}", report::format_elapsed(start.elapsed()));
    println!();

    Ok(reports)
}

async fn scan_section(
    config: &Config,
    section: &SectionConfig,
    workers: usize,
    check: &VideoCheck,
) -> Result<SectionReport> {
    println!(
        "--- {} ---",
        format!("Scanning Section: {}", section.name).blue().bold()
    );

    let discovery = scanner::collect_media_files(&section.directories, MediaKind::Video);
    print_missing_dirs(&discovery.missing_dirs);
    tracing::info!(
        "Section {}: {} video files",
        section.name,
        discovery.files.len()
    );

    let corrupted = runner::run_section(&section.name, &discovery.files, workers, |path| {
        async move { validator::validate_video(&path, check).await }
    })
    .await;

    let output_file = config.section_report_path(section);
    let written = report::write_report(&output_file, ReportKind::Video, &corrupted)?;

    println!();
    println!("Corrupted files in {}: {}", section.name, corrupted.len());
    if written {
        println!("Saved to: {}", output_file.display());
    } else {
        println!("No corrupted files; {} not written.", output_file.display());
    }
    println!();

    Ok(SectionReport {
        name: section.name.clone(),
        files_scanned: discovery.files.len(),
        corrupted,
        output_file,
        written,
    })
}
