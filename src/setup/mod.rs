//! Dependency bootstrap.
//!
//! Detects the host platform, installs FFmpeg through the native package
//! manager when it is missing, sets up nano on macOS, and writes a starter
//! configuration file.

pub mod installer;
pub mod platform;

use crate::models::config;
use crate::utils::fs;
use crate::{Error, Result};
use colored::Colorize;
use platform::Platform;
use std::path::Path;

/// Run the full dependency bootstrap.
pub async fn bootstrap(config_path: &Path, dry_run: bool) -> Result<()> {
    let platform = platform::detect();
    println!("Detected platform: {}", platform.to_string().bold());
    println!();

    ensure_ffmpeg(&platform, dry_run).await?;

    if platform == Platform::MacOs {
        if let Err(e) = ensure_nano(dry_run).await {
            tracing::warn!("nano setup failed: {}", e);
            println!("{} {}", "Failed to set up nano:".red(), e);
        }
    }

    ensure_config(config_path, dry_run)?;

    println!();
    println!("{}", "Setup complete.".green().bold());
    Ok(())
}

/// Install FFmpeg unless it is already on PATH.
pub async fn ensure_ffmpeg(platform: &Platform, dry_run: bool) -> Result<()> {
    if which::which("ffmpeg").is_ok() {
        println!(
            "{}",
            "FFmpeg is already installed and available in the PATH.".green()
        );
        return Ok(());
    }

    println!("{}", "FFmpeg not found. Proceeding with installation.".yellow().bold());
    let has_brew = which::which("brew").is_ok();
    let steps = installer::ffmpeg_install_plan(platform, has_brew)?;
    installer::run_steps(&steps, dry_run).await?;

    if dry_run {
        return Ok(());
    }

    if which::which("ffmpeg").is_ok() {
        println!("{}", "FFmpeg has been installed.".green());
        Ok(())
    } else {
        Err(Error::InstallFailed(
            "ffmpeg is still not on PATH (a new shell may be required)".to_string(),
        ))
    }
}

/// Install nano through Homebrew and load its syntax definitions (macOS only).
pub async fn ensure_nano(dry_run: bool) -> Result<()> {
    if installer::brew_has_formula("nano").await {
        println!("{}", "nano is already installed via Homebrew.".green());
    } else {
        println!("{}", "nano not found. Proceeding with installation...".yellow().bold());
        installer::run_step(&installer::nano_install_step(), dry_run).await?;
    }

    let nanorc = dirs::home_dir()
        .ok_or_else(|| Error::other("Cannot determine home directory"))?
        .join(".nanorc");

    if dry_run {
        println!(
            "  {} ensure {} includes {}",
            "[dry-run]".yellow(),
            nanorc.display(),
            installer::NANORC_INCLUDE
        );
        return Ok(());
    }

    if installer::ensure_nanorc_include(&nanorc)? {
        println!("{}", "Updated ~/.nanorc with nano configurations.".green());
    } else {
        println!("{}", "~/.nanorc already includes the nano configurations.".green());
    }
    Ok(())
}

/// Write the starter configuration if none exists yet.
pub fn ensure_config(config_path: &Path, dry_run: bool) -> Result<()> {
    if config_path.exists() {
        println!("Configuration found at {}", config_path.display());
        return Ok(());
    }

    if dry_run {
        println!(
            "  {} write default configuration to {}",
            "[dry-run]".yellow(),
            config_path.display()
        );
        return Ok(());
    }

    fs::write_new_file(config_path, &config::default_template(), false)?;
    println!(
        "{} {}",
        "Wrote default configuration to".green(),
        config_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_config_writes_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        ensure_config(&path, false).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(config::parse_config(&written).is_ok());

        std::fs::write(&path, "results_dir = \"/custom\"").unwrap();
        ensure_config(&path, false).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "results_dir = \"/custom\""
        );
    }

    #[test]
    fn test_ensure_config_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        ensure_config(&path, true).unwrap();
        assert!(!path.exists());
    }
}
