//! Package-manager install plans and their execution.

use super::platform::{LinuxFamily, Platform};
use crate::{Error, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Official Homebrew install script.
pub const HOMEBREW_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// Line added to `~/.nanorc` so Homebrew's syntax definitions are loaded.
pub const NANORC_INCLUDE: &str = r#"include "/usr/local/share/nano/*.nanorc""#;

/// One external command in an install plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    pub description: String,
    pub program: String,
    pub args: Vec<String>,
}

impl InstallStep {
    fn new(description: &str, program: &str, args: &[&str]) -> Self {
        Self {
            description: description.to_string(),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Shell-like rendering used for dry runs and logs.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().map(|a| {
            if a.contains(' ') {
                format!("\"{}\"", a)
            } else {
                a.clone()
            }
        }));
        parts.join(" ")
    }
}

/// Step that installs Homebrew through its official script.
pub fn homebrew_install_step() -> InstallStep {
    let script = format!("$(curl -fsSL {})", HOMEBREW_INSTALL_URL);
    InstallStep {
        description: "Installing Homebrew".to_string(),
        program: "/bin/bash".to_string(),
        args: vec!["-c".to_string(), script],
    }
}

/// Build the commands that install FFmpeg on `platform`.
///
/// `has_brew` only matters on macOS, where Homebrew is installed first if missing.
pub fn ffmpeg_install_plan(platform: &Platform, has_brew: bool) -> Result<Vec<InstallStep>> {
    let steps = match platform {
        Platform::Linux {
            family: Some(family),
            ..
        } => match family {
            LinuxFamily::Arch => vec![InstallStep::new(
                "Installing FFmpeg with pacman",
                "sudo",
                &["pacman", "-S", "ffmpeg", "--noconfirm"],
            )],
            LinuxFamily::Debian => vec![
                InstallStep::new("Updating apt package lists", "sudo", &["apt", "update"]),
                InstallStep::new(
                    "Installing FFmpeg with apt",
                    "sudo",
                    &["apt", "install", "ffmpeg", "-y"],
                ),
            ],
            LinuxFamily::Fedora => vec![InstallStep::new(
                "Installing FFmpeg with dnf",
                "sudo",
                &["dnf", "install", "ffmpeg", "-y"],
            )],
            LinuxFamily::OpenSuse => vec![InstallStep::new(
                "Installing FFmpeg with zypper",
                "sudo",
                &["zypper", "install", "ffmpeg", "-y"],
            )],
        },
        Platform::MacOs => {
            let mut steps = Vec::new();
            if !has_brew {
                steps.push(homebrew_install_step());
            }
            steps.push(InstallStep::new(
                "Installing FFmpeg with Homebrew",
                "brew",
                &["install", "ffmpeg"],
            ));
            steps
        }
        Platform::Windows => vec![InstallStep::new(
            "Installing FFmpeg with winget",
            "winget",
            &["install", "ffmpeg"],
        )],
        other => return Err(Error::UnsupportedPlatform(other.to_string())),
    };

    Ok(steps)
}

/// Step that installs nano through Homebrew (macOS only).
pub fn nano_install_step() -> InstallStep {
    InstallStep::new("Installing nano with Homebrew", "brew", &["install", "nano"])
}

/// Run a single step with inherited stdio, or just print it on a dry run.
pub async fn run_step(step: &InstallStep, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("  {} {}", "[dry-run]".yellow(), step.command_line());
        return Ok(());
    }

    println!("{} {}", "->".blue().bold(), step.description);
    tracing::debug!("Running: {}", step.command_line());

    let status = Command::new(&step.program)
        .args(&step.args)
        .status()
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ToolNotFound(step.program.clone()),
            _ => Error::Io(e),
        })?;

    if !status.success() {
        return Err(Error::InstallFailed(format!(
            "`{}` exited with {}",
            step.command_line(),
            status
        )));
    }

    Ok(())
}

/// Run every step in order, stopping at the first failure.
pub async fn run_steps(steps: &[InstallStep], dry_run: bool) -> Result<()> {
    for step in steps {
        run_step(step, dry_run).await?;
    }
    Ok(())
}

/// Check whether a Homebrew formula is installed (`brew list <formula>`).
pub async fn brew_has_formula(formula: &str) -> bool {
    Command::new("brew")
        .args(["list", formula])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Append the Homebrew nano include line to `nanorc` unless it is already there.
///
/// Returns `true` if the file was modified.
pub fn ensure_nanorc_include(nanorc: &Path) -> Result<bool> {
    let existing = match std::fs::read_to_string(nanorc) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    if existing.contains(NANORC_INCLUDE) {
        return Ok(false);
    }

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(NANORC_INCLUDE);
    content.push('\n');
    std::fs::write(nanorc, content)?;
    Ok(true)
}
