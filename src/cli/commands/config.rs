//! Config command implementation.

use crate::models::config;
use crate::utils::fs;
use crate::{Error, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Command;

/// Write the starter configuration to `path`.
pub fn init(path: &Path, force: bool) -> Result<()> {
    fs::write_new_file(path, &config::default_template(), force)?;
    println!(
        "{} {}",
        "Wrote configuration template to".green(),
        path.display()
    );
    println!("Add your media directories, then run: corrupt-scan audio | corrupt-scan video");
    Ok(())
}

/// Print the effective configuration (defaults filled in) as TOML.
pub fn show(path: &Path) -> Result<()> {
    let config = config::load_config(Some(path))?;
    println!("{} {}", "#".dimmed(), path.display().to_string().dimmed());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Print the configuration file path.
pub fn print_path(path: &Path) {
    println!("{}", path.display());
}

/// Open the configuration in an editor, creating it first if needed.
pub fn edit(path: &Path) -> Result<()> {
    if !path.exists() {
        init(path, false)?;
    }
    open_in_editor(path, std::env::var("EDITOR").ok())
}

/// Editors to try, in order: nano, then `$EDITOR`, then the platform fallback.
///
/// Each candidate is split into program and leading arguments so values like
/// `code --wait` work.
pub fn editor_candidates(env_editor: Option<String>) -> Vec<Vec<String>> {
    let mut candidates = vec![vec!["nano".to_string()]];

    if let Some(editor) = env_editor {
        let parts: Vec<String> = editor.split_whitespace().map(String::from).collect();
        if !parts.is_empty() && !candidates.contains(&parts) {
            candidates.push(parts);
        }
    }

    let fallback = if cfg!(windows) { "notepad" } else { "vi" };
    let fallback = vec![fallback.to_string()];
    if !candidates.contains(&fallback) {
        candidates.push(fallback);
    }

    candidates
}

fn open_in_editor(path: &Path, env_editor: Option<String>) -> Result<()> {
    let candidates = editor_candidates(env_editor);

    for candidate in &candidates {
        let (program, args) = match candidate.split_first() {
            Some(split) => split,
            None => continue,
        };

        match Command::new(program).args(args).arg(path).status() {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => {
                return Err(Error::other(format!("{} exited with {}", program, status)));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                println!("{} not found. Falling back to the next editor.", program);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let tried: Vec<String> = candidates.iter().map(|c| c.join(" ")).collect();
    Err(Error::EditorNotFound(tried.join(", ")))
}
