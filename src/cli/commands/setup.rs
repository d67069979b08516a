//! Setup command implementation.

use crate::setup;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Install dependencies and write a starter config.
pub async fn run_setup(config_path: &Path, dry_run: bool) -> Result<()> {
    println!("{}", "🔧 Setting up corruption scanner dependencies...".bold().cyan());
    if dry_run {
        println!("{}", "Dry run: no commands will be executed.".yellow());
    }
    println!();

    setup::bootstrap(config_path, dry_run).await
}
