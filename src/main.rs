//! Corruption Scanner CLI
//!
//! A command-line tool for finding corrupted audio and video files with ffprobe/ffmpeg.

use clap::Parser;
use corruption_scanner::cli::{
    args::{Cli, Commands, ConfigAction},
    commands::{self, audio, check, config as config_cmd, menu, setup, video},
};
use corruption_scanner::models::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);

    // Run the appropriate command
    match cli.command {
        Some(Commands::Audio { tuning }) => {
            let mut config = config::load_config(Some(config_path.as_path()))?;
            commands::apply_tuning(&mut config, &tuning);
            config.validate_audio()?;

            if !cli.skip_preflight {
                run_preflight_checks()?;
            }

            audio::scan_audio(&config).await?;
        }

        Some(Commands::Video {
            validation,
            decoder,
            tuning,
        }) => {
            let mut config = config::load_config(Some(config_path.as_path()))?;
            commands::apply_tuning(&mut config, &tuning);
            config.validate_video()?;

            if !cli.skip_preflight {
                run_preflight_checks()?;
            }

            video::scan_video(&config, validation, decoder.unwrap_or_default()).await?;
        }

        Some(Commands::Check) => {
            run_preflight_checks()?;
        }

        Some(Commands::Setup { dry_run }) => {
            setup::run_setup(&config_path, dry_run).await?;
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force } => config_cmd::init(&config_path, force)?,
            ConfigAction::Show => config_cmd::show(&config_path)?,
            ConfigAction::Path => config_cmd::print_path(&config_path),
            ConfigAction::Edit => config_cmd::edit(&config_path)?,
        },

        Some(Commands::Menu) | None => {
            menu::run_menu(&config_path, cli.skip_preflight).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("corruption_scanner=debug")
    } else {
        EnvFilter::new("corruption_scanner=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
fn run_preflight_checks() -> anyhow::Result<()> {
    if !check::run_checks() {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
