//! Command line argument definitions.

use crate::core::validator::ValidationMode;
use crate::services::ffmpeg::Decoder;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Corruption Scanner - Find broken audio and video files with FFmpeg
#[derive(Parser, Debug)]
#[command(name = "corrupt-scan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Path to config.toml (default: user config directory)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Command to run; opens the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan configured audio directories with ffprobe
    Audio {
        #[command(flatten)]
        tuning: ScanTuning,
    },

    /// Scan configured video sections
    Video {
        /// Validation method
        #[arg(long, value_enum, default_value_t = ValidationMode::Metadata)]
        validation: ValidationMode,

        /// Decoder used by playback validations
        #[arg(long, value_enum)]
        decoder: Option<Decoder>,

        #[command(flatten)]
        tuning: ScanTuning,
    },

    /// Check that ffmpeg and ffprobe are installed
    Check,

    /// Install FFmpeg and other dependencies
    Setup {
        /// Print the commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Open the interactive menu
    Menu,
}

/// Overrides shared by the scan commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ScanTuning {
    /// Number of files validated concurrently (default: CPU count)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Timeout per ffmpeg/ffprobe invocation, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Open the configuration in an editor
    Edit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_video_command() {
        let cli = Cli::parse_from([
            "corrupt-scan",
            "video",
            "--validation",
            "indepth",
            "--decoder",
            "hardware",
            "-w",
            "4",
        ]);
        match cli.command {
            Some(Commands::Video {
                validation,
                decoder,
                tuning,
            }) => {
                assert_eq!(validation, ValidationMode::Indepth);
                assert_eq!(decoder, Some(Decoder::Hardware));
                assert_eq!(tuning.workers, Some(4));
                assert_eq!(tuning.timeout, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_command_means_menu() {
        let cli = Cli::parse_from(["corrupt-scan", "--config", "/tmp/c.toml"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }
}
