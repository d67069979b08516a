//! Configuration model.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout for a single ffmpeg/ffprobe invocation, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default length of each decoded playback sample, in seconds.
pub const DEFAULT_SAMPLE_SECS: u32 = 5;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory where CSV reports are written.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Maximum number of files validated concurrently (defaults to CPU count).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_workers: Option<usize>,
    /// Audio scan configuration.
    #[serde(default)]
    pub audio: AudioConfig,
    /// Video scan configuration.
    #[serde(default)]
    pub video: VideoConfig,
}

/// Audio scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Directories scanned recursively for audio files.
    #[serde(default)]
    pub directories: Vec<PathBuf>,
    /// Report filename, relative to the results directory.
    #[serde(default = "default_audio_output")]
    pub output_file: String,
}

/// Video scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Timeout per external tool invocation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Seconds decoded at each playback sample point.
    #[serde(default = "default_sample_secs")]
    pub sample_secs: u32,
    /// Sections scanned in order, each with its own report.
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

/// A named group of video directories sharing one report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub directories: Vec<PathBuf>,
    #[serde(default)]
    pub output_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            max_workers: None,
            audio: AudioConfig::default(),
            video: VideoConfig::default(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            output_file: default_audio_output(),
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            sample_secs: DEFAULT_SAMPLE_SECS,
            sections: Vec::new(),
        }
    }
}

impl Config {
    /// Number of concurrent validations, never less than one.
    pub fn workers(&self) -> usize {
        self.max_workers.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Timeout applied to each external tool invocation.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.video.timeout_secs.max(1))
    }

    /// Full path of the audio report.
    pub fn audio_report_path(&self) -> PathBuf {
        self.results_dir.join(&self.audio.output_file)
    }

    /// Full path of a video section's report.
    pub fn section_report_path(&self, section: &SectionConfig) -> PathBuf {
        self.results_dir.join(&section.output_file)
    }

    /// Check that the audio scan has something to do.
    pub fn validate_audio(&self) -> Result<()> {
        if self.audio.directories.is_empty() {
            return Err(Error::InvalidConfig(
                "audio.directories is missing or empty".to_string(),
            ));
        }
        if self.audio.output_file.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "audio.output_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Check that every video section is usable.
    pub fn validate_video(&self) -> Result<()> {
        if self.video.sections.is_empty() {
            return Err(Error::InvalidConfig(
                "video.sections is missing or empty".to_string(),
            ));
        }
        for (idx, section) in self.video.sections.iter().enumerate() {
            if section.name.trim().is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "video section #{} has no name",
                    idx + 1
                )));
            }
            if section.output_file.trim().is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "video section '{}' has no output_file",
                    section.name
                )));
            }
        }
        Ok(())
    }
}

fn default_results_dir() -> PathBuf {
    config_dir().join("results")
}

fn default_audio_output() -> String {
    "Corrupt_Audio.csv".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_sample_secs() -> u32 {
    DEFAULT_SAMPLE_SECS
}

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("corruption_scanner")
}

/// Get the default configuration file path.
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    if !config_path.is_file() {
        return Err(Error::ConfigNotFound(config_path.display().to_string()));
    }

    let content = std::fs::read_to_string(&config_path)?;
    let config = parse_config(&content)?;
    tracing::debug!("Loaded configuration from {}", config_path.display());
    Ok(config)
}

/// Write configuration as TOML, creating parent directories.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Commented starter configuration written by `config init`.
pub fn default_template() -> String {
    let results_dir = default_results_dir();
    format!(
        r#"# corruption_scanner configuration

# Where CSV reports are written.
results_dir = "{results}"

# Concurrent validations. Defaults to the number of CPU cores.
# max_workers = 8

[audio]
# Directories scanned recursively for mp3, wav, ogg, flac and m4a files.
directories = []
output_file = "Corrupt_Audio.csv"

[video]
# Per-invocation timeout for ffmpeg/ffprobe, in seconds.
timeout_secs = {timeout}
# Seconds decoded at each playback sample point.
sample_secs = {sample}

# One block per library section. Each section gets its own report.
# [[video.sections]]
# name = "Movies"
# directories = ["/media/movies"]
# output_file = "Corrupt_Movies.csv"
"#,
        results = results_dir.display().to_string().replace('\\', "\\\\"),
        timeout = DEFAULT_TIMEOUT_SECS,
        sample = DEFAULT_SAMPLE_SECS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses() {
        let config = parse_config(&default_template()).unwrap();
        assert!(config.audio.directories.is_empty());
        assert_eq!(config.audio.output_file, "Corrupt_Audio.csv");
        assert_eq!(config.video.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.video.sections.is_empty());
    }

    #[test]
    fn test_workers_never_zero() {
        let config = Config {
            max_workers: Some(0),
            ..Config::default()
        };
        assert_eq!(config.workers(), 1);
    }
}
