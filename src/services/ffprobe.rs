//! FFprobe service for container and stream probing.

use crate::services::process::{self, ProcessOutcome};
use crate::Result;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

/// FFprobe `-show_entries format=duration -of json` output.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
}

/// FFprobe format information.
#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

/// Result of asking ffprobe for a file's duration.
#[derive(Debug, Clone, PartialEq)]
pub enum DurationProbe {
    /// Duration in seconds.
    Seconds(f64),
    /// ffprobe exited with an error; carries its trimmed stderr.
    Failed(String),
    /// ffprobe succeeded but reported no usable duration.
    Missing,
    /// ffprobe did not finish in time.
    TimedOut,
}

/// Check if ffprobe is installed.
pub fn is_installed() -> bool {
    process::is_available("ffprobe")
}

/// Get ffprobe version.
pub fn get_version() -> Result<String> {
    process::version_line("ffprobe")
}

/// Arguments for a full format/stream probe of `path`.
pub fn probe_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-v", "error", "-show_format", "-show_streams", "-i"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(path.as_os_str().to_os_string());
    args
}

/// Probe format and streams; a non-zero exit means ffprobe could not read the file.
pub async fn probe_streams(path: &Path, timeout: Duration) -> Result<ProcessOutcome> {
    process::run_with_timeout("ffprobe", probe_args(path), timeout).await
}

/// Fetch the container duration of `path`.
pub async fn probe_duration(path: &Path, timeout: Duration) -> Result<DurationProbe> {
    let mut args: Vec<OsString> = [
        "-v",
        "error",
        "-show_entries",
        "format=duration",
        "-of",
        "json",
    ]
    .iter()
    .map(OsString::from)
    .collect();
    args.push(path.as_os_str().to_os_string());

    let outcome = process::run_with_timeout("ffprobe", args, timeout).await?;
    Ok(match outcome {
        ProcessOutcome::TimedOut => DurationProbe::TimedOut,
        ProcessOutcome::Completed {
            success: false,
            stderr,
            ..
        } => DurationProbe::Failed(stderr.trim().to_string()),
        ProcessOutcome::Completed { stdout, .. } => match parse_duration(&stdout) {
            Ok(Some(seconds)) => DurationProbe::Seconds(seconds),
            Ok(None) => DurationProbe::Missing,
            Err(e) => {
                tracing::debug!("Unparsable ffprobe duration for {}: {}", path.display(), e);
                DurationProbe::Missing
            }
        },
    })
}

/// Parse the duration out of ffprobe's JSON output.
///
/// Returns `Ok(None)` when the field is absent, empty, or not a finite
/// non-negative number (ffprobe prints `"N/A"` for some streams).
pub fn parse_duration(json: &str) -> Result<Option<f64>> {
    let output: FfprobeOutput = serde_json::from_str(json)?;
    Ok(output
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        let json = r#"{ "format": { "duration": "125.400000" } }"#;
        assert_eq!(parse_duration(json).unwrap(), Some(125.4));
    }

    #[test]
    fn test_parse_duration_missing() {
        assert_eq!(parse_duration(r#"{ "format": {} }"#).unwrap(), None);
        assert_eq!(parse_duration("{}").unwrap(), None);
        assert_eq!(
            parse_duration(r#"{ "format": { "duration": "N/A" } }"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_parse_duration_malformed() {
        assert!(parse_duration("not json").is_err());
    }

    #[test]
    fn test_probe_args() {
        let args = probe_args(Path::new("/tv/a b.mkv"));
        assert_eq!(args.last().unwrap(), "/tv/a b.mkv");
        assert_eq!(args[args.len() - 2], "-i");
        assert!(args.contains(&OsString::from("-show_streams")));
    }
}
