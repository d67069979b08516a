//! FFmpeg service for decode-to-null playback checks.

use crate::services::process::{self, ProcessOutcome};
use crate::Result;
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

/// Decoding backend used for playback checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Decoder {
    /// Let ffmpeg pick a hardware accelerator (`-hwaccel auto`).
    Hardware,
    /// Plain software decoding.
    #[default]
    Software,
}

impl std::fmt::Display for Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decoder::Hardware => write!(f, "hardware"),
            Decoder::Software => write!(f, "software"),
        }
    }
}

/// Where in the file a decode sample starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekPoint {
    /// No seek flag at all.
    Beginning,
    /// `-ss <seconds>` from the start.
    Offset(f64),
    /// `-sseof -<seconds>` before the end.
    FromEnd(u32),
}

/// Check if ffmpeg is installed.
pub fn is_installed() -> bool {
    process::is_available("ffmpeg")
}

/// Get ffmpeg version.
pub fn get_version() -> Result<String> {
    process::version_line("ffmpeg")
}

/// Build the argument list for decoding `sample_secs` seconds of `path` to the null muxer.
pub fn decode_args(
    path: &Path,
    decoder: Decoder,
    seek: SeekPoint,
    sample_secs: u32,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-v".into(), "error".into()];

    if decoder == Decoder::Hardware {
        args.push("-hwaccel".into());
        args.push("auto".into());
    }

    match seek {
        SeekPoint::Beginning => {}
        SeekPoint::Offset(seconds) => {
            args.push("-ss".into());
            args.push(seconds.to_string().into());
        }
        SeekPoint::FromEnd(seconds) => {
            args.push("-sseof".into());
            args.push(format!("-{}", seconds).into());
        }
    }

    args.push("-i".into());
    args.push(path.as_os_str().to_os_string());
    args.push("-t".into());
    args.push(sample_secs.to_string().into());
    args.push("-f".into());
    args.push("null".into());
    args.push("-".into());
    args
}

/// Decode a sample of `path`; a non-zero exit means the stream could not be decoded.
pub async fn decode_sample(
    path: &Path,
    decoder: Decoder,
    seek: SeekPoint,
    sample_secs: u32,
    timeout: Duration,
) -> Result<ProcessOutcome> {
    let args = decode_args(path, decoder, seek, sample_secs);
    process::run_with_timeout("ffmpeg", args, timeout).await
}
