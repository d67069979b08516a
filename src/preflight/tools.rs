//! FFmpeg tool preflight checks.

use super::CheckResult;
use crate::services::{ffmpeg, ffprobe};

const INSTALL_HINT: &str = "Install FFmpeg with: corrupt-scan setup";

/// Check if ffprobe is installed.
pub fn check_ffprobe() -> CheckResult {
    if ffprobe::is_installed() {
        match ffprobe::get_version() {
            Ok(version) => CheckResult::ok("ffprobe", &format!("installed ({})", version)),
            Err(_) => CheckResult::ok("ffprobe", "installed"),
        }
    } else {
        CheckResult::fail("ffprobe", "not found", INSTALL_HINT)
    }
}

/// Check if ffmpeg is installed.
pub fn check_ffmpeg() -> CheckResult {
    if ffmpeg::is_installed() {
        match ffmpeg::get_version() {
            Ok(version) => CheckResult::ok("ffmpeg", &format!("installed ({})", version)),
            Err(_) => CheckResult::ok("ffmpeg", "installed"),
        }
    } else {
        CheckResult::fail("ffmpeg", "not found", INSTALL_HINT)
    }
}
