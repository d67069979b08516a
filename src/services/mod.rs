//! Wrappers around the external multimedia tools.

pub mod ffmpeg;
pub mod ffprobe;
pub mod process;
