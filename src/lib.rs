//! Corruption Scanner Library
//!
//! Finds corrupted audio and video files by running ffprobe/ffmpeg against
//! them and aggregating the failures into CSV reports.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod setup;
pub mod utils;

pub use error::{Error, Result};
