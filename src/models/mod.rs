//! Data models.

pub mod config;
pub mod scan;
