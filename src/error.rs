//! Error types for the corruption scanner.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the corruption scanner.
#[derive(Error, Debug)]
pub enum Error {
    // Tool errors
    #[error("{0} not found. Install FFmpeg or run: corrupt-scan setup")]
    ToolNotFound(String),

    // Config errors
    #[error("Configuration file not found: {0}. Create one with: corrupt-scan config init")]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration file already exists: {0} (use --force to overwrite)")]
    ConfigExists(String),

    // Setup errors
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Installation failed: {0}")]
    InstallFailed(String),

    #[error("No usable editor found (tried {0})")]
    EditorNotFound(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // CSV errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // TOML errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
