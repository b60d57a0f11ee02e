//! Error types for tessel_app

use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be written back out
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Config parsed but holds values the engine cannot run with
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors that can occur in a Tessel session
#[derive(Error, Debug)]
pub enum TesselError {
    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Platform error (grid, key map)
    #[error("Platform error: {0}")]
    Platform(#[from] tessel_platform::PlatformError),
}

/// Result type for tessel_app operations
pub type Result<T> = std::result::Result<T, TesselError>;
