//! Error types for the drive mount table.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for mount table operations.
#[derive(Error, Debug)]
pub enum MountsError {
    #[error("Mount table file not found: {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Cannot resolve '{}': {source}", .path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Filesystem operation on '{}' failed: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid host path '{path}': {reason}")]
    InvalidHostPath { path: String, reason: String },

    #[error("{count} mounts requested but only {max} drive letters are available")]
    TooManyMounts { count: usize, max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MountsError {
    /// Build an invariant violation, logging it at error level.
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!("invariant violated: {}", message);
        MountsError::InvariantViolation(message)
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MountsError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, MountsError>;
