//! Error types for the common library.
//!
//! # Error Categories
//!
//! - `ConfigError`: Missing or invalid settings, unreadable `.env` files
//! - `GcsError`: Malformed Cloud Storage object addresses

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the common library.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (missing env vars, invalid values, bad `.env` files)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Cloud Storage addressing errors
    #[error(transparent)]
    Gcs(#[from] GcsError),
}

/// Configuration errors.
///
/// These errors occur when seeding the environment from a `.env` file or
/// when reading settings from environment variables. None of the variants
/// carry a variable's value, so they are safe to log.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Required environment variable {0} is not set")]
    MissingEnvVar(String),

    /// Several required environment variables are not set
    #[error("Required environment variables are not set: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),

    /// An environment variable has an invalid value
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// A `.env` file exists but a line could not be parsed
    #[error("Failed to parse {} (line {line}, column {column})", path.display())]
    Dotenv {
        /// The file being loaded
        path: PathBuf,
        /// 1-based line where the offending entry starts
        line: usize,
        /// Position of the parse failure within the offending entry
        column: usize,
    },

    /// A `.env` file exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    DotenvIo {
        /// The file being loaded
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create a new missing environment variable error.
    pub fn missing_env_var(name: impl Into<String>) -> Self {
        ConfigError::MissingEnvVar(name.into())
    }

    /// Create a new invalid value error.
    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue(name.into(), reason.into())
    }

    /// Names of the variables this error reports as missing, if any.
    pub fn missing_vars(&self) -> Vec<&str> {
        match self {
            ConfigError::MissingEnvVar(name) => vec![name.as_str()],
            ConfigError::MissingEnvVars(names) => names.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

/// Cloud Storage addressing errors.
#[derive(Debug, Error)]
pub enum GcsError {
    /// The GCS URI format is invalid
    #[error("Invalid GCS URI: {0}")]
    InvalidUri(String),
}

impl GcsError {
    /// Create a new invalid URI error.
    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        GcsError::InvalidUri(uri.into())
    }
}

/// Result type alias using the unified Error type.
pub type Result<T> = std::result::Result<T, Error>;
