//! Error types for multiconf
//!
//! Every parser reports failures through [`ConfigError`]. The factory has its
//! own [`UnsupportedFormatError`] since it fails before any parser exists.
//! We use `thiserror` for all of them so callers can match on variants.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while binding, loading or reading a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to open config file {path}: {source}")]
    FileOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config file {path}: {source}")]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no config file has been set")]
    FileNotSet,

    #[error("config file {path} has invalid format: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("config '{key}' does not exist")]
    ConfigDoesNotExist { key: String },

    #[error("config '{key}' is not an integer")]
    InvalidIntConfig { key: String },

    #[error("config '{key}' is not a string")]
    InvalidStringConfig { key: String },

    #[error("config '{key}' is not a duration: {reason}")]
    InvalidDateConfig { key: String, reason: String },
}

impl ConfigError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::ConfigDoesNotExist { key: key.into() }
    }

    pub fn invalid_int(key: impl Into<String>) -> Self {
        Self::InvalidIntConfig { key: key.into() }
    }

    pub fn invalid_string(key: impl Into<String>) -> Self {
        Self::InvalidStringConfig { key: key.into() }
    }

    pub fn invalid_duration(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidDateConfig {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Returned by the factory for a format tag it does not know
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("config format '{0}' is currently unsupported")]
pub struct UnsupportedFormatError(pub String);

/// Failures of the duration lexer, before they are tied to a key
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("no unit (ms, s, m, h) after a number")]
    MissingUnit,

    #[error("coefficient '{0}' is not a valid integer")]
    InvalidCoefficient(String),

    #[error("{coefficient}{unit} does not fit in a duration")]
    Overflow { coefficient: u64, unit: &'static str },
}

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ConfigError>;
