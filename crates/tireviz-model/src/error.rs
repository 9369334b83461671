//! Configuration error types.
//!
//! The tick path itself is infallible; only loading and validating a
//! [`ModelConfig`](crate::config::ModelConfig) can fail.

use std::path::PathBuf;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// YAML could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither YAML nor JSON
    #[error("Unsupported config format for {0}: expected .yaml, .yml or .json")]
    UnsupportedFormat(PathBuf),

    /// A value is outside its allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Dotted field path
        field: &'static str,
        /// The rejected value
        value: String,
        /// Minimum allowed value
        min: String,
        /// Maximum allowed value
        max: String,
    },

    /// Cross-field constraint violated
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ConfigError {
    /// Create an out of range error for a numeric value.
    pub fn out_of_range<T: std::fmt::Debug>(field: &'static str, value: T, min: T, max: T) -> Self {
        ConfigError::OutOfRange {
            field,
            value: format!("{value:?}"),
            min: format!("{min:?}"),
            max: format!("{max:?}"),
        }
    }

    /// Whether the error comes from a bad value rather than a bad file.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConfigError::OutOfRange { .. } | ConfigError::ConstraintViolation(_)
        )
    }
}
