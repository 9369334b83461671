//! Error types for the tireviz CLI

use thiserror::Error;
use tireviz_model::ConfigError;
use tireviz_telemetry::TelemetryError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgument(_) => 2,
            CliError::Config(_) => 3,
            CliError::Telemetry(_) => 4,
            CliError::IoError(_) | CliError::JsonError(_) => 1,
        }
    }
}
