//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use std::io;

use thiserror::Error;

use crate::planner::PlannerError;
use crate::schema::SchemaError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration or entity file is missing or invalid
    #[error("VEHICLE_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// Command-line argument could not be interpreted
    #[error("VEHICLE_CLI_INVALID_ARGUMENT: {0}")]
    Argument(String),

    /// I/O error (stdin/stdout/files)
    #[error("VEHICLE_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    /// Input is not JSON
    #[error("VEHICLE_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record rejected or schema assembly failed
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Index plan failed verification
    #[error("{0}")]
    Plan(#[from] PlannerError),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(io::Error::new(io::ErrorKind::InvalidData, msg.into()))
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Config(_) => "VEHICLE_CLI_CONFIG_ERROR",
            Self::Argument(_) => "VEHICLE_CLI_INVALID_ARGUMENT",
            Self::Io(_) | Self::Json(_) => "VEHICLE_CLI_IO_ERROR",
            Self::Schema(e) => e.code().code(),
            Self::Plan(e) => e.code().code(),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
