//! Application-wide error types using thiserror.

use tpulse_common::TPulseError;
use tpulse_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    /// Error from the core crates.
    #[error(transparent)]
    Core(#[from] TPulseError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A background task failed to complete.
    #[error("Task error: {0}")]
    Task(String),

    /// The requested combination of options is not supported.
    #[error("Invalid request: {0}")]
    Request(String),
}

/// Result type for the dashboard application.
pub type DashboardResult<T> = Result<T, DashboardError>;
