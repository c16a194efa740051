//! Error types and utilities for tpulse.

use thiserror::Error;

/// Result type alias for tpulse operations.
pub type Result<T> = std::result::Result<T, TPulseError>;

/// Main error type for tpulse operations.
#[derive(Error, Debug)]
pub enum TPulseError {
    /// Configuration related errors.
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Dataset validation errors raised at load time.
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable description.
        message: String,
        /// Offending field, if known.
        field: Option<String>,
        /// Zero-based row index, if the error belongs to a record.
        row: Option<usize>,
    },

    /// Chart construction errors.
    #[error("Chart error: {message}")]
    Chart {
        /// Human readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Preview rendering errors.
    #[error("Render error: {message}")]
    Render {
        /// Human readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic error with custom message.
    #[error("{message}")]
    Generic {
        /// Human readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TPulseError {
    /// Create a new generic error with a custom message and source.
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error pinned to a dataset row and field.
    pub fn validation_at(msg: impl Into<String>, field: impl Into<String>, row: usize) -> Self {
        Self::Validation {
            message: format!("row {row}: {}", msg.into()),
            field: Some(field.into()),
            row: Some(row),
        }
    }

    /// Create a new chart error.
    pub fn chart(msg: impl Into<String>) -> Self {
        Self::Chart {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source.
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true for errors raised while validating the dataset.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to `TPulseError`
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for TPulseError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::render_with_source("Chart preview rendering failed", err)
    }
}
