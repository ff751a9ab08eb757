//! Error types shared across the toolkit.

use thiserror::Error;

/// Result type for compliance operations
pub type ComplianceResult<T> = Result<T, ComplianceError>;

/// Unified error type for audit logging, storage, configuration,
/// and framework evaluation.
#[derive(Debug, Error)]
pub enum ComplianceError {
    /// Input data failed validation
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        /// Field that failed validation, when known
        field: Option<String>,
    },

    /// Configuration is invalid or incomplete
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Framework construction or lookup failure
    #[error("Framework error: {0}")]
    Framework(String),

    /// A reporting period string could not be parsed
    #[error("Cannot parse period: {0}")]
    PeriodParse(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ComplianceError {
    /// Create a validation error with no field attribution
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error attributed to a field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a framework error
    pub fn framework(msg: impl Into<String>) -> Self {
        Self::Framework(msg.into())
    }

    /// Stable error code for log fields and API surfaces
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Framework(_) => "FRAMEWORK_ERROR",
            Self::PeriodParse(_) => "PERIOD_PARSE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }
}
