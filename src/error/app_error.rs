use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// This enum provides structured error information for the notification
/// pipeline, supporting automatic conversion from anyhow and detailed
/// context for debugging.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Upstream service failure with service and operation context
    ///
    /// Covers both the document store and the push-delivery service. These
    /// propagate out of the trigger invocation so the hosting platform can
    /// apply its own retry policy.
    #[error("Upstream service '{service}' failed during {operation}")]
    Upstream {
        service: &'static str,
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Create an upstream error for a document-store operation
    pub fn firestore<S: Into<String>>(operation: S, source: impl Into<anyhow::Error>) -> Self {
        AppError::Upstream {
            service: "firestore",
            operation: operation.into(),
            source: source.into(),
        }
    }

    /// Create an upstream error for a push-delivery operation
    pub fn fcm<S: Into<String>>(operation: S, source: impl Into<anyhow::Error>) -> Self {
        AppError::Upstream {
            service: "fcm",
            operation: operation.into(),
            source: source.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<crate::config::error::ConfigError> for AppError {
    fn from(error: crate::config::error::ConfigError) -> Self {
        AppError::Configuration {
            key: "settings".to_string(),
            source: anyhow::Error::from(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
