use crate::config::error::ConfigError;
use thiserror::Error;

/// Application-wide error type for the CLI and scheduler paths.
///
/// Channel delivery failures never surface here: they are converted into
/// report entries by the dispatcher. This type covers what can stop the
/// process itself (bad configuration, bad arguments, scheduler failures).
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Scheduler error (cron registration, start, shutdown)
    #[error("Scheduler error: {message}")]
    Scheduler { message: String },

    /// I/O error while reading message content or writing output
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// No channel delivered the message (only raised in strict mode)
    #[error("Delivery failed: {message}")]
    Delivery { message: String },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::ValidationError { field, message } => AppError::Validation {
                field,
                reason: message,
            },
            other => AppError::Configuration {
                key: "settings".to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_config_error_maps_to_validation() {
        let err: AppError = ConfigError::validation("http.timeout_secs", "must be positive").into();
        match err {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "http.timeout_secs");
                assert_eq!(reason, "must be positive");
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_other_config_error_maps_to_configuration() {
        let err: AppError = ConfigError::file_not_found("config/default.toml").into();
        assert!(matches!(err, AppError::Configuration { .. }));
        assert_eq!(err.to_string(), "Configuration error: settings");
    }
}
