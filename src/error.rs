//! Error types and handling for the `VoyageAI` application

use thiserror::Error;

/// Main error type for the `VoyageAI` application
#[derive(Error, Debug)]
pub enum VoyageError {
    /// Configuration-related errors, fatal at startup
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport failures: connection refused, DNS, timeouts
    #[error("Network error: {message}")]
    Network { message: String },

    /// Non-success HTTP status from an upstream service
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Upstream answered but the body could not be understood
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The destination could not be resolved to a location
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl VoyageError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new API error for an HTTP status
    pub fn api<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a new invalid-response error
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Whether another attempt could succeed: transport failures, 5xx and 429.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            VoyageError::Network { .. } => true,
            VoyageError::Api { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            VoyageError::Config { message } => message.clone(),
            VoyageError::Network { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            VoyageError::Api { status: 401 | 403, .. } => {
                "The service rejected the API key. Please check your .env file.".to_string()
            }
            VoyageError::Api { status: 429, .. } => {
                "The service quota was exceeded. Please try again later.".to_string()
            }
            VoyageError::Api { status, .. } => {
                format!("The service returned an error (HTTP {status}). Please try again.")
            }
            VoyageError::InvalidResponse { .. } => {
                "The service returned an unexpected response. Please try again.".to_string()
            }
            VoyageError::Validation { message } => format!("Invalid input: {message}"),
            VoyageError::NotFound { message } => message.clone(),
            VoyageError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
