//! Error types and handling for the `Viajarte` library

use thiserror::Error;

use crate::store::StoreError;

/// Main error type for the `Viajarte` library
#[derive(Error, Debug)]
pub enum ViajarteError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Document store errors
    #[error("Store error: {source}")]
    Store {
        #[from]
        source: StoreError,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl ViajarteError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ViajarteError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            ViajarteError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            ViajarteError::Store { source } => match source {
                StoreError::NotFound(id) => format!("Trip '{id}' no longer exists."),
                _ => "Unable to reach the trip store. Please try again later.".to_string(),
            },
            ViajarteError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            ViajarteError::General { message } => message.clone(),
        }
    }
}
