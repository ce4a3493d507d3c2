//! Domain-specific error types for prompt-builder

use thiserror::Error;

/// Main error type for the prompt builder
#[derive(Error, Debug)]
pub enum PromptBuilderError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Clipboard error: {message}")]
    Clipboard { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<std::io::Error> for PromptBuilderError {
    fn from(err: std::io::Error) -> Self {
        PromptBuilderError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PromptBuilderError {
    fn from(err: serde_json::Error) -> Self {
        PromptBuilderError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PromptBuilderError {
    fn from(err: toml::de::Error) -> Self {
        PromptBuilderError::Serialization {
            message: format!("TOML parsing error: {}", err),
        }
    }
}

/// Result type alias for prompt-builder operations
pub type Result<T> = std::result::Result<T, PromptBuilderError>;
