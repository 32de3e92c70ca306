//! Domain-level error types for ctt-downloader.
//!
//! All errors are typed with `thiserror` and provide meaningful context
//! without exposing internal details to end users.

use thiserror::Error;

/// Application-level errors covering configuration, transport and IO failures.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request could not be sent or the response body could not be read.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The API answered with a non-success HTTP status.
    #[error("API request failed: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Invalid or unexpected data (filenames, timestamps).
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create a transport error from a reqwest error.
    pub fn transport(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
