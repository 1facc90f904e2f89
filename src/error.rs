//! Error types for video-dash

use thiserror::Error;

/// Broad classification of a [`DashError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Network errors
    TransportError,
    ParseError,

    // User errors
    InvalidConfig,

    // System errors
    FileError,
}

/// Main error type for video-dash
#[derive(Error, Debug)]
pub enum DashError {
    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {url}")]
    Transport { status: u16, url: String },

    /// The backend answered 2xx but the body was not the expected JSON.
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Transport { .. } => ErrorCode::TransportError,
            Self::Parse(_) => ErrorCode::ParseError,
            Self::Http(_) => ErrorCode::TransportError,
            Self::InvalidConfig(_) => ErrorCode::InvalidConfig,
            Self::File(_) => ErrorCode::FileError,
            Self::Json(_) => ErrorCode::ParseError,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
