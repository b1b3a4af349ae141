//! Error types for the collaborator sweep.

use thiserror::Error;

/// The main error type for sweep operations.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error ({status}): {body}")]
    GitHub { status: u16, body: String },

    #[error("GITHUB_TOKEN environment variable is not set")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SweepError {
    /// HTTP status code of a failed API call, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::GitHub { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Response body of a failed API call, if this error carries one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::GitHub { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// A specialized Result type for sweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;
