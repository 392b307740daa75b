//! Error types for requests to the preprocessing service.

use thiserror::Error;

/// Errors that can occur while talking to the preprocessing service.
///
/// The `Display` text of [`RequestError::Status`] and [`RequestError::Server`]
/// is the server-provided message verbatim so it can be shown to the user
/// as-is.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RequestError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// `error` field of the body, or `HTTP <status>` when absent.
        message: String,
    },

    /// The server answered 2xx but the body carries an `error` field.
    #[error("{0}")]
    Server(String),

    /// The body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The configured server address is unusable.
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),
}

impl RequestError {
    /// Builds a status error from an optional server message.
    pub fn status(status: u16, message: Option<String>) -> Self {
        Self::Status {
            status,
            message: message.unwrap_or_else(|| format!("HTTP {status}")),
        }
    }

    /// Returns a user-friendly message for failures without a server message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => {
                "Could not reach the processing server. Please check that it is running."
                    .to_string()
            }
            Self::Status { message, .. } | Self::Server(message) => message.clone(),
            Self::Decode(_) => "The server sent an unexpected response.".to_string(),
            Self::InvalidUrl(url) => format!("Invalid server address: {url}"),
        }
    }

    /// Returns whether a retry could succeed without user action.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Server(_) | Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for requests.
pub type Result<T> = std::result::Result<T, RequestError>;
