//! Errors returned by the library API client.

use reqwest::StatusCode;

/// Failure talking to the library server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400, carrying the server's message when it sent one.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Access forbidden")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Internal server error")]
    Server,

    /// Any other non-success status.
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (connect, timeout, TLS).
    #[error("Network error: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Server did not return a task id")]
    MissingTaskId,

    #[error(transparent)]
    Common(#[from] scenescape_common::Error),
}

impl ApiError {
    /// Map a non-success status to an error. `message` is the server's own
    /// explanation, if the body carried one.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status.as_u16() {
            400 => ApiError::InvalidRequest(message.unwrap_or_else(|| "Invalid request".into())),
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            500 => ApiError::Server,
            code => ApiError::Status {
                status: code,
                message: message.unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                }),
            },
        }
    }

    /// Whether the failure happened before any response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
