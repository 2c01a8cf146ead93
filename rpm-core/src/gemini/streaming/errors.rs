use std::time::Duration;
use thiserror::Error;

/// Failures while talking to the streaming endpoint
#[derive(Debug, Clone, Error)]
pub enum StreamingError {
    /// Connection, DNS or body read failures
    #[error("Network error: {message}")]
    NetworkError { message: String },
    /// Non-success HTTP status or an `error` object inside the stream
    #[error("API error ({status_code}): {message}")]
    ApiError { status_code: u16, message: String },
    #[error("Parse error: {message}")]
    ParseError {
        message: String,
        raw_response: String,
    },
    #[error("Timeout during {operation} after {duration:?}")]
    TimeoutError {
        operation: String,
        duration: Duration,
    },
    /// The stream finished without any text
    #[error("Content error: {message}")]
    ContentError { message: String },
    #[error("Streaming error: {message}")]
    StreamingError {
        message: String,
        partial_content: Option<String>,
    },
}

impl StreamingError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimeoutError { .. })
    }
}

impl From<reqwest::Error> for StreamingError {
    fn from(error: reqwest::Error) -> Self {
        Self::NetworkError {
            message: error.to_string(),
        }
    }
}
