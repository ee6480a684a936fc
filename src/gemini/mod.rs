mod client;
pub mod types;

use reqwest::StatusCode;
use thiserror::Error;

pub use client::*;
pub use types::*;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("send generateContent request: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generateContent error: {status} - {body}")]
    Status { status: StatusCode, body: String },
    #[error("parse generateContent response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeminiErrorKind {
    RateLimited,
    Server,
    Network,
    Timeout,
    Client,
    Decode,
    Unknown,
}

impl GeminiError {
    /// Coarse classification used for logging only; nothing retries.
    pub fn kind(&self) -> GeminiErrorKind {
        match self {
            GeminiError::Status { status, .. } => {
                if *status == StatusCode::TOO_MANY_REQUESTS {
                    GeminiErrorKind::RateLimited
                } else if status.is_server_error() {
                    GeminiErrorKind::Server
                } else if status.is_client_error() {
                    GeminiErrorKind::Client
                } else {
                    GeminiErrorKind::Unknown
                }
            }
            GeminiError::Http(e) => {
                if e.is_timeout() {
                    GeminiErrorKind::Timeout
                } else if e.is_decode() {
                    GeminiErrorKind::Decode
                } else if e.is_connect() || e.is_body() || e.is_request() {
                    GeminiErrorKind::Network
                } else {
                    GeminiErrorKind::Unknown
                }
            }
            GeminiError::Decode(_) => GeminiErrorKind::Decode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> GeminiError {
        GeminiError::Status {
            status: StatusCode::from_u16(code).unwrap(),
            body: String::new(),
        }
    }

    #[test]
    fn classifies_statuses() {
        assert_eq!(status(429).kind(), GeminiErrorKind::RateLimited);
        assert_eq!(status(503).kind(), GeminiErrorKind::Server);
        assert_eq!(status(400).kind(), GeminiErrorKind::Client);
    }

    #[test]
    fn classifies_decode_errors() {
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(GeminiError::from(e).kind(), GeminiErrorKind::Decode);
    }
}
