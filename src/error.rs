//! Error types for Elorus API operations.

use serde_json::Value;
use thiserror::Error;

use crate::response::{message_text, RawResponse};

/// Errors that can occur during Elorus API operations.
///
/// The status-mapped variants all carry the decoded response `message`
/// together with a snapshot of the response that produced it.
#[derive(Debug, Error)]
pub enum ElorusError {
    /// Configuration is missing or incomplete.
    #[error("Elorus configuration required: {0}")]
    ConfigMissing(String),

    /// A credential or extra header could not be encoded as an HTTP header.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// The API rejected the token (401).
    #[error("Error code: {}, Error message: {}", .response.status.as_u16(), message_text(.message))]
    Authentication {
        message: Value,
        response: Box<RawResponse>,
    },

    /// The token is valid but not allowed to act on the organization (403).
    #[error("Error code: {}, Error message: {}", .response.status.as_u16(), message_text(.message))]
    Authorization {
        message: Value,
        response: Box<RawResponse>,
    },

    /// Rate limit exceeded (429).
    #[error("Error code: {}, Error message: {}", .response.status.as_u16(), message_text(.message))]
    Throttling {
        message: Value,
        response: Box<RawResponse>,
    },

    /// The request was rejected as malformed (400).
    #[error("Error code: {}, Error message: {}", .response.status.as_u16(), message_text(.message))]
    BadRequest {
        message: Value,
        response: Box<RawResponse>,
    },

    /// Any other failing response: 5xx, unmapped 4xx and similar.
    #[error("Error code: {}, Error message: {}", .response.status.as_u16(), message_text(.message))]
    Api {
        message: Value,
        response: Box<RawResponse>,
    },

    /// A PDF download arrived without a usable `Content-Disposition` header.
    #[error("Error code: {}, Error message: {}", .response.status.as_u16(), message_text(.message))]
    ContentFormat {
        message: Value,
        response: Box<RawResponse>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing or serialization error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Filesystem error while saving a download.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ElorusError {
    /// The response that produced this error, if it came from the API.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::Authentication { response, .. }
            | Self::Authorization { response, .. }
            | Self::Throttling { response, .. }
            | Self::BadRequest { response, .. }
            | Self::Api { response, .. }
            | Self::ContentFormat { response, .. } => Some(response),
            _ => None,
        }
    }

    /// HTTP status code of the originating response.
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status.as_u16())
    }

    /// The error message, for errors raised from an API response.
    pub fn message(&self) -> Option<&Value> {
        match self {
            Self::Authentication { message, .. }
            | Self::Authorization { message, .. }
            | Self::Throttling { message, .. }
            | Self::BadRequest { message, .. }
            | Self::Api { message, .. }
            | Self::ContentFormat { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type alias for Elorus operations.
pub type Result<T> = core::result::Result<T, ElorusError>;
