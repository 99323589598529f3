//! Response interpretation.
//!
//! Every API call funnels its response through [`interpret`], which turns a
//! [`RawResponse`] snapshot into a [`Payload`] or exactly one typed
//! [`ElorusError`]. Content type is checked before status: a PDF body is not
//! JSON, so downloads short-circuit before any decoding happens.

use std::path::{Path, PathBuf};

use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{ElorusError, Result};

const PDF_CONTENT_TYPE: &str = "application/pdf";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Keys probed, in order, for a human-readable reason in error bodies.
const ERROR_MESSAGE_KEYS: [&str; 3] = ["message", "msg", "detail"];

/// A fully-read HTTP response.
///
/// The body is read eagerly so the transport session can be released before
/// interpretation, and so errors can keep the response around.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Create a response snapshot.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Read a header as a string, if present and valid UTF-8.
    pub fn header(&self, name: impl reqwest::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Lowercased media type without parameters (e.g. `application/json`).
    pub fn content_type(&self) -> String {
        self.header(CONTENT_TYPE)
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A file returned by a binary download endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Filename announced by `Content-Disposition`.
    pub filename: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl Download {
    /// Write the file into `dir` under its announced filename.
    ///
    /// Path components in the announced name are ignored so a download can
    /// never escape `dir`.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let name = Path::new(&self.filename)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "download.pdf".into());
        let path = dir.as_ref().join(name);
        std::fs::write(&path, &self.bytes)?;
        tracing::debug!(path = %path.display(), bytes = self.bytes.len(), "saved download");
        Ok(path)
    }
}

/// A successfully interpreted response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Decoded JSON document.
    Json(Value),
    /// Undecoded text, returned for `204 No Content`.
    Text(String),
    /// Binary download.
    File(Download),
}

impl Payload {
    /// Borrow the JSON document, if this is one.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Take the JSON document, if this is one.
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Take the text body, if this is one.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Take the downloaded file, if this is one.
    pub fn into_download(self) -> Option<Download> {
        match self {
            Self::File(download) => Some(download),
            _ => None,
        }
    }
}

/// Classify a response into a payload or a typed error.
///
/// Every error is logged at `warn` before it is returned.
pub fn interpret(response: RawResponse) -> Result<Payload> {
    let status = response.status;
    let result = classify(response);
    if let Err(error) = &result {
        tracing::warn!(status = status.as_u16(), "request failed: {error}");
    }
    result
}

fn classify(response: RawResponse) -> Result<Payload> {
    let content_type = response.content_type();

    if content_type == PDF_CONTENT_TYPE {
        return file_download(response).map(Payload::File);
    }

    if response.status == StatusCode::NO_CONTENT {
        return Ok(Payload::Text(response.text()));
    }

    let message: Value = serde_json::from_slice(&response.body)?;
    let status = response.status;
    let response = Box::new(response);

    let error = match status.as_u16() {
        401 => ElorusError::Authentication { message, response },
        403 => ElorusError::Authorization { message, response },
        429 => ElorusError::Throttling { message, response },
        400 => ElorusError::BadRequest { message, response },
        500.. => ElorusError::Api { message, response },
        _ if status.is_success() => return Ok(Payload::Json(message)),
        _ => fallback_error(&message, &content_type, response),
    };
    Err(error)
}

/// Extract the filename from `Content-Disposition` and pair it with the body.
fn file_download(response: RawResponse) -> Result<Download> {
    let disposition = response.header(CONTENT_DISPOSITION).unwrap_or_default();

    let Some((_, rest)) = disposition.split_once("filename=") else {
        return Err(ElorusError::ContentFormat {
            message: Value::String("No filename found in Content-Disposition header".to_string()),
            response: Box::new(response),
        });
    };

    let filename = rest
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches('"')
        .to_string();

    if filename.is_empty() {
        return Err(ElorusError::ContentFormat {
            message: Value::String("Invalid Content-Disposition header format".to_string()),
            response: Box::new(response),
        });
    }

    Ok(Download {
        filename,
        bytes: response.body,
    })
}

/// Build the generic error for a failing status none of the explicit cases
/// matched.
fn fallback_error(body: &Value, content_type: &str, response: Box<RawResponse>) -> ElorusError {
    let mut error = response.text();

    if content_type == JSON_CONTENT_TYPE {
        let reason = ERROR_MESSAGE_KEYS
            .iter()
            .find_map(|key| body.get(key))
            .filter(|value| is_truthy(value));

        if let Some(reason) = reason {
            let field = |key: &str| body.get(key).map_or_else(|| "None".to_string(), message_text);
            error = format!(
                "Message: {} , Error details: {}, {}",
                message_text(reason),
                field("errors"),
                field("data"),
            );
        }
    }

    ElorusError::Api {
        message: Value::String(error),
        response,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
    }
}

/// Render a message value for display, without quoting plain strings.
pub(crate) fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
