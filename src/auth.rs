//! Elorus request authentication.
//!
//! Elorus authenticates with a static API token plus an organization header.
//! Demo organizations additionally require `X-Elorus-Demo: true`.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;

use crate::error::{ElorusError, Result};

/// Organization header name.
pub const ORGANIZATION_HEADER: &str = "x-elorus-organization";

/// Demo mode header name.
pub const DEMO_HEADER: &str = "x-elorus-demo";

/// Credentials attached to every outgoing request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    organization_id: String,
    demo: bool,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("organization_id", &self.organization_id)
            .field("demo", &self.demo)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Create credentials for an organization.
    pub fn new(token: impl Into<String>, organization_id: impl Into<String>, demo: bool) -> Self {
        Self {
            token: token.into(),
            organization_id: organization_id.into(),
            demo,
        }
    }

    /// Same credentials with demo mode switched on or off.
    #[must_use]
    pub fn with_demo(mut self, demo: bool) -> Self {
        self.demo = demo;
        self
    }

    /// The organization these credentials act on.
    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    /// Whether requests target the demo environment.
    pub fn is_demo(&self) -> bool {
        self.demo
    }

    /// Derive the authentication headers.
    ///
    /// Always contains `Authorization` and `X-Elorus-Organization`;
    /// `X-Elorus-Demo` is present only in demo mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the token or organization id contain characters
    /// that are not valid in an HTTP header.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(3);

        let mut token = header_value(&format!("Token {}", self.token))?;
        token.set_sensitive(true);
        headers.insert(AUTHORIZATION, token);
        headers.insert(
            HeaderName::from_static(ORGANIZATION_HEADER),
            header_value(&self.organization_id)?,
        );
        if self.demo {
            headers.insert(
                HeaderName::from_static(DEMO_HEADER),
                HeaderValue::from_static("true"),
            );
        }

        Ok(headers)
    }

    /// Inject the authentication headers into a request.
    pub fn apply(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(request.headers(self.headers()?))
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ElorusError::InvalidHeader(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_without_demo() {
        let headers = Credentials::new("secret", "1234", false).headers().unwrap();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers["authorization"], "Token secret");
        assert_eq!(headers["x-elorus-organization"], "1234");
        assert!(!headers.contains_key(DEMO_HEADER));
    }

    #[test]
    fn test_headers_with_demo() {
        let headers = Credentials::new("secret", "1234", true).headers().unwrap();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers["X-Elorus-Demo"], "true");
    }

    #[test]
    fn test_authorization_is_sensitive() {
        let headers = Credentials::new("secret", "1234", false).headers().unwrap();
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_invalid_header_value() {
        let err = Credentials::new("bad\ntoken", "1234", false)
            .headers()
            .unwrap_err();
        assert!(matches!(err, ElorusError::InvalidHeader(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let debug = format!("{:?}", Credentials::new("secret-token", "1234", true));
        assert!(debug.contains("1234"));
        assert!(!debug.contains("secret-token"));
    }
}
