//! Elorus API client.
//!
//! Low-level dispatcher that attaches authentication, builds versioned URLs
//! and hands every response to the interpreter. Resource-specific operations
//! live on the facades returned by [`ElorusClient::contacts`] and
//! [`ElorusClient::invoices`].

use std::env;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::auth::Credentials;
use crate::error::{ElorusError, Result};
use crate::resources::{Contacts, Invoices};
use crate::response::{interpret, Payload, RawResponse};

/// Default Elorus API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.elorus.com";

/// Default API version path segment.
pub const DEFAULT_API_VERSION: &str = "v1.1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
const USER_AGENT: &str = concat!("elorus-rs/", env!("CARGO_PKG_VERSION"));

/// Extra per-call transport options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Overrides the default request timeout.
    pub timeout: Option<Duration>,
    /// Additional headers sent alongside the authentication headers.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Options with a custom timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Options with an extra header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ElorusError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ElorusError::InvalidHeader(format!("{name}: {e}")))?;
            map.append(name, value);
        }
        Ok(map)
    }
}

/// Elorus API client.
///
/// Holds configuration only. Each call opens its own HTTP session and
/// releases it once the response body has been read; nothing is pooled
/// across calls.
///
/// # Example
///
/// ```no_run
/// use elorus::ElorusClient;
///
/// # async fn example() -> elorus::Result<()> {
/// // Create from environment variables
/// let client = ElorusClient::from_env()?;
///
/// // Or configure manually
/// let client = ElorusClient::new("your-api-key", "1234567890")?.with_demo(true);
/// let contacts = client.contacts().list(&Default::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ElorusClient {
    credentials: Credentials,
    base_url: Url,
    api_version: String,
}

impl std::fmt::Debug for ElorusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElorusClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("organization_id", &self.credentials.organization_id())
            .field("demo", &self.credentials.is_demo())
            .finish_non_exhaustive()
    }
}

impl ElorusClient {
    /// Create a client from environment variables.
    ///
    /// Reads `ELORUS_API_KEY` and `ELORUS_ORGANIZATION_ID` (both required),
    /// plus the optional `ELORUS_DEMO`, `ELORUS_API_URL` and
    /// `ELORUS_API_VERSION`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is not set or the base URL is
    /// invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a client from any variable source, using the same names and
    /// defaults as [`ElorusClient::from_env`].
    pub(crate) fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            get(name).ok_or_else(|| {
                ElorusError::ConfigMissing(format!("{name} environment variable not set"))
            })
        };
        let api_key = required("ELORUS_API_KEY")?;
        let organization_id = required("ELORUS_ORGANIZATION_ID")?;

        let demo = get("ELORUS_DEMO").is_some_and(|v| parse_flag(&v));
        let base_url = get("ELORUS_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_version =
            get("ELORUS_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(Self::new(&api_key, &organization_id)?
            .with_demo(demo)
            .with_base_url(&base_url)?
            .with_api_version(&api_version))
    }

    /// Create a client against the production API.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Elorus API token
    /// * `organization_id` - Organization the requests act on
    ///
    /// # Errors
    ///
    /// Returns an error if the default base URL cannot be parsed.
    pub fn new(api_key: &str, organization_id: &str) -> Result<Self> {
        Ok(Self {
            credentials: Credentials::new(api_key, organization_id, false),
            base_url: normalize_base_url(DEFAULT_BASE_URL)?,
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Toggle demo mode (`X-Elorus-Demo: true`).
    #[must_use]
    pub fn with_demo(mut self, demo: bool) -> Self {
        self.credentials = self.credentials.with_demo(demo);
        self
    }

    /// Use a different base URL (e.g. a mock server).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    /// Use a different API version segment.
    #[must_use]
    pub fn with_api_version(mut self, api_version: &str) -> Self {
        self.api_version = api_version.trim_matches('/').to_string();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the API version segment.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Get the credentials attached to each request.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Contacts resource.
    pub fn contacts(&self) -> Contacts<'_> {
        Contacts::new(self)
    }

    /// Invoices resource.
    pub fn invoices(&self) -> Invoices<'_> {
        Invoices::new(self)
    }

    /// Resolve `<base_url>/<api_version>/<path>`.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        Ok(self.base_url.join(&format!("{}/{path}", self.api_version))?)
    }

    /// Issue a request and interpret the response.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - Resource path relative to the versioned root, no leading slash
    /// * `payload` - Already-serialized JSON body
    /// * `query` - Query string parameters
    /// * `options` - Extra transport options
    ///
    /// # Errors
    ///
    /// Returns the interpreter's typed error for failing responses, or a
    /// transport error if the request could not be sent.
    #[tracing::instrument(skip(self, payload, query, options), fields(organization = %self.credentials.organization_id()))]
    pub async fn request<Q: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Map<String, Value>>,
        query: Option<&Q>,
        options: &RequestOptions,
    ) -> Result<Payload> {
        let url = self.url_for(path)?;
        let session = self.session(options)?;

        let mut request = session.request(method, url).headers(options.header_map()?);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(payload) = payload {
            request = request.json(payload);
        }
        // Authentication goes on last, right before dispatch.
        let request = self.credentials.apply(request)?;

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        drop(session);

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received response");
        interpret(RawResponse::new(status, headers, body.to_vec()))
    }

    /// Build a transport session for a single call.
    fn session(&self, options: &RequestOptions) -> Result<Client> {
        Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(options.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(ElorusError::Http)
    }
}

/// Truthy spellings accepted for `ELORUS_DEMO`, by the library and the CLI.
pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    // Ensure base URL ends with / so joins keep any path prefix
    let base_url = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };
    Ok(Url::parse(&base_url)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_client_debug() {
        let client = ElorusClient::new("test-token", "42").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("ElorusClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_default_configuration() {
        let client = ElorusClient::new("token", "42").unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.elorus.com/");
        assert_eq!(client.api_version(), "v1.1");
        assert!(!client.credentials().is_demo());
    }

    #[test]
    fn test_url_for_builds_versioned_path() {
        let client = ElorusClient::new("token", "42").unwrap();
        assert_eq!(
            client.url_for("invoices/7/pdf/").unwrap().as_str(),
            "https://api.elorus.com/v1.1/invoices/7/pdf/"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = ElorusClient::new("token", "42")
            .unwrap()
            .with_base_url("http://localhost:8080/api")
            .unwrap();
        let client2 = ElorusClient::new("token", "42")
            .unwrap()
            .with_base_url("http://localhost:8080/api/")
            .unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
        assert_eq!(
            client1.url_for("contacts/").unwrap().as_str(),
            "http://localhost:8080/api/v1.1/contacts/"
        );
    }

    #[test]
    fn test_custom_api_version() {
        let client = ElorusClient::new("token", "42")
            .unwrap()
            .with_api_version("/v1.2/");
        assert_eq!(
            client.url_for("contacts/").unwrap().as_str(),
            "https://api.elorus.com/v1.2/contacts/"
        );
    }

    #[test]
    fn test_with_demo_keeps_token() {
        let client = ElorusClient::new("token-abc", "42").unwrap().with_demo(true);
        let headers = client.credentials().headers().unwrap();
        assert_eq!(headers["authorization"], "Token token-abc");
        assert_eq!(headers["x-elorus-demo"], "true");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ElorusClient::new("token", "42")
            .unwrap()
            .with_base_url("not a url");
        assert!(matches!(result, Err(ElorusError::Url(_))));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_requires_key_and_organization() {
        let err = ElorusClient::from_lookup(lookup(&[("ELORUS_ORGANIZATION_ID", "42")]))
            .unwrap_err();
        assert!(matches!(err, ElorusError::ConfigMissing(ref m) if m.contains("ELORUS_API_KEY")));

        let err = ElorusClient::from_lookup(lookup(&[("ELORUS_API_KEY", "token")])).unwrap_err();
        assert!(
            matches!(err, ElorusError::ConfigMissing(ref m) if m.contains("ELORUS_ORGANIZATION_ID"))
        );
    }

    #[test]
    fn test_from_lookup_defaults() {
        let client = ElorusClient::from_lookup(lookup(&[
            ("ELORUS_API_KEY", "token"),
            ("ELORUS_ORGANIZATION_ID", "42"),
        ]))
        .unwrap();

        assert_eq!(client.base_url().as_str(), "https://api.elorus.com/");
        assert_eq!(client.api_version(), DEFAULT_API_VERSION);
        assert_eq!(client.credentials().organization_id(), "42");
        assert!(!client.credentials().is_demo());
    }

    #[test]
    fn test_from_lookup_applies_overrides() {
        let client = ElorusClient::from_lookup(lookup(&[
            ("ELORUS_API_KEY", "token"),
            ("ELORUS_ORGANIZATION_ID", "42"),
            ("ELORUS_DEMO", "yes"),
            ("ELORUS_API_URL", "http://localhost:8080/elorus"),
            ("ELORUS_API_VERSION", "v2"),
        ]))
        .unwrap();

        assert!(client.credentials().is_demo());
        assert_eq!(
            client.url_for("contacts/").unwrap().as_str(),
            "http://localhost:8080/elorus/v2/contacts/"
        );
    }

    #[test]
    fn test_from_lookup_demo_needs_truthy_value() {
        let client = ElorusClient::from_lookup(lookup(&[
            ("ELORUS_API_KEY", "token"),
            ("ELORUS_ORGANIZATION_ID", "42"),
            ("ELORUS_DEMO", "enabled"),
        ]))
        .unwrap();
        assert!(!client.credentials().is_demo());
    }

    #[test]
    fn test_from_lookup_rejects_bad_url() {
        let err = ElorusClient::from_lookup(lookup(&[
            ("ELORUS_API_KEY", "token"),
            ("ELORUS_ORGANIZATION_ID", "42"),
            ("ELORUS_API_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ElorusError::Url(_)));
    }

    #[test]
    fn test_request_options_headers() {
        let options = RequestOptions::default().with_header("X-Request-Id", "abc");
        let map = options.header_map().unwrap();
        assert_eq!(map["x-request-id"], "abc");

        let bad = RequestOptions::default().with_header("bad header", "x");
        assert!(matches!(bad.header_map(), Err(ElorusError::InvalidHeader(_))));
    }
}
