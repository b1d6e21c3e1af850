//! HTTP transport
//!
//! The service is reached through the [`Transport`] trait so that paging
//! and aggregation never depend on a concrete HTTP stack. [`HttpClient`]
//! is the reqwest-backed implementation used in production.
//!
//! A transport reports every response, including 4xx/5xx statuses; deciding
//! what a status means is left to the caller.

use crate::error::Result;
use crate::types::ParamMap;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, LAST_MODIFIED};
use reqwest::{Client, Method, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("uk-covid19/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Debug, Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// A response as seen by the pager: status, final URL, headers and raw body
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status
    pub status: StatusCode,
    /// URL the request was sent to, query string included
    pub url: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a response with no headers
    pub fn new(status: StatusCode, url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            url: url.into(),
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Whether the status is a client or server error (>= 400)
    pub fn is_failure(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Whether the service signalled that there is nothing left to page through
    pub fn is_no_content(&self) -> bool {
        self.status == StatusCode::NO_CONTENT
    }

    /// Reason phrase for the status
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown")
    }

    /// Value of the `Last-Modified` header, if present and readable
    pub fn last_modified(&self) -> Option<&str> {
        self.headers
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
    }

    /// Body decoded as UTF-8, with invalid sequences replaced
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Something that can send a request to the service
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `method` to `url` with `params` as the query string
    async fn send(&self, method: Method, url: &str, params: &ParamMap) -> Result<HttpResponse>;
}

/// HTTP client backed by reqwest
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, method: Method, url: &str, params: &ParamMap) -> Result<HttpResponse> {
        let mut req = self.client.request(method.clone(), url);

        // Add default headers
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Add query parameters
        if !params.is_empty() {
            req = req.query(params);
        }

        let response = req.send().await?;
        let status = response.status();
        let final_url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        debug!("{} {} -> {}", method, final_url, status.as_u16());

        Ok(HttpResponse {
            status,
            url: final_url,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Percent-decode the query string of `url` for diagnostics
///
/// Falls back to the input when it is not an absolute URL.
pub fn decode_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };

    let mut base = parsed.clone();
    base.set_query(None);
    base.set_fragment(None);

    let query = parsed
        .query_pairs()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{query}")
    }
}

/// Attach `params` to `endpoint` as a query string, in parameter order
pub fn build_request_url(endpoint: &str, params: &ParamMap) -> Result<String> {
    let mut url = Url::parse(endpoint)?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }
    Ok(url.to_string())
}
