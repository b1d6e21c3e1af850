//! Client configuration
//!
//! Every field has a default, so an empty YAML document is a valid
//! configuration pointing at the public service.

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Paged data endpoint of the public service
pub const DEFAULT_ENDPOINT: &str = "https://api.coronavirus.data.gov.uk/v1/data";

/// Release timestamp endpoint of the public service
pub const DEFAULT_TIMESTAMP_ENDPOINT: &str = "https://api.coronavirus.data.gov.uk/v1/timestamp";

// ============================================================================
// API Config
// ============================================================================

/// Endpoints and HTTP settings used by [`DashboardApi`](crate::DashboardApi)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Paged data endpoint (GET, HEAD, OPTIONS)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Release timestamp endpoint (GET)
    #[serde(default = "default_timestamp_endpoint")]
    pub timestamp_endpoint: String,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timestamp_endpoint() -> String {
    DEFAULT_TIMESTAMP_ENDPOINT.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timestamp_endpoint: default_timestamp_endpoint(),
            http: HttpConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Load a configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load a configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Set the data endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the release timestamp endpoint
    #[must_use]
    pub fn with_timestamp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.timestamp_endpoint = endpoint.into();
        self
    }

    /// Set the request timeout, rounded up to whole seconds
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let partial = u64::from(timeout.subsec_nanos() > 0);
        self.http.timeout_seconds = timeout.as_secs().saturating_add(partial);
        self
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.http.headers.insert(key.into(), value.into());
        self
    }

    /// Check that both endpoints are absolute URLs
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("endpoint", &self.endpoint),
            ("timestamp_endpoint", &self.timestamp_endpoint),
        ] {
            Url::parse(value)
                .map_err(|e| Error::config(format!("Invalid {name} '{value}': {e}")))?;
        }

        if self.http.timeout_seconds == 0 {
            return Err(Error::config("http.timeout_seconds must be greater than 0"));
        }

        Ok(())
    }

    /// HTTP client configuration derived from these settings
    pub fn client_config(&self) -> HttpClientConfig {
        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.http.timeout_seconds));

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.http.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent, defaults to the crate name and version
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
