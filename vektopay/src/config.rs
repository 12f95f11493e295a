//! Client configuration.
//!
//! [`ClientConfig`] is an immutable value handed to [`Client`](crate::Client) once at
//! construction. It can be assembled in code, deserialized from TOML, or read from
//! `VEKTOPAY_*` environment variables.
//!
//! # Examples
//!
//! ```toml
//! api_key = "sk_test_123"
//! base_url = "https://api.vektopay.com/"
//! bearer_token = "eyJhbGciOi..."
//! timeout_secs = 30
//!
//! [default_headers]
//! x-client-name = "checkout-service"
//! ```

use std::{collections::BTreeMap, fmt, path::Path, time::Duration};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use url::Url;

use crate::error::{Result, VektopayError};

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "VEKTOPAY_API_KEY";
/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "VEKTOPAY_BASE_URL";
/// Environment variable holding the optional bearer token.
pub const ENV_BEARER_TOKEN: &str = "VEKTOPAY_BEARER_TOKEN";
/// Environment variable holding the optional request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "VEKTOPAY_TIMEOUT_SECS";

/// Connection and credential settings for a [`Client`](crate::Client).
///
/// Credentials are redacted from the `Debug` output.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Static API key sent in the `x-api-key` header.
    pub api_key: String,

    /// API base URL. Trailing slashes are trimmed when the client is built.
    pub base_url: String,

    /// Bearer token for customer operations.
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Headers added to every request after the mandatory ones.
    ///
    /// A default header with the same name as a mandatory header replaces it.
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum idle pooled connections per host.
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[REDACTED]"))
            .field("default_headers", &self.default_headers.keys().collect::<Vec<_>>())
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("pool_max_idle_per_host", &self.pool_max_idle_per_host)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration with an API key, a base URL and default timeouts.
    ///
    /// # Examples
    ///
    /// ```
    /// use vektopay::ClientConfig;
    ///
    /// let config = ClientConfig::new("sk_test", "https://api.vektopay.com//");
    /// assert_eq!(config.trimmed_base_url(), "https://api.vektopay.com");
    /// assert_eq!(config.timeout_secs, 30);
    /// ```
    #[must_use]
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            bearer_token: None,
            default_headers: BTreeMap::new(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            pool_max_idle_per_host: default_pool_max_idle(),
        }
    }

    /// Sets the bearer token used by customer operations.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Sets the request timeout, rounded up to whole seconds.
    ///
    /// `500ms` becomes one second; `Duration::ZERO` stays zero and fails
    /// [`validate`](Self::validate).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs =
            timeout.as_secs().saturating_add(u64::from(timeout.subsec_nanos() > 0));
        self
    }

    /// Parses a configuration from TOML and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::Configuration`] if the TOML is malformed or a value
    /// fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| VektopayError::Configuration(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::Configuration`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| VektopayError::Configuration(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Builds a configuration from `VEKTOPAY_*` environment variables.
    ///
    /// `VEKTOPAY_API_KEY` and `VEKTOPAY_BASE_URL` are required;
    /// `VEKTOPAY_BEARER_TOKEN` and `VEKTOPAY_TIMEOUT_SECS` are optional.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::Configuration`] if a required variable is unset or a
    /// value fails validation.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::Configuration`] if a required variable is missing or
    /// a value fails validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| VektopayError::Configuration(format!("{name} is not set")))
        };

        let mut config = Self::new(required(ENV_API_KEY)?, required(ENV_BASE_URL)?);
        config.bearer_token = lookup(ENV_BEARER_TOKEN).filter(|v| !v.is_empty());
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.parse().map_err(|e| {
                VektopayError::Configuration(format!("{ENV_TIMEOUT_SECS} is not a number: {e}"))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validates credentials, the base URL, timeouts and default headers.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::Configuration`] describing the first invalid value:
    /// - `api_key` must be non-empty and usable as a header value
    /// - `base_url` must be an absolute `http` or `https` URL with a host
    /// - `timeout_secs` must be 1-300, `connect_timeout_secs` 1-60
    /// - default header names and values must be valid HTTP header tokens
    ///
    /// # Examples
    ///
    /// ```
    /// use vektopay::ClientConfig;
    ///
    /// assert!(ClientConfig::new("sk", "https://api.vektopay.com").validate().is_ok());
    /// assert!(ClientConfig::new("", "https://api.vektopay.com").validate().is_err());
    /// assert!(ClientConfig::new("sk", "not a url").validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(VektopayError::Configuration("api_key cannot be empty".to_owned()));
        }
        parse_header_value("api_key", &self.api_key)?;
        if let Some(token) = &self.bearer_token {
            parse_header_value("bearer_token", token)?;
        }

        self.validate_base_url()?;

        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(VektopayError::Configuration(
                "timeout_secs must be between 1 and 300".to_owned(),
            ));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(VektopayError::Configuration(
                "connect_timeout_secs must be between 1 and 60".to_owned(),
            ));
        }

        self.default_header_map().map(|_| ())
    }

    fn validate_base_url(&self) -> Result<()> {
        let url = Url::parse(self.trimmed_base_url()).map_err(|e| {
            VektopayError::Configuration(format!("invalid base_url '{}': {e}", self.base_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(VektopayError::Configuration(format!(
                "base_url must use http or https, got: {}",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(VektopayError::Configuration(format!(
                "base_url has no host: {}",
                self.base_url
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(VektopayError::Configuration(format!(
                "base_url must not carry a query or fragment: {}",
                self.base_url
            )));
        }

        Ok(())
    }

    /// Returns the base URL with every trailing slash removed.
    #[must_use]
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Returns the bearer token, treating an empty token as absent.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Parses the default headers into a [`HeaderMap`].
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::Configuration`] for an invalid header name or value.
    pub fn default_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(self.default_headers.len());
        for (name, value) in &self.default_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                VektopayError::Configuration(format!("invalid default header name '{name}': {e}"))
            })?;
            headers.insert(header_name, parse_header_value(name, value)?);
        }
        Ok(headers)
    }

    /// Returns the request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the connection timeout as a [`Duration`].
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Parses a header value, rejecting control characters such as CR and LF.
pub(crate) fn parse_header_value(context: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        VektopayError::Configuration(format!("{context} contains characters not allowed in a header"))
    })
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_pool_max_idle() -> usize {
    10
}
