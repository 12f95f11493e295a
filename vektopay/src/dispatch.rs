//! Request dispatch.
//!
//! [`Dispatcher`] turns a verb, a path, an optional body and an authentication mode
//! into exactly one [`Transport`] exchange and classifies what came back:
//!
//! - status in `[100, 300)`: the body is decoded into the requested type
//! - status `>= 300`: [`VektopayError::RequestFailed`] with the body as payload when
//!   it is a JSON object
//! - exchange failure: [`VektopayError::Transport`]
//!
//! Headers are assembled in a fixed order: `content-type` (only with a body), the
//! credential for the [`AuthMode`], `idempotency-key`, then the configured default
//! headers. Later headers replace earlier ones with the same name.

use std::fmt;

use reqwest::{
    Method,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::instrument;
use url::form_urlencoded;

use crate::{
    config::{ClientConfig, parse_header_value},
    error::{Result, VektopayError},
    models::IdempotencyKey,
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Header carrying the merchant API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the idempotency key of a creation request.
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Credential attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// `x-api-key: <api key>`.
    ApiKey,
    /// `authorization: Bearer <token>`.
    Bearer,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey => f.write_str("api_key"),
            Self::Bearer => f.write_str("bearer"),
        }
    }
}

/// Sends requests through a [`Transport`] and classifies the responses.
///
/// Holds only immutable state, so a single dispatcher can serve concurrent calls.
pub struct Dispatcher<T> {
    base_url: String,
    api_key: HeaderValue,
    bearer: Option<HeaderValue>,
    default_headers: HeaderMap,
    transport: T,
}

impl<T> fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("bearer", &self.bearer.as_ref().map(|_| "[REDACTED]"))
            .field("default_headers", &self.default_headers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Dispatcher<T> {
    /// Creates a dispatcher from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::Configuration`] if the configuration is invalid.
    pub fn new(config: &ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;

        let mut api_key = parse_header_value("api_key", &config.api_key)?;
        api_key.set_sensitive(true);

        let bearer = config
            .bearer_token()
            .map(|token| {
                let mut value = parse_header_value("bearer_token", &format!("Bearer {token}"))?;
                value.set_sensitive(true);
                Ok::<_, VektopayError>(value)
            })
            .transpose()?;

        Ok(Self {
            base_url: config.trimmed_base_url().to_owned(),
            api_key,
            bearer,
            default_headers: config.default_header_map()?,
            transport,
        })
    }

    /// Returns the base URL without trailing slashes.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a request and decodes a successful response body into `O`.
    ///
    /// # Errors
    ///
    /// - [`VektopayError::Configuration`] for [`AuthMode::Bearer`] without a token,
    ///   before anything is sent
    /// - [`VektopayError::Encode`] if `body` cannot be serialized
    /// - [`VektopayError::Transport`] if the exchange fails
    /// - [`VektopayError::RequestFailed`] for a status of 300 or above
    /// - [`VektopayError::Decode`] if a successful body does not match `O`
    #[instrument(skip_all, fields(method = %method, path = %path, auth = %auth))]
    pub async fn dispatch<B, O>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: AuthMode,
        idempotency_key: Option<&IdempotencyKey>,
    ) -> Result<O>
    where
        B: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let response = self.execute(method, path, body, auth, idempotency_key).await?;
        serde_json::from_slice(&response.body).map_err(|e| {
            tracing::warn!(status = response.status, error = %e, "Response body did not decode");
            VektopayError::Decode(e)
        })
    }

    /// Sends a request whose successful response carries no meaningful body.
    ///
    /// Used for `DELETE`. The body of a successful response is never decoded.
    ///
    /// # Errors
    ///
    /// Same as [`Dispatcher::dispatch`], except [`VektopayError::Decode`].
    #[instrument(skip_all, fields(method = %method, path = %path, auth = %auth))]
    pub async fn dispatch_no_content(&self, method: Method, path: &str, auth: AuthMode) -> Result<()> {
        self.execute::<()>(method, path, None, auth, None).await.map(|_| ())
    }

    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: AuthMode,
        idempotency_key: Option<&IdempotencyKey>,
    ) -> Result<TransportResponse>
    where
        B: Serialize + Sync + ?Sized,
    {
        let headers = self.build_headers(body.is_some(), auth, idempotency_key)?;
        let body = body.map(serde_json::to_vec).transpose().map_err(VektopayError::Encode)?;

        let request =
            TransportRequest { method, url: format!("{}{path}", self.base_url), headers, body };

        let response = self.transport.send(request).await.inspect_err(|e| {
            tracing::warn!(
                protocol = self.transport.protocol_name(),
                error = %e,
                "Transport exchange failed"
            );
        })?;

        if response.is_success() {
            tracing::debug!(status = response.status, "Request succeeded");
            return Ok(response);
        }

        tracing::warn!(status = response.status, "Request failed");
        Err(VektopayError::RequestFailed {
            status: response.status,
            payload: failure_payload(&response.body),
        })
    }

    fn build_headers(
        &self,
        has_body: bool,
        auth: AuthMode,
        idempotency_key: Option<&IdempotencyKey>,
    ) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        match auth {
            AuthMode::ApiKey => {
                headers.insert(API_KEY_HEADER, self.api_key.clone());
            }
            AuthMode::Bearer => {
                let token = self.bearer.clone().ok_or_else(|| {
                    VektopayError::Configuration("bearer_token_required".to_owned())
                })?;
                headers.insert(AUTHORIZATION, token);
            }
        }

        if let Some(key) = idempotency_key {
            let value = HeaderValue::from_str(key.as_str()).map_err(|_| {
                VektopayError::InvalidInput("idempotency key is not a valid header value".to_owned())
            })?;
            headers.insert(IDEMPOTENCY_KEY_HEADER, value);
        }

        for (name, value) in &self.default_headers {
            headers.insert(name.clone(), value.clone());
        }

        Ok(headers)
    }
}

/// Decodes a failure body as a JSON object, if it is one.
fn failure_payload(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Appends a form-url-encoded query string to `path`.
///
/// Pairs are kept in the given order. Returns `path` unchanged when `params` is
/// empty, so no dangling `?` is produced.
///
/// # Examples
///
/// ```
/// use vektopay::dispatch::build_path_with_query;
///
/// let path = build_path_with_query("/v1/customers", &[("merchant_id", "m 1&2".to_owned())]);
/// assert_eq!(path, "/v1/customers?merchant_id=m+1%262");
///
/// assert_eq!(build_path_with_query("/v1/customers", &[]), "/v1/customers");
/// ```
#[must_use]
pub fn build_path_with_query(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_owned();
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();

    format!("{path}?{query}")
}

/// Percent-encodes a single path segment so it cannot add segments, a query or a
/// fragment.
///
/// # Examples
///
/// ```
/// use vektopay::dispatch::encode_path_segment;
///
/// assert_eq!(encode_path_segment("cus_123"), "cus_123");
/// assert_eq!(encode_path_segment("a/b?c#d e"), "a%2Fb%3Fc%23d%20e");
/// ```
#[must_use]
pub fn encode_path_segment(segment: &str) -> String {
    // form encoding writes spaces as '+' and a literal '+' as %2B
    form_urlencoded::byte_serialize(segment.as_bytes()).collect::<String>().replace('+', "%20")
}
