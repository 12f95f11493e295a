//! HTTP transport implementation using reqwest.

use reqwest::{Client, redirect};
use tracing::instrument;

use crate::{
    config::ClientConfig,
    error::{Result, VektopayError},
    transport::{Transport, TransportRequest, TransportResponse},
};

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// Connection pooling and keep-alive come from the wrapped [`reqwest::Client`], so a
/// single transport should be shared across calls.
///
/// # Examples
///
/// ```
/// use vektopay::{ClientConfig, transport::HttpTransport};
///
/// let config = ClientConfig::new("sk_test", "https://api.vektopay.com");
/// let transport = HttpTransport::with_config(&config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the timeouts and pool size from `config`.
    ///
    /// Redirects are not followed: a 3xx reaches the dispatcher as a failure status
    /// and headers are never replayed to the `location` target.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::Transport`] if the HTTP client cannot be built.
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(VektopayError::Transport)?;

        Ok(Self { client })
    }

    /// Wraps an existing reqwest client, for callers that share one across libraries.
    ///
    /// The client's own redirect policy applies. Build it with
    /// [`Policy::none`](redirect::Policy::none) to keep 3xx responses as failures.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self.client.request(request.method, &request.url).headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(VektopayError::Transport)?.to_vec();

        Ok(TransportResponse { status, body })
    }

    fn protocol_name(&self) -> &'static str {
        "http"
    }
}
