//! Transport abstraction.
//!
//! The [`Transport`] trait is the seam between request dispatch and the network. A
//! transport performs exactly one HTTP exchange per [`Transport::send`] call and
//! reports what came back without interpreting it: status classification, body
//! decoding and authentication all live in [`dispatch`](crate::dispatch).
//!
//! [`HttpTransport`] is the production implementation on top of `reqwest`. Tests can
//! substitute their own implementation to observe or script exchanges.
//!
//! # Examples
//!
//! ```rust,no_run
//! use reqwest::{Method, header::HeaderMap};
//! use vektopay::{
//!     ClientConfig,
//!     transport::{HttpTransport, Transport, TransportRequest},
//! };
//!
//! # async fn example() -> vektopay::error::Result<()> {
//! let config = ClientConfig::new("sk_test", "https://api.vektopay.com");
//! let transport = HttpTransport::with_config(&config)?;
//!
//! let request = TransportRequest {
//!     method: Method::GET,
//!     url: "https://api.vektopay.com/v1/payments/pay_1/status".to_owned(),
//!     headers: HeaderMap::new(),
//!     body: None,
//! };
//!
//! let response = transport.send(request).await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use reqwest::{Method, header::HeaderMap};

use crate::error::Result;

pub mod http;

pub use http::HttpTransport;

/// A fully assembled request, ready to be sent.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including any query string.
    pub url: String,
    /// Complete header set, already merged.
    pub headers: HeaderMap,
    /// Serialized request body, if any.
    pub body: Option<Vec<u8>>,
}

/// Raw response from a transport exchange.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns `true` for status codes in `[100, 300)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vektopay::transport::TransportResponse;
    ///
    /// let ok = TransportResponse { status: 204, body: vec![] };
    /// assert!(ok.is_success());
    ///
    /// let redirect = TransportResponse { status: 302, body: vec![] };
    /// assert!(!redirect.is_success());
    /// ```
    #[must_use]
    pub fn is_success(&self) -> bool {
        (100..300).contains(&self.status)
    }
}

/// One HTTP exchange per call, no retries, no interpretation of the status.
///
/// # Errors
///
/// Implementations return [`VektopayError::Transport`](crate::VektopayError::Transport)
/// when the exchange itself fails (connection, DNS, TLS, timeout). A response with
/// any status code, including 4xx and 5xx, is a successful exchange.
pub trait Transport: Send + Sync {
    /// Sends a request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns error if the request could not be sent or the body could not be read.
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + '_;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}
