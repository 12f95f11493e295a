//! Error types for the Vektopay client.
//!
//! Every fallible operation in this crate returns [`Result<T>`], whose error type is
//! [`VektopayError`]. The variants separate failures that happen before anything is
//! sent (configuration, input), failures of the exchange itself (transport), and
//! failures reported or produced by the remote service (status codes, bodies).
//!
//! # Error Categories
//!
//! - **Local** ([`VektopayError::Configuration`], [`VektopayError::InvalidInput`],
//!   [`VektopayError::Encode`]): raised before any network call
//! - **Network** ([`VektopayError::Transport`]): connection, timeout and DNS failures
//! - **Remote** ([`VektopayError::RequestFailed`], [`VektopayError::Decode`]): the
//!   service answered, but with a failure status or an unexpected body
//! - **Polling** ([`VektopayError::PollTimeout`]): no terminal status before the deadline
//!
//! # Examples
//!
//! ```
//! use vektopay::error::{Result, VektopayError};
//!
//! fn require_token(token: Option<&str>) -> Result<&str> {
//!     token.ok_or_else(|| VektopayError::Configuration("bearer_token_required".to_owned()))
//! }
//!
//! assert!(require_token(None).is_err());
//! ```

use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, VektopayError>;

/// Errors that can occur while talking to the Vektopay API.
///
/// No variant is retried internally. [`VektopayError::is_retryable`] tells callers
/// which failures are worth resubmitting with their own policy.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum VektopayError {
    /// A required credential or configuration value is missing or invalid.
    ///
    /// Raised before any request is sent, for example when a customer operation
    /// needs a bearer token and none was configured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The HTTP exchange itself failed.
    ///
    /// Wraps [`reqwest::Error`]: connection refused, DNS failure, TLS errors or the
    /// request timeout (30 seconds by default). The source error is preserved.
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a status code of 300 or above.
    ///
    /// `payload` holds the response body when it decodes as a JSON object. A body
    /// that is absent or malformed leaves it `None` and never changes the variant.
    #[error("request_failed_{status}")]
    RequestFailed {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error body returned by the service, if it was a JSON object.
        payload: Option<Map<String, Value>>,
    },

    /// Status polling reached its deadline before a terminal status was observed.
    #[error("poll_timeout: {resource_id} not terminal after {elapsed:?}")]
    PollTimeout {
        /// Identifier of the polled resource.
        resource_id: String,
        /// Time spent polling when the deadline check failed.
        elapsed: Duration,
    },

    /// A successful response body could not be decoded into the expected shape.
    ///
    /// This points at a schema mismatch between the client and the service and is
    /// never folded into [`VektopayError::RequestFailed`].
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Caller input was rejected before sending, such as an empty resource id.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl VektopayError {
    /// Returns the HTTP status code for [`VektopayError::RequestFailed`].
    ///
    /// # Examples
    ///
    /// ```
    /// use vektopay::VektopayError;
    ///
    /// let err = VektopayError::RequestFailed { status: 402, payload: None };
    /// assert_eq!(err.status_code(), Some(402));
    /// assert_eq!(VektopayError::InvalidInput("x".to_owned()).status_code(), None);
    /// ```
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Determines whether resubmitting the same request might succeed.
    ///
    /// Returns `true` for transport timeouts and connection failures, `429 Too Many
    /// Requests` and `5xx` responses. Everything else points at the request or the
    /// configuration and will fail again unchanged. Creation requests should only be
    /// resubmitted with the same idempotency key.
    #[must_use]
    #[allow(
        clippy::match_same_arms,
        reason = "separate arms keep local and remote failures apart"
    )]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RequestFailed { status, .. } => *status == 429 || (500..600).contains(status),
            Self::Configuration(_) | Self::InvalidInput(_) | Self::Encode(_) => false,
            Self::Decode(_) => false,
            Self::PollTimeout { .. } => false,
        }
    }
}
