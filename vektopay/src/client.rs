//! Vektopay API client.
//!
//! [`Client`] owns a [`Dispatcher`] and exposes one method per remote operation. The
//! operations themselves live in [`resources`](crate::resources), grouped by the
//! resource they touch.

use crate::{
    config::ClientConfig,
    dispatch::Dispatcher,
    error::Result,
    transport::{HttpTransport, Transport},
};

/// Client for the Vektopay payments API.
///
/// Holds immutable configuration and a pooled transport. It is `Send + Sync` when
/// the transport is, so one client can be shared across tasks by reference or
/// through an `Arc`.
///
/// # Examples
///
/// ```rust,no_run
/// use vektopay::{Client, ClientConfig};
///
/// # async fn example() -> vektopay::Result<()> {
/// let config = ClientConfig::new("sk_live_xxx", "https://api.vektopay.com")
///     .with_bearer_token("merchant-session-token");
/// let client = Client::with_config(config)?;
///
/// let status = client.get_payment_status("pay_123").await?;
/// println!("{}: {}", status.id, status.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    pub(crate) dispatcher: Dispatcher<T>,
}

impl Client<HttpTransport> {
    /// Creates a client that talks HTTP with the timeouts from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::Configuration`](crate::VektopayError::Configuration)
    /// if `config` is invalid, or [`VektopayError::Transport`](crate::VektopayError::Transport)
    /// if the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(&config)?;
        Self::with_transport(config, transport)
    }

    /// Creates a client from `VEKTOPAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::Configuration`](crate::VektopayError::Configuration)
    /// if a required variable is missing or a value is invalid.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client on top of a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::Configuration`](crate::VektopayError::Configuration)
    /// if `config` is invalid.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let dispatcher = Dispatcher::new(&config, transport)?;
        tracing::debug!(base_url = dispatcher.base_url(), "Vektopay client created");
        Ok(Self { dispatcher })
    }

    /// Returns the dispatcher, for requests not covered by a typed operation.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }
}
