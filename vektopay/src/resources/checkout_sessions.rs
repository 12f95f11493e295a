//! Checkout session operations.

use reqwest::Method;
use tracing::instrument;

use crate::{
    client::Client,
    dispatch::AuthMode,
    error::Result,
    models::{CheckoutSession, CheckoutSessionInput},
    transport::Transport,
};

const CHECKOUT_SESSIONS_PATH: &str = "/v1/checkout-sessions";

impl<T: Transport> Client<T> {
    /// Creates a hosted checkout session.
    ///
    /// # Errors
    ///
    /// Returns any dispatch error; see [`Dispatcher::dispatch`](crate::dispatch::Dispatcher::dispatch).
    #[instrument(skip_all, fields(customer_id = %input.customer_id))]
    pub async fn create_checkout_session(
        &self,
        input: &CheckoutSessionInput,
    ) -> Result<CheckoutSession> {
        let session: CheckoutSession = self
            .dispatcher
            .dispatch(Method::POST, CHECKOUT_SESSIONS_PATH, Some(input), AuthMode::ApiKey, None)
            .await?;

        tracing::info!(session_id = %session.id, "Checkout session created");
        Ok(session)
    }
}
