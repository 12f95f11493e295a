//! Payment operations.

use reqwest::Method;
use tracing::instrument;

use super::id_segment;
use crate::{
    client::Client,
    dispatch::AuthMode,
    error::Result,
    models::{Payment, PaymentInput, PaymentStatus},
    poll::{PAYMENT_TERMINAL_STATES, PollPolicy, poll_until_terminal},
    transport::Transport,
};

const PAYMENTS_PATH: &str = "/v1/payments";

impl<T: Transport> Client<T> {
    /// Creates a payment.
    ///
    /// Sends `POST /v1/payments` with the API key. The input's idempotency key, if
    /// any, travels in the `idempotency-key` header.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use vektopay::{
    ///     Client, ClientConfig,
    ///     models::{IdempotencyKey, PaymentInput, PaymentMethodInput},
    /// };
    ///
    /// # async fn example() -> vektopay::Result<()> {
    /// let client = Client::with_config(ClientConfig::new("sk_test", "https://api.vektopay.com"))?;
    ///
    /// let input = PaymentInput {
    ///     customer_id: Some("cus_1".to_owned()),
    ///     amount: Some(4990),
    ///     currency: Some("BRL".to_owned()),
    ///     payment_method: PaymentMethodInput::credit_card("card_1"),
    ///     idempotency_key: Some(IdempotencyKey::generate()),
    ///     ..PaymentInput::default()
    /// };
    ///
    /// let payment = client.create_payment(&input).await?;
    /// if let Some(challenge) = &payment.challenge {
    ///     println!("payer must complete {challenge:?}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns any dispatch error; see [`Dispatcher::dispatch`](crate::dispatch::Dispatcher::dispatch).
    #[instrument(skip_all, fields(customer_id = input.customer_id.as_deref()))]
    pub async fn create_payment(&self, input: &PaymentInput) -> Result<Payment> {
        let payment: Payment = self
            .dispatcher
            .dispatch(
                Method::POST,
                PAYMENTS_PATH,
                Some(input),
                AuthMode::ApiKey,
                input.idempotency_key.as_ref(),
            )
            .await?;

        tracing::info!(payment_id = %payment.payment_id, status = %payment.status, "Payment created");
        Ok(payment)
    }

    /// Fetches the current status of a payment.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::InvalidInput`](crate::VektopayError::InvalidInput) for
    /// an empty id, otherwise any dispatch error.
    #[instrument(skip(self))]
    pub async fn get_payment_status(&self, payment_id: &str) -> Result<PaymentStatus> {
        let path = format!("{PAYMENTS_PATH}/{}/status", id_segment("payment", payment_id)?);
        self.dispatcher.dispatch::<(), _>(Method::GET, &path, None, AuthMode::ApiKey, None).await
    }

    /// Polls a payment until it is `PAID`, `FAILED` or `CANCELED`.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::PollTimeout`](crate::VektopayError::PollTimeout) when
    /// `policy.timeout` passes first, or the first error of a status fetch.
    #[instrument(skip(self))]
    pub async fn poll_payment_status(
        &self,
        payment_id: &str,
        policy: &PollPolicy,
    ) -> Result<PaymentStatus> {
        poll_until_terminal(payment_id, PAYMENT_TERMINAL_STATES, policy, |id| {
            self.get_payment_status(id)
        })
        .await
    }
}
