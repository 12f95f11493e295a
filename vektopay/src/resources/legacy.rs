//! Legacy charge and transaction operations.
//!
//! Charges and transactions predate the payments API. These operations keep their
//! shapes for existing integrations but are served entirely by the payment routes:
//! `/v1/charges` and `/v1/transactions` are never contacted. New code should call
//! the payment operations directly.

use tracing::instrument;

use crate::{
    client::Client,
    error::Result,
    models::{Charge, ChargeInput, ChargeStatus, Transaction, TransactionInput},
    poll::{CHARGE_TERMINAL_STATES, PollPolicy, poll_until_terminal},
    transport::Transport,
};

impl<T: Transport> Client<T> {
    /// Creates a credit card charge as a payment.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Client::create_payment`].
    #[instrument(skip_all, fields(customer_id = %input.customer_id))]
    pub async fn create_charge(&self, input: ChargeInput) -> Result<Charge> {
        let payment = self.create_payment(&input.into_payment_input()).await?;
        Ok(Charge::from(payment))
    }

    /// Creates a tokenized transaction as a payment.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Client::create_payment`].
    #[instrument(skip_all, fields(customer_id = %input.customer_id))]
    pub async fn create_transaction(&self, input: TransactionInput) -> Result<Transaction> {
        let payment = self.create_payment(&input.into_payment_input()).await?;
        Ok(Transaction::from(payment))
    }

    /// Fetches the status of a charge from the payment status route.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Client::get_payment_status`].
    #[instrument(skip(self))]
    pub async fn get_charge_status(&self, charge_id: &str) -> Result<ChargeStatus> {
        self.get_payment_status(charge_id).await.map(ChargeStatus::from)
    }

    /// Polls a charge until it is `PAID` or `FAILED`.
    ///
    /// A `CANCELED` charge is not terminal here and keeps being polled until the
    /// deadline.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::PollTimeout`](crate::VektopayError::PollTimeout) when
    /// `policy.timeout` passes first, or the first error of a status fetch.
    #[instrument(skip(self))]
    pub async fn poll_charge_status(
        &self,
        charge_id: &str,
        policy: &PollPolicy,
    ) -> Result<ChargeStatus> {
        poll_until_terminal(charge_id, CHARGE_TERMINAL_STATES, policy, |id| {
            self.get_charge_status(id)
        })
        .await
    }
}
