//! Customer operations.
//!
//! Every customer operation authenticates with the bearer token. Without one they
//! fail with [`VektopayError::Configuration`](crate::VektopayError::Configuration)
//! before anything is sent.

use reqwest::Method;
use tracing::instrument;

use super::id_segment;
use crate::{
    client::Client,
    dispatch::{AuthMode, build_path_with_query},
    error::Result,
    models::{Customer, CustomerCreateInput, CustomerListParams, CustomerUpdateInput},
    transport::Transport,
};

const CUSTOMERS_PATH: &str = "/v1/customers";

fn customer_path(customer_id: &str) -> Result<String> {
    Ok(format!("{CUSTOMERS_PATH}/{}", id_segment("customer", customer_id)?))
}

impl<T: Transport> Client<T> {
    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns any dispatch error; see [`Dispatcher::dispatch`](crate::dispatch::Dispatcher::dispatch).
    #[instrument(skip_all, fields(merchant_id = %input.merchant_id))]
    pub async fn create_customer(&self, input: &CustomerCreateInput) -> Result<Customer> {
        let customer: Customer = self
            .dispatcher
            .dispatch(Method::POST, CUSTOMERS_PATH, Some(input), AuthMode::Bearer, None)
            .await?;

        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Lists customers.
    ///
    /// Filters are sent as `merchant_id`, `limit` and `offset`, in that order,
    /// omitting absent or empty values.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use vektopay::{Client, ClientConfig, models::CustomerListParams};
    ///
    /// # async fn example() -> vektopay::Result<()> {
    /// let config = ClientConfig::new("sk_test", "https://api.vektopay.com").with_bearer_token("tok");
    /// let client = Client::with_config(config)?;
    ///
    /// let params = CustomerListParams { merchant_id: Some("m1".to_owned()), limit: Some(50), offset: None };
    /// for customer in client.list_customers(&params).await? {
    ///     println!("{} {:?}", customer.id, customer.email);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns any dispatch error; see [`Dispatcher::dispatch`](crate::dispatch::Dispatcher::dispatch).
    #[instrument(skip(self))]
    pub async fn list_customers(&self, params: &CustomerListParams) -> Result<Vec<Customer>> {
        let path = build_path_with_query(CUSTOMERS_PATH, &params.query_pairs());
        self.dispatcher.dispatch::<(), _>(Method::GET, &path, None, AuthMode::Bearer, None).await
    }

    /// Fetches a customer.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::InvalidInput`](crate::VektopayError::InvalidInput) for
    /// an empty id, otherwise any dispatch error.
    #[instrument(skip(self))]
    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer> {
        let path = customer_path(customer_id)?;
        self.dispatcher.dispatch::<(), _>(Method::GET, &path, None, AuthMode::Bearer, None).await
    }

    /// Updates a customer, sending only the fields set in `input`.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::InvalidInput`](crate::VektopayError::InvalidInput) for
    /// an empty id, otherwise any dispatch error.
    #[instrument(skip(self, input))]
    pub async fn update_customer(
        &self,
        customer_id: &str,
        input: &CustomerUpdateInput,
    ) -> Result<Customer> {
        let path = customer_path(customer_id)?;
        if input.is_empty() {
            tracing::debug!("Customer update carries no fields");
        }
        self.dispatcher.dispatch(Method::PUT, &path, Some(input), AuthMode::Bearer, None).await
    }

    /// Deletes a customer.
    ///
    /// The response body, if any, is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`VektopayError::InvalidInput`](crate::VektopayError::InvalidInput) for
    /// an empty id, otherwise any dispatch error except a decode failure.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, customer_id: &str) -> Result<()> {
        let path = customer_path(customer_id)?;
        self.dispatcher.dispatch_no_content(Method::DELETE, &path, AuthMode::Bearer).await?;
        tracing::info!(customer_id, "Customer deleted");
        Ok(())
    }
}
