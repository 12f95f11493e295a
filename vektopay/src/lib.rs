//! Vektopay: async client for the Vektopay payments API
//!
//! A Rust library for creating payments, tracking their status, managing customers
//! and opening hosted checkout sessions against the Vektopay HTTP API. The service
//! owns every business rule; this crate builds requests, authenticates them and
//! classifies the responses.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      Client                          │
//! │  payments · customers · checkout sessions · legacy   │
//! └───────────┬───────────────────────────┬──────────────┘
//!             │                           │ poll_until_terminal
//! ┌───────────▼──────────────┐  ┌─────────▼────────────┐
//! │  Dispatcher              │◄─┤  Status poller       │
//! │  headers, auth, classify │  │  interval + deadline │
//! └───────────┬──────────────┘  └──────────────────────┘
//!             │ one exchange per call
//! ┌───────────▼──────────────┐
//! │  Transport (reqwest)     │
//! └──────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## 1. Create a Payment and Wait for It
//!
//! ```rust,no_run
//! use vektopay::{
//!     Client, ClientConfig,
//!     models::{IdempotencyKey, PaymentInput, PaymentItemInput, PaymentMethodInput},
//!     poll::PollPolicy,
//! };
//!
//! # async fn example() -> vektopay::Result<()> {
//! let client = Client::with_config(ClientConfig::new("sk_test", "https://api.vektopay.com"))?;
//!
//! let payment = client
//!     .create_payment(&PaymentInput {
//!         customer_id: Some("cus_1".to_owned()),
//!         items: vec![PaymentItemInput { price_id: "price_1".to_owned(), quantity: 1 }],
//!         payment_method: PaymentMethodInput::tokenized("credit_card", "tok_abc"),
//!         idempotency_key: Some(IdempotencyKey::generate()),
//!         ..PaymentInput::default()
//!     })
//!     .await?;
//!
//! let status = client.poll_payment_status(&payment.payment_id, &PollPolicy::default()).await?;
//! println!("{} ended as {}", status.id, status.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Manage Customers
//!
//! Customer routes use a bearer token instead of the API key.
//!
//! ```rust,no_run
//! use vektopay::{Client, ClientConfig, models::CustomerUpdateInput};
//!
//! # async fn example() -> vektopay::Result<()> {
//! let config = ClientConfig::new("sk_test", "https://api.vektopay.com")
//!     .with_bearer_token("merchant-session-token");
//! let client = Client::with_config(config)?;
//!
//! let update = CustomerUpdateInput { email: Some("new@example.com".to_owned()), ..Default::default() };
//! let customer = client.update_customer("cus_1", &update).await?;
//! println!("{:?}", customer.email);
//! # Ok(())
//! # }
//! ```
//!
//! ## 3. Load Configuration
//!
//! ```rust
//! use vektopay::ClientConfig;
//!
//! # fn example() -> vektopay::Result<()> {
//! let config = ClientConfig::from_toml(
//!     r#"
//!     api_key = "sk_test"
//!     base_url = "https://api.vektopay.com/"
//!     timeout_secs = 15
//!
//!     [default_headers]
//!     x-client-name = "storefront"
//!     "#,
//! )?;
//!
//! assert_eq!(config.trimmed_base_url(), "https://api.vektopay.com");
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: the [`Client`] entry point
//! - [`resources`]: typed operations, one module per remote resource
//! - [`models`]: request and response records
//! - [`dispatch`]: header assembly and response classification
//! - [`poll`]: status polling with an interval and a deadline
//! - [`transport`]: the HTTP exchange behind a substitutable trait
//! - [`config`]: client configuration from code, TOML or environment
//! - [`error`]: the error type shared by every operation
//!
//! # Error Handling
//!
//! All operations return [`Result<T, VektopayError>`](error::Result). Nothing is
//! retried internally:
//!
//! ```rust,no_run
//! use vektopay::{Client, ClientConfig, VektopayError};
//!
//! # async fn example(client: Client) {
//! match client.get_payment_status("pay_1").await {
//!     Ok(status) => println!("{}", status.status),
//!     Err(VektopayError::RequestFailed { status, payload }) => {
//!         eprintln!("service answered {status}: {payload:?}");
//!     }
//!     Err(e) if e.is_retryable() => eprintln!("transient failure: {e}"),
//!     Err(e) => eprintln!("error: {e}"),
//! }
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod poll;
pub mod resources;
pub mod transport;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{Result, VektopayError};
