//! Checkout session records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /v1/checkout-sessions`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckoutSessionInput {
    /// Paying customer.
    pub customer_id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Price being sold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
    /// Quantity of the price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Session lifetime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<u64>,
    /// Redirect after a completed payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
    /// Redirect after the payer gives up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

/// Expiration marker of a checkout session.
///
/// The service has sent both an ISO-8601 string and other JSON shapes for this field,
/// so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpiresAt {
    /// ISO-8601 / RFC 3339 timestamp string.
    Timestamp(String),
    /// Any other JSON value.
    Other(Value),
}

impl ExpiresAt {
    /// Interprets the marker as a point in time.
    ///
    /// Strings are parsed as RFC 3339, integers as Unix seconds. Anything else
    /// yields `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vektopay::models::ExpiresAt;
    ///
    /// let at = ExpiresAt::Timestamp("2025-01-01T00:00:00Z".to_owned());
    /// assert_eq!(at.as_datetime().unwrap().timestamp(), 1_735_689_600);
    ///
    /// let at = ExpiresAt::Other(serde_json::json!(1_735_689_600));
    /// assert_eq!(at.as_datetime().unwrap().timestamp(), 1_735_689_600);
    /// ```
    #[must_use]
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(raw) => {
                DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc))
            }
            Self::Other(value) => value.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        }
    }
}

/// Response of `POST /v1/checkout-sessions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Identifier assigned by the service.
    pub id: String,
    /// Opaque token handed to the hosted checkout.
    pub token: String,
    /// When the session stops accepting payments, if bounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<ExpiresAt>,
}
