//! Request and response records for the Vektopay API.
//!
//! Records are plain data: inputs serialize to request bodies with absent optional
//! fields omitted, outputs deserialize from response bodies. Nothing here talks to
//! the network.

pub mod checkout;
pub mod customer;
pub mod legacy;
pub mod payment;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use checkout::{CheckoutSession, CheckoutSessionInput, ExpiresAt};
pub use customer::{Customer, CustomerCreateInput, CustomerListParams, CustomerUpdateInput};
pub use legacy::{
    Charge, ChargeInput, ChargeStatus, Transaction, TransactionInput, TransactionItemInput,
    TransactionPaymentMethod,
};
pub use payment::{
    Challenge, Payment, PaymentInput, PaymentItemInput, PaymentMethodInput, PaymentState,
    PaymentStatus,
};

/// Client-supplied token that lets the service deduplicate retried creation requests.
///
/// Sent in the `idempotency-key` header, never in the body.
///
/// # Examples
///
/// ```
/// use vektopay::models::IdempotencyKey;
///
/// let fixed = IdempotencyKey::new("order-42-attempt");
/// assert_eq!(fixed.as_str(), "order-42-attempt");
///
/// let generated = IdempotencyKey::generate();
/// assert_eq!(generated.as_str().len(), 36);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Wraps a caller-chosen key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generates a random UUID v4 key.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IdempotencyKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for IdempotencyKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_are_unique() {
        let a = IdempotencyKey::generate();
        let b = IdempotencyKey::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_idempotency_key_display() {
        let key = IdempotencyKey::from("abc-123");
        assert_eq!(key.to_string(), "abc-123");
    }

    #[test]
    fn test_idempotency_key_serializes_as_string() {
        let key = IdempotencyKey::from("abc".to_owned());
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"abc\"");
    }
}
