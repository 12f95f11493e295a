//! Payment records.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use super::IdempotencyKey;

/// Out-of-band verification step (for example 3-D Secure) returned with a payment.
pub type Challenge = BTreeMap<String, String>;

/// Coarse payment status.
///
/// Known values parse case-insensitively and serialize in uppercase. Anything else
/// is kept verbatim in [`PaymentState::Other`].
///
/// # Examples
///
/// ```
/// use vektopay::models::PaymentState;
///
/// assert_eq!(PaymentState::from("paid"), PaymentState::Paid);
/// assert_eq!(PaymentState::Paid.as_str(), "PAID");
/// assert_eq!(PaymentState::from("ON_HOLD"), PaymentState::Other("ON_HOLD".to_owned()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentState {
    /// Payment created, nothing attempted yet.
    Created,
    /// Payment being processed.
    Processing,
    /// Payment settled.
    Paid,
    /// Payment declined or errored.
    Failed,
    /// Payment canceled.
    Canceled,
    /// Status not known to this client version.
    Other(String),
}

impl PaymentState {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "CREATED",
            Self::Processing => "PROCESSING",
            Self::Paid => "PAID",
            Self::Failed => "FAILED",
            Self::Canceled => "CANCELED",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for PaymentState {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "CREATED" => Self::Created,
            "PROCESSING" => Self::Processing,
            "PAID" => Self::Paid,
            "FAILED" => Self::Failed,
            "CANCELED" => Self::Canceled,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for PaymentState {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl From<PaymentState> for String {
    fn from(state: PaymentState) -> Self {
        match state {
            PaymentState::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line item of a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentItemInput {
    /// Price identifier.
    pub price_id: String,
    /// Quantity of the price.
    pub quantity: u32,
}

/// How the payment is funded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodInput {
    /// Payment method type, such as `credit_card` or `pix`.
    #[serde(rename = "type")]
    pub method_type: String,
    /// Stored card identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    /// Tokenized payment credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Number of installments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
}

impl PaymentMethodInput {
    /// Creates a `credit_card` method charging a stored card.
    #[must_use]
    pub fn credit_card(card_id: impl Into<String>) -> Self {
        Self { method_type: "credit_card".to_owned(), card_id: Some(card_id.into()), ..Self::default() }
    }

    /// Creates a method of the given type funded by a token.
    #[must_use]
    pub fn tokenized(method_type: impl Into<String>, token: impl Into<String>) -> Self {
        Self { method_type: method_type.into(), token: Some(token.into()), ..Self::default() }
    }
}

/// Body of `POST /v1/payments`.
///
/// Absent optional fields and an empty item list are omitted from the body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentInput {
    /// Paying customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Amount in minor currency units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Priced line items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<PaymentItemInput>,
    /// Coupon to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    /// Subscription the payment belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    /// Funding method.
    pub payment_method: PaymentMethodInput,
    /// Sent as the `idempotency-key` header.
    #[serde(skip)]
    pub idempotency_key: Option<IdempotencyKey>,
}

/// Response of `POST /v1/payments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Identifier assigned by the service.
    pub payment_id: String,
    /// Coarse status.
    pub status: PaymentState,
    /// Fine-grained status reported by the acquirer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    /// Pending verification step, if the payer must complete one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Challenge>,
    /// Amount in minor currency units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// ISO 4217 currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Subscription the payment belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
}

/// Response of `GET /v1/payments/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatus {
    /// Payment identifier.
    #[serde(alias = "payment_id")]
    pub id: String,
    /// Coarse status.
    pub status: PaymentState,
    /// Fine-grained status reported by the acquirer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_payment_state_parse_known() {
        assert_eq!(PaymentState::from("CREATED"), PaymentState::Created);
        assert_eq!(PaymentState::from("processing"), PaymentState::Processing);
        assert_eq!(PaymentState::from("Paid"), PaymentState::Paid);
        assert_eq!(PaymentState::from("FAILED"), PaymentState::Failed);
        assert_eq!(PaymentState::from("canceled"), PaymentState::Canceled);
    }

    #[test]
    fn test_payment_state_unknown_kept_verbatim() {
        let state = PaymentState::from("awaiting_3ds");
        assert_eq!(state, PaymentState::Other("awaiting_3ds".to_owned()));
        assert_eq!(String::from(state), "awaiting_3ds");
    }

    #[test]
    fn test_payment_state_serde() {
        let state: PaymentState = serde_json::from_value(json!("paid")).unwrap();
        assert_eq!(state, PaymentState::Paid);
        assert_eq!(serde_json::to_value(&state).unwrap(), json!("PAID"));
    }

    #[test]
    fn test_payment_input_omits_absent_fields() {
        let input = PaymentInput {
            amount: Some(1000),
            payment_method: PaymentMethodInput::credit_card("card1"),
            idempotency_key: Some(IdempotencyKey::new("idem-1")),
            ..PaymentInput::default()
        };

        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(
            body,
            json!({
                "amount": 1000,
                "payment_method": { "type": "credit_card", "card_id": "card1" }
            })
        );
    }

    #[test]
    fn test_payment_input_full_body() {
        let input = PaymentInput {
            customer_id: Some("c1".to_owned()),
            amount: Some(2500),
            currency: Some("BRL".to_owned()),
            items: vec![PaymentItemInput { price_id: "price_1".to_owned(), quantity: 2 }],
            coupon_code: Some("WELCOME".to_owned()),
            subscription_id: Some("sub_1".to_owned()),
            payment_method: PaymentMethodInput {
                installments: Some(3),
                ..PaymentMethodInput::tokenized("credit_card", "tok_1")
            },
            idempotency_key: None,
        };

        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(
            body,
            json!({
                "customer_id": "c1",
                "amount": 2500,
                "currency": "BRL",
                "items": [{ "price_id": "price_1", "quantity": 2 }],
                "coupon_code": "WELCOME",
                "subscription_id": "sub_1",
                "payment_method": { "type": "credit_card", "token": "tok_1", "installments": 3 }
            })
        );
    }

    #[test]
    fn test_payment_decodes_minimal_response() {
        let payment: Payment =
            serde_json::from_value(json!({ "payment_id": "pay_1", "status": "PROCESSING" }))
                .unwrap();
        assert_eq!(payment.payment_id, "pay_1");
        assert_eq!(payment.status, PaymentState::Processing);
        assert!(payment.challenge.is_none());
        assert!(payment.amount.is_none());
    }

    #[test]
    fn test_payment_decodes_challenge() {
        let payment: Payment = serde_json::from_value(json!({
            "payment_id": "pay_1",
            "status": "CREATED",
            "challenge": { "type": "3ds", "url": "https://acs.example.com/c/1" },
            "amount": 1000,
            "currency": "BRL"
        }))
        .unwrap();

        let challenge = payment.challenge.unwrap();
        assert_eq!(challenge["type"], "3ds");
        assert_eq!(challenge["url"], "https://acs.example.com/c/1");
        assert_eq!(payment.amount, Some(1000));
    }

    #[test]
    fn test_payment_status_accepts_both_id_names() {
        let a: PaymentStatus =
            serde_json::from_value(json!({ "id": "pay_1", "status": "PAID" })).unwrap();
        let b: PaymentStatus =
            serde_json::from_value(json!({ "payment_id": "pay_1", "status": "PAID" })).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_payment_status_missing_status_fails() {
        let result = serde_json::from_value::<PaymentStatus>(json!({ "id": "pay_1" }));
        assert!(result.is_err());
    }
}
