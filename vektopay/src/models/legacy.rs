//! Legacy charge and transaction records.
//!
//! Charges and transactions are older names for payments. Their inputs convert into
//! a [`PaymentInput`] and their outputs are narrowed views of a [`Payment`] or
//! [`PaymentStatus`].

use serde::{Deserialize, Serialize};

use super::{
    Challenge, IdempotencyKey, Payment, PaymentInput, PaymentItemInput, PaymentMethodInput,
    PaymentState, PaymentStatus,
};

/// Payment method type every charge is created with.
pub const CHARGE_METHOD_TYPE: &str = "credit_card";

/// Input of the legacy create-charge operation.
#[derive(Debug, Clone, Default)]
pub struct ChargeInput {
    /// Paying customer.
    pub customer_id: String,
    /// Stored card to charge.
    pub card_id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Number of installments.
    pub installments: Option<u32>,
    /// Forwarded to the payment creation request.
    pub idempotency_key: Option<IdempotencyKey>,
}

impl ChargeInput {
    /// Builds the payment creation request this charge stands for.
    #[must_use]
    pub fn into_payment_input(self) -> PaymentInput {
        PaymentInput::from(self)
    }
}

impl From<ChargeInput> for PaymentInput {
    fn from(input: ChargeInput) -> Self {
        Self {
            customer_id: Some(input.customer_id),
            amount: Some(input.amount),
            currency: Some(input.currency),
            payment_method: PaymentMethodInput {
                method_type: CHARGE_METHOD_TYPE.to_owned(),
                card_id: Some(input.card_id),
                token: None,
                installments: input.installments,
            },
            idempotency_key: input.idempotency_key,
            ..Self::default()
        }
    }
}

/// Legacy view of a created payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    /// Payment identifier.
    pub id: String,
    /// Coarse status.
    pub status: PaymentState,
    /// Pending verification step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Challenge>,
}

impl From<Payment> for Charge {
    fn from(payment: Payment) -> Self {
        Self { id: payment.payment_id, status: payment.status, challenge: payment.challenge }
    }
}

/// Legacy view of a payment status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeStatus {
    /// Payment identifier.
    pub id: String,
    /// Coarse status.
    pub status: PaymentState,
}

impl From<PaymentStatus> for ChargeStatus {
    fn from(status: PaymentStatus) -> Self {
        Self { id: status.id, status: status.status }
    }
}

/// Line item of a legacy transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionItemInput {
    /// Price identifier.
    pub price_id: String,
    /// Quantity of the price.
    pub quantity: u32,
}

/// Payment method of a legacy transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPaymentMethod {
    /// Payment method type.
    #[serde(rename = "type")]
    pub method_type: String,
    /// Tokenized payment credential.
    pub token: String,
    /// Number of installments.
    pub installments: u32,
}

/// Input of the legacy create-transaction operation.
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    /// Paying customer.
    pub customer_id: String,
    /// Priced line items.
    pub items: Vec<TransactionItemInput>,
    /// Coupon to apply.
    pub coupon_code: Option<String>,
    /// Funding method.
    pub payment_method: TransactionPaymentMethod,
    /// Forwarded to the payment creation request.
    pub idempotency_key: Option<IdempotencyKey>,
}

impl TransactionInput {
    /// Builds the payment creation request this transaction stands for.
    #[must_use]
    pub fn into_payment_input(self) -> PaymentInput {
        PaymentInput::from(self)
    }
}

impl From<TransactionInput> for PaymentInput {
    fn from(input: TransactionInput) -> Self {
        Self {
            customer_id: Some(input.customer_id),
            items: input
                .items
                .into_iter()
                .map(|item| PaymentItemInput { price_id: item.price_id, quantity: item.quantity })
                .collect(),
            coupon_code: input.coupon_code,
            payment_method: PaymentMethodInput {
                method_type: input.payment_method.method_type,
                card_id: None,
                token: Some(input.payment_method.token),
                installments: Some(input.payment_method.installments),
            },
            idempotency_key: input.idempotency_key,
            ..Self::default()
        }
    }
}

/// Legacy view of a created payment with amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Payment identifier.
    pub id: String,
    /// Coarse status.
    pub status: PaymentState,
    /// Fine-grained status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    /// Amount in minor currency units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// ISO 4217 currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl From<Payment> for Transaction {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.payment_id,
            status: payment.status,
            payment_status: payment.payment_status,
            amount: payment.amount,
            currency: payment.currency,
        }
    }
}
