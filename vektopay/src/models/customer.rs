//! Customer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Identifier assigned by the service.
    pub id: String,
    /// Owning merchant.
    pub merchant_id: String,
    /// Caller-side identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Document type, such as `cpf` or `cnpj`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// Document number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_number: Option<String>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /v1/customers`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerCreateInput {
    /// Owning merchant.
    pub merchant_id: String,
    /// Caller-side identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Document type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// Document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_number: Option<String>,
}

/// Body of `PUT /v1/customers/{id}`.
///
/// Only fields set to `Some` are sent. `Some(String::new())` sends an empty string,
/// which is not the same as leaving the field out.
///
/// # Examples
///
/// ```
/// use vektopay::models::CustomerUpdateInput;
///
/// let update = CustomerUpdateInput { email: Some("new@example.com".to_owned()), ..Default::default() };
/// assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"email":"new@example.com"}"#);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerUpdateInput {
    /// Owning merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    /// Caller-side identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Document type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// Document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_number: Option<String>,
}

impl CustomerUpdateInput {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.merchant_id.is_none()
            && self.external_id.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.doc_type.is_none()
            && self.doc_number.is_none()
    }
}

/// Filters for `GET /v1/customers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerListParams {
    /// Restrict to one merchant.
    pub merchant_id: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Number of records to skip.
    pub offset: Option<u32>,
}

impl CustomerListParams {
    /// Returns the query pairs in wire order, skipping absent and empty values.
    ///
    /// # Examples
    ///
    /// ```
    /// use vektopay::models::CustomerListParams;
    ///
    /// let params = CustomerListParams { merchant_id: Some(String::new()), limit: Some(20), offset: None };
    /// assert_eq!(params.query_pairs(), vec![("limit", "20".to_owned())]);
    /// ```
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("merchant_id", self.merchant_id.clone()),
            ("limit", self.limit.map(|v| v.to_string())),
            ("offset", self.offset.map(|v| v.to_string())),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
        .collect()
    }
}
