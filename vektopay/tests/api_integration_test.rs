//! Integration tests against a local HTTP server.
//!
//! Exercises the real reqwest transport end to end: headers on the wire, response
//! classification, and the legacy operations' use of the payment routes.

use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use vektopay::{
    Client, ClientConfig, VektopayError,
    models::{
        ChargeInput, CheckoutSessionInput, CustomerListParams, CustomerUpdateInput,
        IdempotencyKey, PaymentInput, PaymentMethodInput, PaymentState,
    },
    poll::PollPolicy,
};

fn config(server: &mockito::ServerGuard) -> ClientConfig {
    ClientConfig::new("sk_integration", format!("{}/", server.url()))
        .with_bearer_token("tok_integration")
}

fn client(server: &mockito::ServerGuard) -> Client {
    Client::with_config(config(server)).expect("valid config")
}

#[tokio::test]
async fn test_create_payment_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/payments")
        .match_header("x-api-key", "sk_integration")
        .match_header("idempotency-key", "order-1")
        .match_header("content-type", "application/json")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({
            "amount": 2500,
            "currency": "BRL",
            "payment_method": { "type": "credit_card", "card_id": "card_1" }
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"payment_id":"pay_1","status":"CREATED","challenge":{"type":"3ds"}}"#)
        .expect(1)
        .create_async()
        .await;

    let input = PaymentInput {
        amount: Some(2500),
        currency: Some("BRL".to_owned()),
        payment_method: PaymentMethodInput::credit_card("card_1"),
        idempotency_key: Some(IdempotencyKey::new("order-1")),
        ..PaymentInput::default()
    };
    let payment = client(&server).create_payment(&input).await.expect("payment created");

    assert_eq!(payment.payment_id, "pay_1");
    assert_eq!(payment.status, PaymentState::Created);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_failure_status_wins_over_success_like_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/payments/pay_1/status")
        .with_status(402)
        .with_body(r#"{"id":"pay_1","status":"PAID"}"#)
        .create_async()
        .await;

    let result = client(&server).get_payment_status("pay_1").await;

    match result {
        Err(VektopayError::RequestFailed { status, payload }) => {
            assert_eq!(status, 402);
            assert_eq!(payload.expect("JSON object payload")["status"], "PAID");
        }
        other => panic!("expected request failure, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_redirect_is_not_followed() {
    let mut server = mockito::Server::new_async().await;
    let redirect = server
        .mock("GET", "/v1/payments/pay_1/status")
        .with_status(302)
        .with_header("location", "/elsewhere")
        .expect(1)
        .create_async()
        .await;
    let target = server
        .mock("GET", "/elsewhere")
        .with_status(200)
        .with_body(r#"{"id":"pay_1","status":"PAID"}"#)
        .expect(0)
        .create_async()
        .await;

    let result = client(&server).get_payment_status("pay_1").await;

    assert!(
        matches!(result, Err(VektopayError::RequestFailed { status: 302, payload: None })),
        "unexpected result: {result:?}"
    );
    redirect.assert_async().await;
    target.assert_async().await;
}

#[tokio::test]
async fn test_non_json_error_body_has_no_payload() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/payments/pay_1/status")
        .with_status(500)
        .with_body("<html>Internal Server Error</html>")
        .create_async()
        .await;

    let error = client(&server).get_payment_status("pay_1").await.unwrap_err();

    assert!(matches!(error, VektopayError::RequestFailed { status: 500, payload: None }));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_unexpected_success_shape_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/customers/cus_1")
        .with_status(200)
        .with_body(r#"{"unrelated":true}"#)
        .create_async()
        .await;

    let result = client(&server).get_customer("cus_1").await;

    assert!(matches!(result, Err(VektopayError::Decode(_))));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = Client::with_config(ClientConfig::new("sk", "http://127.0.0.1:1")).unwrap();

    let error = client.get_payment_status("pay_1").await.unwrap_err();

    assert!(matches!(error, VektopayError::Transport(_)));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_delete_customer_no_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/v1/customers/cus_1")
        .match_header("authorization", "Bearer tok_integration")
        .match_header("x-api-key", Matcher::Missing)
        .match_header("content-type", Matcher::Missing)
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    client(&server).delete_customer("cus_1").await.expect("customer deleted");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_customer_sends_only_email() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/v1/customers/cus_1")
        .match_header("authorization", "Bearer tok_integration")
        .match_body(Matcher::JsonString(r#"{"email":"new@example.com"}"#.to_owned()))
        .with_status(200)
        .with_body(r#"{"id":"cus_1","merchant_id":"m1","email":"new@example.com"}"#)
        .expect(1)
        .create_async()
        .await;

    let update = CustomerUpdateInput { email: Some("new@example.com".to_owned()), ..Default::default() };
    let customer = client(&server).update_customer("cus_1", &update).await.expect("updated");

    assert_eq!(customer.email.as_deref(), Some("new@example.com"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_customers_query_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/customers?merchant_id=m+1&limit=10&offset=20")
        .with_status(200)
        .with_body(r#"[{"id":"cus_1","merchant_id":"m 1"},{"id":"cus_2","merchant_id":"m 1"}]"#)
        .expect(1)
        .create_async()
        .await;

    let params = CustomerListParams { merchant_id: Some("m 1".to_owned()), limit: Some(10), offset: Some(20) };
    let customers = client(&server).list_customers(&params).await.expect("listed");

    assert_eq!(customers.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_bearer_token_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;

    let client = Client::with_config(ClientConfig::new("sk", server.url())).unwrap();
    let error = client.get_customer("cus_1").await.unwrap_err();

    assert!(matches!(error, VektopayError::Configuration(ref msg) if msg == "bearer_token_required"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_default_header_overrides_api_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/checkout-sessions")
        .match_header("x-api-key", "sk_override")
        .match_header("x-client-name", "storefront")
        .with_status(201)
        .with_body(r#"{"id":"cs_1","token":"tok_cs","expires_at":1735689600}"#)
        .expect(1)
        .create_async()
        .await;

    let config = config(&server)
        .with_default_header("X-API-KEY", "sk_override")
        .with_default_header("x-client-name", "storefront");
    let client = Client::with_config(config).unwrap();
    let input = CheckoutSessionInput {
        customer_id: "c1".to_owned(),
        amount: 100,
        currency: "BRL".to_owned(),
        ..CheckoutSessionInput::default()
    };

    let session = client.create_checkout_session(&input).await.expect("session created");

    let expires_at = session.expires_at.and_then(|e| e.as_datetime()).expect("numeric expiry");
    assert_eq!(expires_at.timestamp(), 1_735_689_600);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_charge_uses_payment_route() {
    let mut server = mockito::Server::new_async().await;
    let payments = server
        .mock("POST", "/v1/payments")
        .match_body(Matcher::PartialJson(json!({
            "payment_method": { "type": "credit_card", "card_id": "card_1", "installments": 3 }
        })))
        .with_status(201)
        .with_body(r#"{"payment_id":"pay_5","status":"PROCESSING"}"#)
        .expect(1)
        .create_async()
        .await;
    let charges = server.mock("POST", "/v1/charges").expect(0).create_async().await;

    let input = ChargeInput {
        customer_id: "c1".to_owned(),
        card_id: "card_1".to_owned(),
        amount: 900,
        currency: "BRL".to_owned(),
        installments: Some(3),
        idempotency_key: None,
    };
    let charge = client(&server).create_charge(input).await.expect("charge created");

    assert_eq!(charge.id, "pay_5");
    payments.assert_async().await;
    charges.assert_async().await;
}

#[tokio::test]
async fn test_poll_payment_status_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/payments/pay_1/status")
        .with_status(200)
        .with_body(r#"{"id":"pay_1","status":"FAILED","payment_status":"declined"}"#)
        .expect(1)
        .create_async()
        .await;

    let policy = PollPolicy::new(Duration::from_millis(10), Duration::from_secs(5));
    let status = client(&server).poll_payment_status("pay_1", &policy).await.expect("terminal");

    assert_eq!(status.status, PaymentState::Failed);
    assert_eq!(status.payment_status.as_deref(), Some("declined"));
    mock.assert_async().await;
}
