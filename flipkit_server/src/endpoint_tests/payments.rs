use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use fk_common::Kobo;
use flipkit_engine::{
    db_types::{Order, PaymentRef, PaymentStatus, VerifiedPayment},
    traits::OrderApiError,
    OrderFlowApi,
};
use mockall::Sequence;
use serde_json::json;

use super::{
    helpers::post_request,
    mocks::{MockGateway, MockOrderStore},
};
use crate::{integrations::PaystackApiError, routes::PaystackVerifyRoute};

#[actix_web::test]
async fn verify_creates_paid_order() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "ref_123", "email": "a@b.com", "amount": 5000});
    let (status, body) = post_request(&body, "/paystack/verify", configure_new_order).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, VERIFY_JSON);
}

#[actix_web::test]
async fn verify_duplicate_returns_stored_order() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "ref_123", "email": "a@b.com", "amount": 5000});
    let (status, body) = post_request(&body, "/paystack/verify", configure_duplicate).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, VERIFY_JSON);
}

#[actix_web::test]
async fn verify_email_mismatch_is_rejected() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "ref_123", "email": "mallory@evil.com", "amount": 5000});
    let (status, body) = post_request(&body, "/paystack/verify", configure_no_writes).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("does not match"), "unexpected body: {body}");
}

#[actix_web::test]
async fn verify_amount_mismatch_is_rejected() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "ref_123", "email": "a@b.com", "amount": 4999});
    let (status, body) = post_request(&body, "/paystack/verify", configure_no_writes).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Amount mismatch"), "unexpected body: {body}");
}

#[actix_web::test]
async fn verify_declined_transaction() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "ref_123", "email": "a@b.com", "amount": 5000});
    let (status, body) = post_request(&body, "/paystack/verify", configure_declined).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("declined"), "unexpected body: {body}");
}

#[actix_web::test]
async fn verify_unreachable_gateway_is_a_502() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "ref_123", "email": "a@b.com", "amount": 5000});
    let (status, _) = post_request(&body, "/paystack/verify", configure_unreachable).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

// Two verifications race for the same reference: this caller loses the insert, re-reads, and settles against the
// surviving row. The response is the stored order, not an error.
#[actix_web::test]
async fn verify_losing_an_insert_race_returns_the_surviving_order() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "ref_123", "email": "a@b.com", "amount": 5000});
    let (status, body) = post_request(&body, "/paystack/verify", configure_lost_race).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, VERIFY_JSON);
}

// Same race, but the surviving row is still pending (the rival was a checkout-start, not a verification). The
// loser falls through to marking it paid.
#[actix_web::test]
async fn verify_losing_a_race_to_a_pending_order_marks_it_paid() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "ref_123", "email": "a@b.com", "amount": 5000});
    let (status, body) =
        post_request(&body, "/paystack/verify", configure_lost_race_pending).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, VERIFY_JSON);
}

#[actix_web::test]
async fn verify_rejects_empty_reference_before_any_outbound_call() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "  ", "email": "a@b.com", "amount": 5000});
    let (status, _) = post_request(&body, "/paystack/verify", configure_untouched).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json!({"reference": "ref_123", "email": "a@b.com", "amount": 0});
    let (status, _) = post_request(&body, "/paystack/verify", configure_untouched).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn register(cfg: &mut ServiceConfig, orders: MockOrderStore, gateway: MockGateway) {
    cfg.service(PaystackVerifyRoute::<MockOrderStore, MockGateway>::new())
        .app_data(web::Data::new(OrderFlowApi::new(orders)))
        .app_data(web::Data::new(gateway));
}

fn configure_new_order(cfg: &mut ServiceConfig) {
    let mut orders = MockOrderStore::new();
    orders.expect_fetch_order_by_reference().returning(|_| Ok(None));
    orders
        .expect_insert_paid_order()
        .withf(|order, payment| order.email == "a@b.com" && payment.amount == Kobo::from(5000))
        .returning(|_, _| Ok(paid_order()));
    let mut gateway = MockGateway::new();
    gateway.expect_verify_transaction().returning(|_| Ok(verified_payment()));
    register(cfg, orders, gateway);
}

fn configure_duplicate(cfg: &mut ServiceConfig) {
    let mut orders = MockOrderStore::new();
    orders.expect_fetch_order_by_reference().returning(|_| Ok(Some(paid_order())));
    let mut gateway = MockGateway::new();
    gateway.expect_verify_transaction().returning(|_| Ok(verified_payment()));
    register(cfg, orders, gateway);
}

// The gateway responds, but the claim does not match it. Any write to the order store fails the test.
fn configure_no_writes(cfg: &mut ServiceConfig) {
    let orders = MockOrderStore::new();
    let mut gateway = MockGateway::new();
    gateway.expect_verify_transaction().returning(|_| Ok(verified_payment()));
    register(cfg, orders, gateway);
}

fn configure_declined(cfg: &mut ServiceConfig) {
    let orders = MockOrderStore::new();
    let mut gateway = MockGateway::new();
    gateway
        .expect_verify_transaction()
        .returning(|_| Err(PaystackApiError::Declined("Transaction status is 'failed'".to_string())));
    register(cfg, orders, gateway);
}

fn configure_unreachable(cfg: &mut ServiceConfig) {
    let orders = MockOrderStore::new();
    let mut gateway = MockGateway::new();
    gateway
        .expect_verify_transaction()
        .returning(|_| Err(PaystackApiError::ResponseError("connection refused".to_string())));
    register(cfg, orders, gateway);
}

fn configure_lost_race(cfg: &mut ServiceConfig) {
    let mut seq = Sequence::new();
    let mut orders = MockOrderStore::new();
    orders.expect_fetch_order_by_reference().times(1).in_sequence(&mut seq).returning(|_| Ok(None));
    orders
        .expect_insert_paid_order()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|order, _| Err(OrderApiError::OrderAlreadyExists(order.payment_reference)));
    orders.expect_fetch_order_by_reference().times(1).in_sequence(&mut seq).returning(|_| Ok(Some(paid_order())));
    let mut gateway = MockGateway::new();
    gateway.expect_verify_transaction().returning(|_| Ok(verified_payment()));
    register(cfg, orders, gateway);
}

fn configure_lost_race_pending(cfg: &mut ServiceConfig) {
    let mut seq = Sequence::new();
    let mut orders = MockOrderStore::new();
    orders.expect_fetch_order_by_reference().times(1).in_sequence(&mut seq).returning(|_| Ok(None));
    orders
        .expect_insert_paid_order()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|order, _| Err(OrderApiError::OrderAlreadyExists(order.payment_reference)));
    orders.expect_fetch_order_by_reference().times(1).in_sequence(&mut seq).returning(|_| Ok(Some(pending_order())));
    orders
        .expect_mark_order_paid()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|reference, _| reference.as_str() == "ref_123")
        .returning(|_, _| Ok(paid_order()));
    let mut gateway = MockGateway::new();
    gateway.expect_verify_transaction().returning(|_| Ok(verified_payment()));
    register(cfg, orders, gateway);
}

// Neither the gateway nor the store may be touched at all.
fn configure_untouched(cfg: &mut ServiceConfig) {
    register(cfg, MockOrderStore::new(), MockGateway::new());
}

fn verified_payment() -> VerifiedPayment {
    VerifiedPayment {
        reference: PaymentRef("ref_123".into()),
        email: "a@b.com".to_string(),
        amount: Kobo::from(5000),
        gateway_response: Some("Approved".to_string()),
        paid_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn pending_order() -> Order {
    Order { payment_status: PaymentStatus::Pending, gateway_response: None, paid_at: None, ..paid_order() }
}

fn paid_order() -> Order {
    Order {
        id: 1,
        email: "a@b.com".to_string(),
        username: None,
        amount: Kobo::from(5000),
        currency: "NGN".to_string(),
        payment_reference: PaymentRef("ref_123".into()),
        payment_status: PaymentStatus::Paid,
        gateway_response: Some("Approved".to_string()),
        paid_at: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
        metadata: None,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

const VERIFY_JSON: &str = r#"{"success":true,"message":"Payment verified","reference":"ref_123","order":{"id":1,"email":"a@b.com","username":null,"amount":5000,"currency":"NGN","payment_reference":"ref_123","payment_status":"PAID","gateway_response":"Approved","paid_at":"2025-01-01T00:00:00Z","metadata":null,"created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"}}"#;
