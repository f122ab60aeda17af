use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use flipkit_engine::{db_types::Vendor, VendorApi};
use serde_json::json;

use super::{helpers::{get_request, post_request}, mocks::MockVendorStore};
use crate::routes::{AddVendorRoute, VendorByIdRoute, VendorsRoute};

#[actix_web::test]
async fn list_all_vendors() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/vendors", configure_list).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("[{VENDOR_JSON}]"));
}

#[actix_web::test]
async fn category_filter_is_passed_through() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/vendors?product=clothing", configure_filter).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("[{VENDOR_JSON}]"));
}

#[actix_web::test]
async fn unknown_vendor_is_a_404() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/vendors/vnd_missing", configure_missing).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("vnd_missing"), "unexpected body: {body}");
}

#[actix_web::test]
async fn add_vendor_returns_the_stored_record() {
    let _ = env_logger::try_init().ok();
    let body = json!({"name": "Thrift Hub", "category": "clothing"});
    let (status, body) = post_request(&body, "/vendors", configure_add).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, VENDOR_JSON);
}

#[actix_web::test]
async fn add_vendor_requires_a_name() {
    let _ = env_logger::try_init().ok();
    let body = json!({"name": "  "});
    let (status, _) = post_request(&body, "/vendors", configure_untouched).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn configure_list(cfg: &mut ServiceConfig) {
    let mut store = MockVendorStore::new();
    store.expect_fetch_vendors().returning(|| Ok(vec![vendor()]));
    register(cfg, store);
}

fn configure_filter(cfg: &mut ServiceConfig) {
    let mut store = MockVendorStore::new();
    store.expect_fetch_vendors_by_category().withf(|c| c == "clothing").returning(|_| Ok(vec![vendor()]));
    register(cfg, store);
}

fn configure_missing(cfg: &mut ServiceConfig) {
    let mut store = MockVendorStore::new();
    store.expect_fetch_vendor_by_id().returning(|_| Ok(None));
    register(cfg, store);
}

fn configure_add(cfg: &mut ServiceConfig) {
    let mut store = MockVendorStore::new();
    store.expect_insert_vendor().withf(|v| v.name == "Thrift Hub").returning(|_| Ok(vendor()));
    register(cfg, store);
}

fn configure_untouched(cfg: &mut ServiceConfig) {
    register(cfg, MockVendorStore::new());
}

fn register(cfg: &mut ServiceConfig, store: MockVendorStore) {
    cfg.service(VendorByIdRoute::<MockVendorStore>::new())
        .service(VendorsRoute::<MockVendorStore>::new())
        .service(AddVendorRoute::<MockVendorStore>::new())
        .app_data(web::Data::new(VendorApi::new(store)));
}

fn vendor() -> Vendor {
    Vendor {
        id: "vnd_1".to_string(),
        name: "Thrift Hub".to_string(),
        contact: None,
        picture: None,
        category: Some("clothing".to_string()),
        avg_price: None,
        ratings: Some("4.5".to_string()),
        res_time: None,
        tot_prod: None,
        url: None,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

const VENDOR_JSON: &str = r#"{"id":"vnd_1","name":"Thrift Hub","contact":null,"picture":null,"category":"clothing","avg_price":null,"ratings":"4.5","res_time":null,"tot_prod":null,"url":null,"created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"}"#;
