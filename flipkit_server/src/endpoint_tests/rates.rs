use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use fk_common::Kobo;
use flipkit_engine::{exchange_objects::ExchangeRate, traits::ExchangeRateError, ExchangeRateApi};

use super::{
    helpers::get_request,
    mocks::{MockRateFeed, MockRateStore},
};
use crate::{integrations::RateApiError, routes::ExchangeRateRoute};

#[actix_web::test]
async fn rates_are_fetched_and_persisted() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/rates", configure_live_feed).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, RATE_JSON);
}

#[actix_web::test]
async fn stored_rate_is_served_when_the_feed_is_down() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/rates", configure_fallback).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, RATE_JSON);
}

#[actix_web::test]
async fn no_rate_anywhere_is_a_404() {
    let _ = env_logger::try_init().ok();
    let (status, _) = get_request("", "/rates", configure_empty).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn configure_live_feed(cfg: &mut ServiceConfig) {
    let mut feed = MockRateFeed::new();
    feed.expect_fetch_usd_rate().returning(|| Ok(usd_rate()));
    let mut store = MockRateStore::new();
    store.expect_set_exchange_rate().withf(|r| r.rate == Kobo::from(152_375)).returning(|_| Ok(()));
    register(cfg, store, feed);
}

fn configure_fallback(cfg: &mut ServiceConfig) {
    let mut feed = MockRateFeed::new();
    feed.expect_fetch_usd_rate().returning(|| Err(RateApiError::ResponseError("connection refused".to_string())));
    let mut store = MockRateStore::new();
    store.expect_fetch_last_rate().withf(|c| c == "USD").returning(|_| Ok(usd_rate()));
    register(cfg, store, feed);
}

fn configure_empty(cfg: &mut ServiceConfig) {
    let mut feed = MockRateFeed::new();
    feed.expect_fetch_usd_rate().returning(|| Err(RateApiError::MissingRate));
    let mut store = MockRateStore::new();
    store.expect_fetch_last_rate().returning(|c: &str| Err(ExchangeRateError::RateDoesNotExist(c.to_string())));
    register(cfg, store, feed);
}

fn register(cfg: &mut ServiceConfig, store: MockRateStore, feed: MockRateFeed) {
    cfg.service(ExchangeRateRoute::<MockRateStore, MockRateFeed>::new())
        .app_data(web::Data::new(ExchangeRateApi::new(store)))
        .app_data(web::Data::new(feed));
}

fn usd_rate() -> ExchangeRate {
    ExchangeRate::new("USD".to_string(), Kobo::from(152_375), Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()))
}

const RATE_JSON: &str = r#"{"base_currency":"USD","rate":152375,"updated_at":"2025-01-01T00:00:00Z"}"#;
