use std::{collections::HashMap, sync::Arc};

use flipkit_engine::exchange_objects::ExchangeRate;
use log::*;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{major_to_kobo, RateSource};

#[derive(Debug, Clone, Error)]
pub enum RateApiError {
    #[error("Error communicating with the rate provider. {0}")]
    ResponseError(String),
    #[error("Could not deserialize the rate provider response. {0}")]
    JsonError(String),
    #[error("The rate provider did not include an NGN rate")]
    MissingRate,
}

/// Client for the free exchangerate-api.com JSON feed.
#[derive(Clone)]
pub struct RateApi {
    base_url: String,
    client: Arc<Client>,
}

impl RateApi {
    pub fn new(base_url: String) -> Self {
        Self { base_url, client: Arc::new(Client::new()) }
    }
}

impl RateSource for RateApi {
    async fn fetch_usd_rate(&self) -> Result<ExchangeRate, RateApiError> {
        let url = format!("{}/v4/latest/USD", self.base_url);
        trace!("🔌️ Fetching USD rates from {url}");
        let response = self.client.get(url).send().await.map_err(|e| RateApiError::ResponseError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(RateApiError::ResponseError(format!("Rate provider returned {}", response.status())));
        }
        let body = response.json::<RatesResponse>().await.map_err(|e| RateApiError::JsonError(e.to_string()))?;
        let ngn = body.rates.get("NGN").copied().ok_or(RateApiError::MissingRate)?;
        let rate = ExchangeRate::new("USD".to_string(), major_to_kobo(ngn), None);
        debug!("🔌️ Current rate: {rate}");
        Ok(rate)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}
