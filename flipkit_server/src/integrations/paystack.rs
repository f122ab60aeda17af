use std::sync::Arc;

use chrono::{DateTime, Utc};
use fk_common::Kobo;
use flipkit_engine::db_types::{PaymentRef, VerifiedPayment};
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::Deserialize;
use thiserror::Error;

use super::PaymentVerifier;
use crate::config::PaystackConfig;

#[derive(Debug, Clone, Error)]
pub enum PaystackApiError {
    #[error("Could not initialize the Paystack client. {0}")]
    Initialization(String),
    #[error("The gateway did not confirm the transaction. {0}")]
    Declined(String),
    #[error("Error communicating with the gateway. {0}")]
    ResponseError(String),
    #[error("Could not deserialize the gateway response. {0}")]
    JsonError(String),
    #[error("The gateway response is missing required fields. {0}")]
    InvalidResponse(String),
}

#[derive(Clone)]
pub struct PaystackApi {
    config: PaystackConfig,
    client: Arc<Client>,
}

impl PaystackApi {
    pub fn new(config: PaystackConfig) -> Result<Self, PaystackApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let bearer = format!("Bearer {}", config.secret_key.reveal());
        let val = HeaderValue::from_str(&bearer).map_err(|e| PaystackApiError::Initialization(e.to_string()))?;
        headers.insert("Authorization", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client =
            Client::builder().default_headers(headers).build().map_err(|e| PaystackApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }
}

impl PaymentVerifier for PaystackApi {
    async fn verify_transaction(&self, reference: &PaymentRef) -> Result<VerifiedPayment, PaystackApiError> {
        let url = self.url(&format!("/transaction/verify/{reference}"));
        trace!("🔌️ Verifying transaction at {url}");
        let response = self.client.get(url).send().await.map_err(|e| PaystackApiError::ResponseError(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            debug!("🔌️ Gateway returned {status} for [{reference}]: {message}");
            return Err(PaystackApiError::Declined(format!("Gateway returned {status}. {message}")));
        }
        let body =
            response.json::<VerifyTransactionResponse>().await.map_err(|e| PaystackApiError::JsonError(e.to_string()))?;
        body.into_verified_payment(reference)
    }
}

//------------------------------------------- Wire format ------------------------------------------------------------

/// The envelope Paystack wraps every response in.
#[derive(Debug, Clone, Deserialize)]
struct VerifyTransactionResponse {
    status: bool,
    #[serde(default)]
    message: String,
    data: Option<TransactionData>,
}

#[derive(Debug, Clone, Deserialize)]
struct TransactionData {
    status: String,
    /// The settled amount in kobo.
    amount: i64,
    #[serde(default)]
    gateway_response: Option<String>,
    #[serde(default)]
    paid_at: Option<DateTime<Utc>>,
    customer: CustomerData,
}

#[derive(Debug, Clone, Deserialize)]
struct CustomerData {
    #[serde(default)]
    email: Option<String>,
}

impl VerifyTransactionResponse {
    /// Boundary validation: only a `status: true` envelope with `data.status == "success"` yields a
    /// [`VerifiedPayment`]. Anything else is a gateway refusal or a malformed payload.
    fn into_verified_payment(self, reference: &PaymentRef) -> Result<VerifiedPayment, PaystackApiError> {
        if !self.status {
            return Err(PaystackApiError::Declined(self.message));
        }
        let data = self.data.ok_or_else(|| PaystackApiError::InvalidResponse("No transaction data".to_string()))?;
        if data.status != "success" {
            return Err(PaystackApiError::Declined(format!("Transaction status is '{}'", data.status)));
        }
        let email =
            data.customer.email.ok_or_else(|| PaystackApiError::InvalidResponse("No customer email".to_string()))?;
        Ok(VerifiedPayment {
            reference: reference.clone(),
            email,
            amount: Kobo::from(data.amount),
            gateway_response: data.gateway_response,
            paid_at: data.paid_at.unwrap_or_else(Utc::now),
        })
    }
}
