use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use fk_common::{helpers::normalize_email, Kobo, NAIRA_CURRENCY_CODE};
use log::error;
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow, Type};
use thiserror::Error;

//--------------------------------------    PaymentRef     -----------------------------------------------------------
/// A lightweight wrapper around the payment reference string that correlates a payment attempt with an order.
///
/// References are either issued by the payment gateway, or generated locally when a pending order is created at
/// checkout start.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct PaymentRef(pub String);

impl PaymentRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Generate a reference that is practically unique within the store: millisecond timestamp plus a random
    /// alphanumeric suffix. Collisions fall into the same uniqueness-violation path as caller-supplied references.
    pub fn generate() -> Self {
        let suffix: String =
            rand::thread_rng().sample_iter(&Alphanumeric).take(9).map(|c| (c as char).to_ascii_lowercase()).collect();
        Self(format!("order_{}_{suffix}", Utc::now().timestamp_millis()))
    }
}

impl FromStr for PaymentRef {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for PaymentRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for PaymentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------   PaymentStatus   -----------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    /// The order has been created at checkout start, and the payment has not been confirmed yet.
    Pending,
    /// The payment has been confirmed by the gateway and reconciled against the order.
    Paid,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Paid => write!(f, "PAID"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid payment status: {0}")]
pub struct ConversionError(String);

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid payment status: {value}. But this conversion cannot fail. Defaulting to PENDING");
            PaymentStatus::Pending
        })
    }
}

//--------------------------------------       Order       -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub email: String,
    pub username: Option<String>,
    /// The order amount, in kobo.
    pub amount: Kobo,
    pub currency: String,
    pub payment_reference: PaymentRef,
    pub payment_status: PaymentStatus,
    pub gateway_response: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub metadata: Option<Json<Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewOrder     -----------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    /// The customer email. Stored trimmed and lowercased.
    pub email: String,
    pub username: Option<String>,
    /// The order amount, in kobo.
    pub amount: Kobo,
    pub currency: String,
    pub payment_reference: PaymentRef,
    pub metadata: Option<Value>,
}

impl NewOrder {
    pub fn new<S: Into<String>>(email: S, amount: Kobo, payment_reference: PaymentRef) -> Self {
        Self {
            email: normalize_email(&email.into()),
            username: None,
            amount,
            currency: NAIRA_CURRENCY_CODE.to_string(),
            payment_reference,
            metadata: None,
        }
    }

    pub fn with_username<S: Into<String>>(mut self, username: S) -> Self {
        self.username = Some(username.into());
        self
    }
}

//--------------------------------------  VerifiedPayment  -----------------------------------------------------------
/// A gateway-confirmed transaction, validated at the integration boundary.
///
/// The payment gateway's raw response is duck-typed JSON. Integrations must check the success status and required
/// fields before constructing one of these, so the reconciliation flow never has to second-guess the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedPayment {
    pub reference: PaymentRef,
    /// The payer email as reported by the gateway.
    pub email: String,
    /// The settled amount as reported by the gateway, in kobo.
    pub amount: Kobo,
    pub gateway_response: Option<String>,
    pub paid_at: DateTime<Utc>,
}

//--------------------------------------      Vendor       -----------------------------------------------------------
/// A marketplace vendor. Everything except the name and id comes from scraped listings and is optional free text.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub contact: Option<String>,
    pub picture: Option<String>,
    pub category: Option<String>,
    pub avg_price: Option<String>,
    pub ratings: Option<String>,
    pub res_time: Option<String>,
    pub tot_prod: Option<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewVendor {
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub avg_price: Option<String>,
    #[serde(default)]
    pub ratings: Option<String>,
    #[serde(default)]
    pub res_time: Option<String>,
    #[serde(default)]
    pub tot_prod: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A vendor record as it appears in a seed export, with its identifier preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedVendor {
    pub id: String,
    #[serde(flatten)]
    pub vendor: NewVendor,
}

//--------------------------------------       User        -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub google_id: Option<String>,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A federated-identity assertion from Google, as delivered by the OAuth callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleProfile {
    pub google_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub picture: Option<String>,
}
