use fk_common::Kobo;
use flipkit_engine::db_types::{Order, PaymentRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The payload of `POST /paystack/verify`: what the client claims was paid. Amounts are in kobo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentParams {
    pub reference: PaymentRef,
    pub email: String,
    pub amount: Kobo,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentResult {
    pub success: bool,
    pub message: String,
    pub reference: PaymentRef,
    pub order: Order,
}

/// The payload of `POST /orders`. Only the email is required; the reference is generated when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderParams {
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub amount: Option<Kobo>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub reference: Option<PaymentRef>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorQuery {
    /// Product category filter, e.g. `?product=clothing`.
    #[serde(default)]
    pub product: Option<String>,
}

/// Query params delivered by Google's OAuth callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
