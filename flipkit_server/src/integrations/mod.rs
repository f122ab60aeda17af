//! Outbound HTTP integrations: the Paystack gateway, Google OAuth and the exchange-rate provider.
//!
//! Each integration is a thin reqwest client that validates the wire payload at the boundary and hands typed data
//! to the handlers. The traits exist so that endpoint tests can swap the clients for mocks.

mod google;
mod paystack;
mod rates;

use fk_common::Kobo;
use flipkit_engine::{
    db_types::{GoogleProfile, PaymentRef, VerifiedPayment},
    exchange_objects::ExchangeRate,
};

pub use google::{GoogleApiError, GoogleOauthApi};
pub use paystack::{PaystackApi, PaystackApiError};
pub use rates::{RateApi, RateApiError};

/// A payment gateway that can confirm whether a transaction reference settled successfully.
#[allow(async_fn_in_trait)]
pub trait PaymentVerifier {
    /// Look the reference up with the gateway. Returns a [`VerifiedPayment`] only if the gateway reports the
    /// transaction as successful; a declined or unknown transaction is an error.
    async fn verify_transaction(&self, reference: &PaymentRef) -> Result<VerifiedPayment, PaystackApiError>;
}

/// A federated identity provider (Google, in production).
#[allow(async_fn_in_trait)]
pub trait OauthProvider {
    /// The consent URL to redirect the user to.
    fn authorize_url(&self) -> String;

    /// Exchange the callback code for tokens and fetch the user's profile.
    async fn fetch_profile(&self, code: &str) -> Result<GoogleProfile, GoogleApiError>;
}

/// An upstream source of currency exchange rates.
#[allow(async_fn_in_trait)]
pub trait RateSource {
    /// The current USD rate, expressed in kobo per dollar.
    async fn fetch_usd_rate(&self) -> Result<ExchangeRate, RateApiError>;
}

/// Convert a major-unit rate (e.g. Naira per dollar) to kobo, rounding to the nearest kobo.
pub(crate) fn major_to_kobo(rate: f64) -> Kobo {
    Kobo::from((rate * 100.0).round() as i64)
}
