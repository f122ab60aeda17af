use chrono::{DateTime, Utc};
use fk_common::Kobo;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt::Display;

/// A cached currency exchange rate: how many kobo one unit of the base currency buys.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub base_currency: String,
    /// The rate, in kobo per base unit (e.g. how many kobo in one US dollar).
    pub rate: Kobo,
    pub updated_at: DateTime<Utc>,
}

impl ExchangeRate {
    pub fn new(currency: String, rate: Kobo, updated_at: Option<DateTime<Utc>>) -> Self {
        let updated_at = updated_at.unwrap_or_else(Utc::now);
        Self { base_currency: currency, rate, updated_at }
    }

    /// Convert an amount in the base currency to kobo.
    pub fn convert_to_kobo(&self, amount: i64) -> Kobo {
        self.rate * amount
    }
}

impl Display for ExchangeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "1 {} => {}", self.base_currency, self.rate)
    }
}
