//! # Database management and control.
//!
//! This module provides the interfaces that define the contracts of the engine database *backends*.
//!
//! * [`OrderManagement`] defines the order store primitives that the payment reconciliation and checkout flows are
//!   built on.
//! * [`VendorManagement`] provides read-mostly access to the vendor catalogue.
//! * [`UserManagement`] defines behaviour for resolving federated identities to local user records.
//! * [`ExchangeRates`] defines behaviour for storing and retrieving currency exchange rates.
mod exchange_rates;
mod order_management;
mod user_management;
mod vendor_management;

pub use exchange_rates::{ExchangeRateError, ExchangeRates};
pub use order_management::{OrderApiError, OrderManagement};
pub use user_management::{NewUser, UserApiError, UserManagement};
pub use vendor_management::{VendorApiError, VendorManagement};
