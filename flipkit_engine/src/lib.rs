//! FlipKit Engine
//!
//! The FlipKit engine holds the business flows of the FlipKit marketplace backend: payment reconciliation,
//! pending-order checkout, vendor lookup and identity resolution for Google sign-in.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the supported backend. You should never need
//!    to access the database directly. Instead, use the public API provided by the engine. The exception is the
//!    data types used in the database. These are defined in the `db_types` module and are public.
//! 2. The engine public API ([`mod@fke_api`]). This provides the public-facing functionality of the engine. It is
//!    responsible for reconciling gateway-confirmed payments against orders, creating pending orders, browsing
//!    vendors and resolving federated identities. Specific backends need to implement the traits in the
//!    [`mod@traits`] module in order to act as a backend for the FlipKit server.

pub mod db_types;
mod fke_api;
pub mod helpers;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use fke_api::{
    exchange_objects,
    exchange_rate_api::ExchangeRateApi,
    order_flow_api::{OrderFlowApi, PaymentClaim, PaymentFlowError},
    user_api::UserApi,
    vendor_api::VendorApi,
};
