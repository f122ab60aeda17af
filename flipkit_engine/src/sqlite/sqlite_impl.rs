//! `SqliteDatabase` is a concrete implementation of a FlipKit engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module.
use std::fmt::Debug;

use sqlx::SqlitePool;

use super::db::{create_schema, exchange_rates, new_pool, orders, users, vendors};
use crate::{
    db_types::{NewOrder, NewVendor, Order, PaymentRef, SeedVendor, User, Vendor, VerifiedPayment},
    fke_api::exchange_objects::ExchangeRate,
    traits::{
        ExchangeRateError,
        ExchangeRates,
        NewUser,
        OrderApiError,
        OrderManagement,
        UserApiError,
        UserManagement,
        VendorApiError,
        VendorManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Connect to the database at `url` and bring the schema up.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        create_schema(&pool).await?;
        Ok(Self { pool })
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_pending_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::insert_pending_order(order, &mut conn).await
    }

    async fn insert_paid_order(&self, order: NewOrder, payment: &VerifiedPayment) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::insert_paid_order(order, payment, &mut conn).await
    }

    async fn fetch_order_by_reference(&self, reference: &PaymentRef) -> Result<Option<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_reference(reference, &mut conn).await?;
        Ok(order)
    }

    async fn mark_order_paid(&self, reference: &PaymentRef, payment: &VerifiedPayment) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::mark_order_paid(reference, payment, &mut conn).await
    }

    async fn fetch_orders_for_email(&self, email: &str) -> Result<Vec<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        let result = orders::fetch_orders_for_email(email, &mut conn).await?;
        Ok(result)
    }
}

impl VendorManagement for SqliteDatabase {
    async fn fetch_vendors(&self) -> Result<Vec<Vendor>, VendorApiError> {
        let mut conn = self.pool.acquire().await?;
        let vendors = vendors::fetch_vendors(&mut conn).await?;
        Ok(vendors)
    }

    async fn fetch_vendors_by_category(&self, category: &str) -> Result<Vec<Vendor>, VendorApiError> {
        let mut conn = self.pool.acquire().await?;
        let vendors = vendors::fetch_vendors_by_category(category, &mut conn).await?;
        Ok(vendors)
    }

    async fn fetch_vendor_by_id(&self, id: &str) -> Result<Option<Vendor>, VendorApiError> {
        let mut conn = self.pool.acquire().await?;
        let vendor = vendors::fetch_vendor_by_id(id, &mut conn).await?;
        Ok(vendor)
    }

    async fn insert_vendor(&self, vendor: NewVendor) -> Result<Vendor, VendorApiError> {
        let mut conn = self.pool.acquire().await?;
        vendors::insert_vendor(vendor, &mut conn).await
    }

    async fn import_vendors(&self, seed: &[SeedVendor]) -> Result<usize, VendorApiError> {
        let mut tx = self.pool.begin().await?;
        let inserted = vendors::import_vendors(seed, &mut tx).await?;
        tx.commit().await?;
        Ok(inserted)
    }
}

impl UserManagement for SqliteDatabase {
    async fn fetch_user_by_id(&self, id: &str) -> Result<Option<User>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user_by_id(id, &mut conn).await?;
        Ok(user)
    }

    async fn fetch_user_by_google_id(&self, google_id: &str) -> Result<Option<User>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user_by_google_id(google_id, &mut conn).await?;
        Ok(user)
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user_by_email(email, &mut conn).await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        users::create_user(user, &mut conn).await
    }

    async fn link_google_id(&self, user_id: &str, google_id: &str) -> Result<User, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        users::link_google_id(user_id, google_id, &mut conn).await
    }
}

impl ExchangeRates for SqliteDatabase {
    async fn fetch_last_rate(&self, currency: &str) -> Result<ExchangeRate, ExchangeRateError> {
        let mut conn = self.pool.acquire().await.map_err(|e| ExchangeRateError::DatabaseError(e.to_string()))?;
        exchange_rates::fetch_last_rate(currency, &mut conn).await
    }

    async fn set_exchange_rate(&self, rate: &ExchangeRate) -> Result<(), ExchangeRateError> {
        let mut conn = self.pool.acquire().await.map_err(|e| ExchangeRateError::DatabaseError(e.to_string()))?;
        exchange_rates::set_exchange_rate(rate, &mut conn).await
    }
}
