use thiserror::Error;

use crate::db_types::{NewVendor, SeedVendor, Vendor};

#[derive(Debug, Clone, Error)]
pub enum VendorApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Vendor with ID {0} not found")]
    VendorNotFound(String),
}

impl From<sqlx::Error> for VendorApiError {
    fn from(e: sqlx::Error) -> Self {
        VendorApiError::DatabaseError(e.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait VendorManagement {
    /// All vendors, newest first.
    async fn fetch_vendors(&self) -> Result<Vec<Vendor>, VendorApiError>;

    /// Vendors in the given product category.
    async fn fetch_vendors_by_category(&self, category: &str) -> Result<Vec<Vendor>, VendorApiError>;

    /// The vendor with the given id, if any.
    async fn fetch_vendor_by_id(&self, id: &str) -> Result<Option<Vendor>, VendorApiError>;

    /// Insert a manually added vendor. A fresh identifier is generated for it.
    async fn insert_vendor(&self, vendor: NewVendor) -> Result<Vendor, VendorApiError>;

    /// Import a batch of seed vendors, preserving their identifiers. Records whose id already exists are left
    /// untouched. Returns the number of records actually inserted.
    async fn import_vendors(&self, vendors: &[SeedVendor]) -> Result<usize, VendorApiError>;
}
