use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewVendor, SeedVendor, Vendor},
    traits::{VendorApiError, VendorManagement},
};

/// Read-mostly access to the vendor catalogue.
pub struct VendorApi<B> {
    db: B,
}

impl<B> Debug for VendorApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VendorApi")
    }
}

impl<B> VendorApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> VendorApi<B>
where B: VendorManagement
{
    pub async fn all_vendors(&self) -> Result<Vec<Vendor>, VendorApiError> {
        self.db.fetch_vendors().await
    }

    pub async fn vendors_by_category(&self, category: &str) -> Result<Vec<Vendor>, VendorApiError> {
        self.db.fetch_vendors_by_category(category).await
    }

    pub async fn vendor_by_id(&self, id: &str) -> Result<Vendor, VendorApiError> {
        self.db.fetch_vendor_by_id(id).await?.ok_or_else(|| VendorApiError::VendorNotFound(id.to_string()))
    }

    pub async fn add_vendor(&self, vendor: NewVendor) -> Result<Vendor, VendorApiError> {
        let vendor = self.db.insert_vendor(vendor).await?;
        debug!("🏪️ Vendor [{}] added with id {}", vendor.name, vendor.id);
        Ok(vendor)
    }

    /// Restore a seed export. Existing ids are skipped, so re-running an import is harmless.
    pub async fn import_vendors(&self, vendors: &[SeedVendor]) -> Result<usize, VendorApiError> {
        let inserted = self.db.import_vendors(vendors).await?;
        info!("🏪️ Vendor import complete. {inserted} of {} records inserted.", vendors.len());
        Ok(inserted)
    }
}
