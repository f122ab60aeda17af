use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewVendor, SeedVendor, Vendor},
    helpers::new_entity_id,
    traits::VendorApiError,
};

/// All vendors, newest first.
pub async fn fetch_vendors(conn: &mut SqliteConnection) -> Result<Vec<Vendor>, sqlx::Error> {
    let vendors = sqlx::query_as("SELECT * FROM vendors ORDER BY created_at DESC").fetch_all(conn).await?;
    Ok(vendors)
}

pub async fn fetch_vendors_by_category(
    category: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<Vendor>, sqlx::Error> {
    let vendors = sqlx::query_as("SELECT * FROM vendors WHERE category = $1 ORDER BY created_at DESC")
        .bind(category)
        .fetch_all(conn)
        .await?;
    Ok(vendors)
}

pub async fn fetch_vendor_by_id(id: &str, conn: &mut SqliteConnection) -> Result<Option<Vendor>, sqlx::Error> {
    let vendor = sqlx::query_as("SELECT * FROM vendors WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(vendor)
}

/// Inserts a manually added vendor under a freshly generated id.
pub async fn insert_vendor(vendor: NewVendor, conn: &mut SqliteConnection) -> Result<Vendor, VendorApiError> {
    let id = new_entity_id("vnd");
    let vendor = insert_vendor_with_id(&id, vendor, conn).await?;
    debug!("🏪️ Vendor inserted with id {id}");
    Ok(vendor)
}

async fn insert_vendor_with_id(
    id: &str,
    vendor: NewVendor,
    conn: &mut SqliteConnection,
) -> Result<Vendor, sqlx::Error> {
    let vendor = sqlx::query_as(
        r#"
            INSERT INTO vendors (id, name, contact, picture, category, avg_price, ratings, res_time, tot_prod, url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *;
        "#,
    )
    .bind(id)
    .bind(vendor.name)
    .bind(vendor.contact)
    .bind(vendor.picture)
    .bind(vendor.category)
    .bind(vendor.avg_price)
    .bind(vendor.ratings)
    .bind(vendor.res_time)
    .bind(vendor.tot_prod)
    .bind(vendor.url)
    .fetch_one(conn)
    .await?;
    Ok(vendor)
}

/// Imports seed vendors, preserving their ids. Existing ids are skipped. Returns the number of rows inserted.
pub async fn import_vendors(vendors: &[SeedVendor], conn: &mut SqliteConnection) -> Result<usize, sqlx::Error> {
    let mut inserted = 0usize;
    for seed in vendors {
        let result = sqlx::query(
            r#"
                INSERT INTO vendors (id, name, contact, picture, category, avg_price, ratings, res_time, tot_prod, url)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ON CONFLICT (id) DO NOTHING;
            "#,
        )
        .bind(seed.id.as_str())
        .bind(seed.vendor.name.as_str())
        .bind(seed.vendor.contact.as_deref())
        .bind(seed.vendor.picture.as_deref())
        .bind(seed.vendor.category.as_deref())
        .bind(seed.vendor.avg_price.as_deref())
        .bind(seed.vendor.ratings.as_deref())
        .bind(seed.vendor.res_time.as_deref())
        .bind(seed.vendor.tot_prod.as_deref())
        .bind(seed.vendor.url.as_deref())
        .execute(&mut *conn)
        .await?;
        inserted += result.rows_affected() as usize;
    }
    Ok(inserted)
}
