//! Database configuration module for `RefurbBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. Composite unique keys that the entity
//! macros cannot express are added as separate indexes.

use crate::entities::{
    Brand, Cart, CartItem, CustomerQuery, Listing, Order, Phone, Platform, Review, cart_item,
    listing,
};
use crate::errors::{Error, Result};
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/refurb_buddy.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns the
/// default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Directory holding the database file of a `sqlite://` URL, if it has one.
fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

/// Establishes a connection to the database named by [`get_database_url`],
/// creating the directory of a file-backed `SQLite` database first.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {database_url}");

    if let Some(dir) = sqlite_parent_dir(&database_url) {
        std::fs::create_dir_all(dir).map_err(|e| Error::Config {
            message: format!("Failed to create database directory {}: {e}", dir.display()),
        })?;
    }

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all tables and indexes if they do not exist yet.
///
/// Brands and platforms come first so the foreign keys of phones and listings
/// always point at existing tables.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let tables = [
        schema.create_table_from_entity(Brand),
        schema.create_table_from_entity(Platform),
        schema.create_table_from_entity(Phone),
        schema.create_table_from_entity(Listing),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(Review),
        schema.create_table_from_entity(CustomerQuery),
        schema.create_table_from_entity(Cart),
        schema.create_table_from_entity(CartItem),
    ];
    for mut table in tables {
        table.if_not_exists();
        db.execute(builder.build(&table)).await?;
    }

    // A phone can only be listed once per platform.
    let listing_pair = Index::create()
        .name("idx_listings_phone_platform")
        .table(Listing)
        .col(listing::Column::PhoneId)
        .col(listing::Column::PlatformId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&listing_pair)).await?;

    let cart_pair = Index::create()
        .name("idx_cart_items_cart_phone")
        .table(CartItem)
        .col(cart_item::Column::CartId)
        .col(cart_item::Column::PhoneId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&cart_pair)).await?;

    info!("Database tables ensured.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BrandModel, ListingModel, PhoneModel, PlatformModel};
    use crate::test_utils::{money, setup_with_listing_pair};
    use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QuerySelect, Set};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<BrandModel> = Brand::find().limit(1).all(&db).await?;
        let _: Vec<PhoneModel> = Phone::find().limit(1).all(&db).await?;
        let _: Vec<PlatformModel> = Platform::find().limit(1).all(&db).await?;
        let _: Vec<ListingModel> = Listing::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_listing_pair_is_unique() -> Result<()> {
        let (db, phone, platform) = setup_with_listing_pair("100.00", "X", "10.00", "2.00").await?;

        let row = || listing::ActiveModel {
            phone_id: Set(phone.id),
            platform_id: Set(platform.id),
            platform_price: Set(money("113.33")),
            platform_condition_category: Set("Good".to_string()),
            is_listed: Set(true),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        row().insert(&db).await?;
        let duplicate = row().insert(&db).await;
        assert!(duplicate.is_err());
        assert_eq!(Listing::find().count(&db).await?, 1);

        Ok(())
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir(DEFAULT_DATABASE_URL),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite://shop.sqlite?mode=rwc"), None);
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("postgres://localhost/shop"), None);
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
