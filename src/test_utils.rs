//! Shared test utilities for `RefurbBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        phone::{self, NewPhone},
        platform,
        pricing::Condition,
    },
    entities,
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Parses a money literal such as `"113.33"`.
///
/// # Panics
/// Panics if `amount` is not a valid decimal.
#[allow(clippy::unwrap_used)]
#[must_use]
pub fn money(amount: &str) -> Decimal {
    amount.parse().unwrap()
}

/// Creates a test phone with sensible defaults.
///
/// # Defaults
/// * `base_price`: 100.00
/// * `condition`: Good
/// * `stock`: 5
pub async fn create_test_phone(
    db: &DatabaseConnection,
    name: &str,
    brand_id: Option<i64>,
) -> Result<entities::phone::Model> {
    let mut new_phone = NewPhone::new(name, money("100.00"), Condition::Good);
    new_phone.brand_id = brand_id;
    new_phone.stock = 5;
    phone::create_phone(db, new_phone).await
}

/// Creates an unbranded "Good" phone with a custom price and stock level.
pub async fn create_stocked_phone(
    db: &DatabaseConnection,
    name: &str,
    base_price: &str,
    stock: i32,
) -> Result<entities::phone::Model> {
    let mut new_phone = NewPhone::new(name, money(base_price), Condition::Good);
    new_phone.stock = stock;
    phone::create_phone(db, new_phone).await
}

/// Sets up a database with one "Good" phone and one platform, ready to be listed.
/// Returns (db, phone, platform).
pub async fn setup_with_listing_pair(
    base_price: &str,
    platform_name: &str,
    fee_percentage: &str,
    fixed_fee: &str,
) -> Result<(
    DatabaseConnection,
    entities::phone::Model,
    entities::platform::Model,
)> {
    let db = setup_test_db().await?;
    let phone = create_stocked_phone(&db, "Test Phone", base_price, 1).await?;
    let platform = platform::create_platform(
        &db,
        platform_name,
        money(fee_percentage),
        money(fixed_fee),
    )
    .await?;
    Ok((db, phone, platform))
}
