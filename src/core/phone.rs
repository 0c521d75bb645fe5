//! Phone business logic - Handles the refurbished phone catalog.
//!
//! This module provides functions for adding, updating, removing and browsing phones.
//! Prices are validated against the minimum sellable amount of one cent, and every
//! condition must be one of the grades known to the pricing rules.

use crate::{
    core::pricing::{self, Condition},
    entities::{CartItem, Listing, Order, Phone, Review, cart_item, listing, order, phone, review},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Default storage size for new phones, in GB.
pub const DEFAULT_MEMORY_GB: i32 = 128;

/// Maximum number of related phones shown next to a phone.
pub const RELATED_PHONES_LIMIT: u64 = 4;

/// The lowest base price a phone may have.
#[must_use]
pub fn minimum_price() -> Decimal {
    Decimal::new(1, 2)
}

/// Input for [`create_phone`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhone {
    /// Brand the phone belongs to
    pub brand_id: Option<i64>,
    /// Model name
    pub name: String,
    /// Cost basis, at least 0.01
    pub base_price: Decimal,
    /// Condition grade
    pub condition: Condition,
    /// Units in stock, never negative
    pub stock: i32,
    /// Storage in GB
    pub memory_gb: i32,
    /// Camera description
    pub camera_quality: String,
    /// Colour description
    pub color: String,
}

impl NewPhone {
    /// A phone with no brand, no stock, default memory and blank descriptions.
    #[must_use]
    pub fn new(name: impl Into<String>, base_price: Decimal, condition: Condition) -> Self {
        Self {
            brand_id: None,
            name: name.into(),
            base_price,
            condition,
            stock: 0,
            memory_gb: DEFAULT_MEMORY_GB,
            camera_quality: String::new(),
            color: String::new(),
        }
    }
}

/// Fields to change in [`update_phone`]. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneUpdate {
    /// New model name
    pub name: Option<String>,
    /// New base price
    pub base_price: Option<Decimal>,
    /// New condition grade
    pub condition: Option<Condition>,
    /// New stock level
    pub stock: Option<i32>,
    /// New storage size
    pub memory_gb: Option<i32>,
}

/// Catalog search filters. Every field is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneFilter {
    /// Exact storage size
    pub memory_gb: Option<i32>,
    /// Inclusive lower bound on the base price
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound on the base price
    pub max_price: Option<Decimal>,
    /// Exact condition grade
    pub condition: Option<Condition>,
    /// Case-insensitive substring of the colour
    pub color: Option<String>,
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Phone name cannot be empty".to_string(),
        });
    }
    Ok(name.to_string())
}

fn validate_price(price: Decimal) -> Result<Decimal> {
    if price < minimum_price() || price > pricing::max_money() || !pricing::is_whole_cents(price) {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(price)
}

fn validate_stock(stock: i32) -> Result<i32> {
    if stock < 0 {
        return Err(Error::Validation {
            message: format!("Stock cannot be negative (got {stock})"),
        });
    }
    Ok(stock)
}

fn validate_memory(memory_gb: i32) -> Result<i32> {
    if memory_gb <= 0 {
        return Err(Error::Validation {
            message: format!("Memory must be positive (got {memory_gb} GB)"),
        });
    }
    Ok(memory_gb)
}

/// Adds a new phone to the catalog after validating every field.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The base price is below 0.01
/// - The stock is negative or the memory is not positive
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_phone(db: &DatabaseConnection, new_phone: NewPhone) -> Result<phone::Model> {
    let name = validate_name(&new_phone.name)?;
    let base_price = validate_price(new_phone.base_price)?;
    let stock = validate_stock(new_phone.stock)?;
    let memory_gb = validate_memory(new_phone.memory_gb)?;

    let now = chrono::Utc::now();
    let phone = phone::ActiveModel {
        brand_id: Set(new_phone.brand_id),
        name: Set(name),
        base_price: Set(base_price),
        condition: Set(new_phone.condition.as_str().to_string()),
        stock: Set(stock),
        memory_gb: Set(memory_gb),
        camera_quality: Set(new_phone.camera_quality.trim().to_string()),
        color: Set(new_phone.color.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let phone = phone.insert(db).await?;
    info!(phone_id = phone.id, "Added phone {}", phone.name);
    Ok(phone)
}

/// Retrieves a phone by its unique ID.
pub async fn get_phone_by_id(db: &DatabaseConnection, phone_id: i64) -> Result<Option<phone::Model>> {
    Phone::find_by_id(phone_id).one(db).await.map_err(Into::into)
}

/// Finds a phone by its exact name. Returns the first match when names repeat.
pub async fn get_phone_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<phone::Model>> {
    Phone::find()
        .filter(phone::Column::Name.eq(name))
        .order_by_asc(phone::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a phone by ID or fails with [`Error::PhoneNotFound`].
pub async fn require_phone(db: &DatabaseConnection, phone_id: i64) -> Result<phone::Model> {
    get_phone_by_id(db, phone_id)
        .await?
        .ok_or_else(|| Error::PhoneNotFound {
            id: phone_id.to_string(),
        })
}

/// Searches the catalog, ordered alphabetically by name.
pub async fn find_phones(db: &DatabaseConnection, filter: &PhoneFilter) -> Result<Vec<phone::Model>> {
    let mut query = Phone::find();

    if let Some(memory_gb) = filter.memory_gb {
        query = query.filter(phone::Column::MemoryGb.eq(memory_gb));
    }
    if let Some(min_price) = filter.min_price {
        query = query.filter(phone::Column::BasePrice.gte(min_price));
    }
    if let Some(max_price) = filter.max_price {
        query = query.filter(phone::Column::BasePrice.lte(max_price));
    }
    if let Some(condition) = filter.condition {
        query = query.filter(phone::Column::Condition.eq(condition.as_str()));
    }
    if let Some(color) = filter.color.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        // LIKE is case-insensitive for ASCII in SQLite
        query = query.filter(phone::Column::Color.contains(color));
    }

    query
        .order_by_asc(phone::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Other phones of the same brand, at most [`RELATED_PHONES_LIMIT`].
/// Phones without a brand have no related phones.
pub async fn related_phones(db: &DatabaseConnection, phone: &phone::Model) -> Result<Vec<phone::Model>> {
    let Some(brand_id) = phone.brand_id else {
        return Ok(Vec::new());
    };

    Phone::find()
        .filter(phone::Column::BrandId.eq(brand_id))
        .filter(phone::Column::Id.ne(phone.id))
        .order_by_asc(phone::Column::Name)
        .limit(RELATED_PHONES_LIMIT)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates the given fields of an existing phone.
///
/// Listings are not touched; their prices are recomputed the next time the
/// phone is listed.
#[instrument(skip(db))]
pub async fn update_phone(
    db: &DatabaseConnection,
    phone_id: i64,
    changes: PhoneUpdate,
) -> Result<phone::Model> {
    let mut phone: phone::ActiveModel = require_phone(db, phone_id).await?.into();

    if let Some(name) = changes.name {
        phone.name = Set(validate_name(&name)?);
    }
    if let Some(base_price) = changes.base_price {
        phone.base_price = Set(validate_price(base_price)?);
    }
    if let Some(condition) = changes.condition {
        phone.condition = Set(condition.as_str().to_string());
    }
    if let Some(stock) = changes.stock {
        phone.stock = Set(validate_stock(stock)?);
    }
    if let Some(memory_gb) = changes.memory_gb {
        phone.memory_gb = Set(validate_memory(memory_gb)?);
    }
    phone.updated_at = Set(chrono::Utc::now());

    phone.update(db).await.map_err(Into::into)
}

/// Permanently removes a phone together with its listings, orders, reviews
/// and cart entries.
#[instrument(skip(db))]
pub async fn delete_phone(db: &DatabaseConnection, phone_id: i64) -> Result<phone::Model> {
    let txn = db.begin().await?;

    let phone = Phone::find_by_id(phone_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::PhoneNotFound {
            id: phone_id.to_string(),
        })?;

    Listing::delete_many()
        .filter(listing::Column::PhoneId.eq(phone_id))
        .exec(&txn)
        .await?;
    Order::delete_many()
        .filter(order::Column::PhoneId.eq(phone_id))
        .exec(&txn)
        .await?;
    Review::delete_many()
        .filter(review::Column::PhoneId.eq(phone_id))
        .exec(&txn)
        .await?;
    CartItem::delete_many()
        .filter(cart_item::Column::PhoneId.eq(phone_id))
        .exec(&txn)
        .await?;
    Phone::delete_by_id(phone_id).exec(&txn).await?;

    txn.commit().await?;

    info!(phone_id, "Deleted phone {}", phone.name);
    Ok(phone)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::brand::create_brand;
    use crate::core::pricing::round_money;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_phone_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_phone(&db, NewPhone::new("  ", money("100"), Condition::Good)).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_phone(&db, NewPhone::new("Pixel 6", Decimal::ZERO, Condition::Good)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result =
            create_phone(&db, NewPhone::new("Pixel 6", money("0.009"), Condition::Good)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let mut negative_stock = NewPhone::new("Pixel 6", money("100"), Condition::Good);
        negative_stock.stock = -1;
        let result = create_phone(&db, negative_stock).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let mut no_memory = NewPhone::new("Pixel 6", money("100"), Condition::Good);
        no_memory.memory_gb = 0;
        let result = create_phone(&db, no_memory).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_price_must_be_whole_cents_within_ten_digits() -> Result<()> {
        let db = setup_test_db().await?;

        for price in ["100.005", "100000000", "10000000000000000000000000"] {
            let result = create_phone(&db, NewPhone::new("Pixel 6", money(price), Condition::Good)).await;
            assert!(
                matches!(result, Err(Error::InvalidAmount { .. })),
                "accepted {price}"
            );
        }

        let phone = create_phone(&db, NewPhone::new("Pixel 6", money("99999999.99"), Condition::Good)).await?;
        assert_eq!(round_money(phone.base_price), money("99999999.99"));

        let result = update_phone(
            &db,
            phone.id,
            PhoneUpdate {
                base_price: Some(money("12.345")),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_phone_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let mut new_phone = NewPhone::new(" Galaxy S21 ", money("349.99"), Condition::Usable);
        new_phone.stock = 3;
        new_phone.color = "Black".to_string();
        let phone = create_phone(&db, new_phone).await?;

        assert_eq!(phone.name, "Galaxy S21");
        assert_eq!(phone.base_price, money("349.99"));
        assert_eq!(phone.condition, "Usable");
        assert_eq!(phone.stock, 3);
        assert_eq!(phone.memory_gb, DEFAULT_MEMORY_GB);

        let found = get_phone_by_id(&db, phone.id).await?.unwrap();
        assert_eq!(found.id, phone.id);
        assert!(get_phone_by_id(&db, 999).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_find_phones_filters() -> Result<()> {
        let db = setup_test_db().await?;

        let mut cheap = NewPhone::new("Alpha", money("120"), Condition::Good);
        cheap.memory_gb = 64;
        cheap.color = "Midnight Blue".to_string();
        create_phone(&db, cheap).await?;

        let mut mid = NewPhone::new("Bravo", money("450"), Condition::New);
        mid.memory_gb = 128;
        mid.color = "Silver".to_string();
        create_phone(&db, mid).await?;

        let mut pricey = NewPhone::new("Charlie", money("900"), Condition::Good);
        pricey.memory_gb = 256;
        pricey.color = "blue".to_string();
        create_phone(&db, pricey).await?;

        let names = |phones: Vec<phone::Model>| -> Vec<String> {
            phones.into_iter().map(|p| p.name).collect()
        };

        let all = find_phones(&db, &PhoneFilter::default()).await?;
        assert_eq!(names(all), ["Alpha", "Bravo", "Charlie"]);

        let by_memory = PhoneFilter {
            memory_gb: Some(128),
            ..Default::default()
        };
        assert_eq!(names(find_phones(&db, &by_memory).await?), ["Bravo"]);

        let by_price = PhoneFilter {
            min_price: Some(money("120")),
            max_price: Some(money("450")),
            ..Default::default()
        };
        assert_eq!(names(find_phones(&db, &by_price).await?), ["Alpha", "Bravo"]);

        let by_condition = PhoneFilter {
            condition: Some(Condition::Good),
            ..Default::default()
        };
        assert_eq!(names(find_phones(&db, &by_condition).await?), ["Alpha", "Charlie"]);

        let by_color = PhoneFilter {
            color: Some("BLUE".to_string()),
            ..Default::default()
        };
        assert_eq!(names(find_phones(&db, &by_color).await?), ["Alpha", "Charlie"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_related_phones() -> Result<()> {
        let db = setup_test_db().await?;
        let brand = create_brand(&db, "Google").await?;
        let other = create_brand(&db, "Sony").await?;

        let target = create_test_phone(&db, "Pixel 1", Some(brand.id)).await?;
        for i in 2..=7 {
            create_test_phone(&db, &format!("Pixel {i}"), Some(brand.id)).await?;
        }
        create_test_phone(&db, "Xperia", Some(other.id)).await?;

        let related = related_phones(&db, &target).await?;
        assert_eq!(related.len(), 4);
        assert!(related.iter().all(|p| p.brand_id == Some(brand.id)));
        assert!(related.iter().all(|p| p.id != target.id));

        let loose = create_test_phone(&db, "Unbranded", None).await?;
        assert!(related_phones(&db, &loose).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_phone() -> Result<()> {
        let db = setup_test_db().await?;
        let phone = create_test_phone(&db, "Old Name", None).await?;

        let updated = update_phone(
            &db,
            phone.id,
            PhoneUpdate {
                name: Some("New Name".to_string()),
                base_price: Some(money("80.50")),
                condition: Some(Condition::Scrap),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.base_price, money("80.50"));
        assert_eq!(updated.condition, "Scrap");
        assert_eq!(updated.stock, phone.stock);

        let result = update_phone(
            &db,
            phone.id,
            PhoneUpdate {
                base_price: Some(Decimal::ZERO),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result = update_phone(&db, 999, PhoneUpdate::default()).await;
        assert!(matches!(result, Err(Error::PhoneNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_phone() -> Result<()> {
        let db = setup_test_db().await?;
        let phone = create_test_phone(&db, "Doomed", None).await?;
        let keeper = create_test_phone(&db, "Keeper", None).await?;

        let deleted = delete_phone(&db, phone.id).await?;
        assert_eq!(deleted.id, phone.id);
        assert!(get_phone_by_id(&db, phone.id).await?.is_none());
        assert!(get_phone_by_id(&db, keeper.id).await?.is_some());

        let result = delete_phone(&db, phone.id).await;
        assert!(matches!(result, Err(Error::PhoneNotFound { .. })));

        Ok(())
    }
}
