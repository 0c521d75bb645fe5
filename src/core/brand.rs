//! Brand business logic - Handles brand creation, lookup and the brand overview.

use crate::{
    config::catalog::BrandConfig,
    entities::{Brand, Phone, brand, phone},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// A brand together with the number of phones it has in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandSummary {
    /// The brand
    pub brand: brand::Model,
    /// How many phones reference this brand
    pub phone_count: u64,
}

/// A brand together with all of its phones.
#[derive(Debug, Clone)]
pub struct BrandDetail {
    /// The brand
    pub brand: brand::Model,
    /// Its phones, ordered by name
    pub phones: Vec<phone::Model>,
}

/// Creates a new brand. The name is trimmed and must be non-empty and unused.
#[instrument(skip(db))]
pub async fn create_brand(db: &DatabaseConnection, name: &str) -> Result<brand::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Brand name cannot be empty".to_string(),
        });
    }

    if get_brand_by_name(db, name).await?.is_some() {
        return Err(Error::Validation {
            message: format!("A brand named '{name}' already exists"),
        });
    }

    let brand = brand::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    let brand = brand.insert(db).await?;
    info!(brand_id = brand.id, "Created brand {}", brand.name);
    Ok(brand)
}

/// Finds a brand by its unique ID.
pub async fn get_brand_by_id(db: &DatabaseConnection, brand_id: i64) -> Result<Option<brand::Model>> {
    Brand::find_by_id(brand_id).one(db).await.map_err(Into::into)
}

/// Finds a brand by its exact name.
pub async fn get_brand_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<brand::Model>> {
    Brand::find()
        .filter(brand::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every brand, alphabetically, with its phone count.
///
/// This backs the home page overview, so brands without phones are included
/// with a count of zero.
pub async fn list_brands_with_phone_counts(db: &DatabaseConnection) -> Result<Vec<BrandSummary>> {
    let brands = Brand::find()
        .order_by_asc(brand::Column::Name)
        .all(db)
        .await?;

    let mut summaries = Vec::with_capacity(brands.len());
    for brand in brands {
        let phone_count = Phone::find()
            .filter(phone::Column::BrandId.eq(brand.id))
            .count(db)
            .await?;
        summaries.push(BrandSummary { brand, phone_count });
    }
    Ok(summaries)
}

/// Loads a brand and all of its phones.
pub async fn get_brand_detail(db: &DatabaseConnection, brand_id: i64) -> Result<BrandDetail> {
    let brand = get_brand_by_id(db, brand_id)
        .await?
        .ok_or_else(|| Error::BrandNotFound {
            name: brand_id.to_string(),
        })?;

    let phones = brand
        .find_related(Phone)
        .order_by_asc(phone::Column::Name)
        .all(db)
        .await?;

    Ok(BrandDetail { brand, phones })
}

/// Inserts the configured brands that do not exist yet. Returns how many were added.
pub async fn seed_brands(db: &DatabaseConnection, brands: &[BrandConfig]) -> Result<usize> {
    let mut created = 0;
    for config in brands {
        if get_brand_by_name(db, config.name.trim()).await?.is_none() {
            create_brand(db, &config.name).await?;
            created += 1;
        }
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_brand_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_brand(&db, "   ").await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        create_brand(&db, "Apple").await?;
        let result = create_brand(&db, " Apple ").await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_brand_phone_counts() -> Result<()> {
        let db = setup_test_db().await?;
        let apple = create_brand(&db, "Apple").await?;
        let samsung = create_brand(&db, "Samsung").await?;

        create_test_phone(&db, "iPhone 12", Some(apple.id)).await?;
        create_test_phone(&db, "iPhone 13", Some(apple.id)).await?;

        let summaries = list_brands_with_phone_counts(&db).await?;
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].brand, apple);
        assert_eq!(summaries[0].phone_count, 2);
        assert_eq!(summaries[1].brand, samsung);
        assert_eq!(summaries[1].phone_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_brand_detail() -> Result<()> {
        let db = setup_test_db().await?;
        let apple = create_brand(&db, "Apple").await?;
        create_test_phone(&db, "iPhone 13", Some(apple.id)).await?;
        create_test_phone(&db, "iPhone 12", Some(apple.id)).await?;
        create_test_phone(&db, "Loose Phone", None).await?;

        let detail = get_brand_detail(&db, apple.id).await?;
        assert_eq!(detail.brand.name, "Apple");
        let names: Vec<_> = detail.phones.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["iPhone 12", "iPhone 13"]);

        let missing = get_brand_detail(&db, 999).await;
        assert!(matches!(missing, Err(Error::BrandNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_brands_skips_existing() -> Result<()> {
        let db = setup_test_db().await?;
        create_brand(&db, "Apple").await?;

        let config = vec![
            BrandConfig {
                name: "Apple".to_string(),
            },
            BrandConfig {
                name: "Nokia".to_string(),
            },
        ];
        assert_eq!(seed_brands(&db, &config).await?, 1);
        assert_eq!(seed_brands(&db, &config).await?, 0);
        assert!(get_brand_by_name(&db, "Nokia").await?.is_some());

        Ok(())
    }
}
